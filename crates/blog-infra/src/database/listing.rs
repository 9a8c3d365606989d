//! SQL form of the visibility filter.

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ColumnTrait, Condition};

use blog_core::domain::{Clause, ListingFilter};

use super::entity::post;

/// AND of one SQL expression per filter clause.
pub(crate) fn listing_condition(filter: &ListingFilter) -> Condition {
    filter
        .clauses()
        .iter()
        .fold(Condition::all(), |cond, clause| cond.add(clause_expr(*clause)))
}

fn clause_expr(clause: Clause) -> SimpleExpr {
    match clause {
        Clause::DraftIs(flag) => post::Column::IsDraft.eq(flag),
        Clause::PublishedAtIsSet => post::Column::PublishedAt.is_not_null(),
        Clause::PublishedAtOrBefore(instant) => {
            post::Column::PublishedAt.lte(DateTimeWithTimeZone::from(instant))
        }
    }
}
