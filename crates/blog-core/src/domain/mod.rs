//! Domain entities and the rules that govern them.

mod access;
mod page;
mod post;
mod user;
mod visibility;

pub use access::{can_modify, ensure_can_modify};
pub use page::{DEFAULT_PER_PAGE, Page, PageRequest};
pub use post::{DEFAULT_IS_DRAFT, NewPost, Post, PostChanges, PostStatus, Publication};
pub use user::User;
pub use visibility::{Clause, ListingFilter, ensure_visible, is_visible, listing_filter};
