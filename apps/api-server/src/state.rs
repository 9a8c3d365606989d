//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{Clock, PostRepository, SystemClock, UserRepository};
use blog_infra::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use blog_infra::{PostgresPostRepository, PostgresUserRepository, database::connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    /// Source of "now" for every visibility decision.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// State backed by process-local stores.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            clock,
        }
    }

    /// Build the application state, preferring Postgres when it is configured
    /// and reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory(clock);
        };

        #[cfg(feature = "postgres")]
        let state = match connect(config).await {
            Ok(db) => {
                tracing::info!("Application state initialized with PostgreSQL");
                Self {
                    posts: Arc::new(PostgresPostRepository::new(db.clone())),
                    users: Arc::new(PostgresUserRepository::new(db)),
                    clock,
                }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to connect to database. Using in-memory fallback."
                );
                Self::in_memory(clock)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!(
                url_configured = !config.url.is_empty(),
                "Built without postgres feature - using in-memory repositories"
            );
            Self::in_memory(clock)
        };

        state
    }
}
