//! Application state management.

/// Shared application state.
///
/// Cloned for each readiness probe (inexpensive Arc clones inside the pool).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
