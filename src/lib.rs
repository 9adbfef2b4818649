//! MFI stock web: server-rendered front end for the vehicle stock book and
//! workshop job cards, backed by Postgres.

use sqlx::PgPool;

pub mod error;
pub mod routes;
pub mod stock;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}
