use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::sessions::SessionStore;

pub type SharedState = Arc<AppState>;

/// Everything the API layer needs, constructed once and passed in.
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub sessions: SessionStore,
}
