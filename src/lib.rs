pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod sessions;
pub mod state;
pub mod sweeper;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::sessions::SessionStore;
use crate::state::{AppState, SharedState};

pub fn build_state(pool: PgPool, config: Config) -> SharedState {
    let sessions = SessionStore::new(pool.clone(), config.session_ttl);

    Arc::new(AppState {
        pool,
        config,
        sessions,
    })
}
