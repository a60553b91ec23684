use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::Session;

/// Postgres-backed session persistence for the API layer.
///
/// Built once at startup and handed out through `AppState`. Callers hold the opaque
/// token; only its SHA-256 digest is stored.
#[derive(Debug, Clone)]
pub struct SessionStore {
    pool: PgPool,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session and return the token to hand to the client.
    pub async fn create(
        &self,
        user_id: Uuid,
        data: serde_json::Value,
    ) -> Result<(String, Session), sqlx::Error> {
        let token = generate_token();
        let session = db::sessions::create(
            &self.pool,
            user_id,
            &hash_token(&token),
            &data,
            Utc::now() + self.ttl,
        )
        .await?;
        tracing::debug!("Session {} created for user {user_id}", session.id);
        Ok((token, session))
    }

    pub async fn load(&self, token: &str) -> Result<Option<Session>, sqlx::Error> {
        db::sessions::find_active_by_hash(&self.pool, &hash_token(token)).await
    }

    /// Push expiry out by one ttl from now. `None` if the session is gone or expired.
    pub async fn refresh(&self, token: &str) -> Result<Option<Session>, sqlx::Error> {
        db::sessions::extend(&self.pool, &hash_token(token), Utc::now() + self.ttl).await
    }

    pub async fn destroy(&self, token: &str) -> Result<(), sqlx::Error> {
        db::sessions::delete_by_hash(&self.pool, &hash_token(token)).await
    }

    pub async fn destroy_all_for_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        db::sessions::delete_all_for_user(&self.pool, user_id).await
    }

    pub async fn prune_expired(&self) -> Result<u64, sqlx::Error> {
        let removed = db::sessions::delete_expired(&self.pool).await?;
        if removed > 0 {
            tracing::info!("Pruned {removed} expired sessions");
        }
        Ok(removed)
    }
}

fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_random_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn token_hash_is_stable_and_not_the_token() {
        let token = "abc123";
        assert_eq!(hash_token(token), hash_token(token));
        assert_ne!(hash_token(token), token);
        assert_eq!(hash_token(token).len(), 64);
    }
}
