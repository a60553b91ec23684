use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub log_level: String,
    pub max_connections: u32,
    pub session_ttl: chrono::Duration,
    pub session_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| "Missing required environment variable: DATABASE_URL".to_string())?;

        let log_level = env_or("CRMDESK_LOG_LEVEL", "info");

        let max_connections: u32 = env_or("CRMDESK_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid CRMDESK_DB_MAX_CONNECTIONS: {e}"))?;
        if max_connections == 0 {
            return Err("CRMDESK_DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        let ttl_hours: i64 = env_or("CRMDESK_SESSION_TTL_HOURS", "168")
            .parse()
            .map_err(|e| format!("Invalid CRMDESK_SESSION_TTL_HOURS: {e}"))?;
        let session_ttl = chrono::Duration::try_hours(ttl_hours)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| format!("Invalid CRMDESK_SESSION_TTL_HOURS: {ttl_hours}"))?;

        let sweep_secs: u64 = env_or("CRMDESK_SESSION_SWEEP_SECS", "300")
            .parse()
            .map_err(|e| format!("Invalid CRMDESK_SESSION_SWEEP_SECS: {e}"))?;

        Ok(Config {
            database_url,
            log_level,
            max_connections,
            session_ttl,
            session_sweep_interval: Duration::from_secs(sweep_secs.max(1)),
        })
    }
}
