use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::RequestStatus;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct FacebookDataRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub industry: String,
    pub justification: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFacebookDataRequest {
    pub user_id: Uuid,
    pub industry: String,
    pub justification: Option<String>,
}
