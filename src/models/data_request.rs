use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

text_enum!(RequestStatus, "request status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct DataRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_type: String,
    pub industry: Option<String>,
    pub justification: Option<String>,
    pub requested_count: i32,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDataRequest {
    pub user_id: Uuid,
    pub request_type: String,
    pub industry: Option<String>,
    pub justification: Option<String>,
    pub requested_count: i32,
}
