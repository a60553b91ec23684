use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{FacebookDataRequest, NewFacebookDataRequest, RequestStatus};

pub async fn list_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<FacebookDataRequest>, sqlx::Error> {
    sqlx::query_as::<_, FacebookDataRequest>(
        "SELECT * FROM facebook_data_requests WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_pending(pool: &PgPool) -> Result<Vec<FacebookDataRequest>, sqlx::Error> {
    sqlx::query_as::<_, FacebookDataRequest>(
        "SELECT * FROM facebook_data_requests WHERE status = 'pending' ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<FacebookDataRequest>, sqlx::Error> {
    sqlx::query_as::<_, FacebookDataRequest>("SELECT * FROM facebook_data_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    new: &NewFacebookDataRequest,
) -> Result<FacebookDataRequest, sqlx::Error> {
    sqlx::query_as::<_, FacebookDataRequest>(
        "INSERT INTO facebook_data_requests (user_id, industry, justification)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(new.user_id)
    .bind(&new.industry)
    .bind(new.justification.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: RequestStatus,
    approved_by: Option<Uuid>,
) -> Result<Option<FacebookDataRequest>, sqlx::Error> {
    sqlx::query_as::<_, FacebookDataRequest>(
        "UPDATE facebook_data_requests SET status = $2, approved_by = $3, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status.as_str())
    .bind(approved_by)
    .fetch_optional(pool)
    .await
}
