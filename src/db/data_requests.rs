use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::{Company, DataRequest, NewDataRequest, RequestStatus};

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<DataRequest>, sqlx::Error> {
    sqlx::query_as::<_, DataRequest>(
        "SELECT * FROM data_requests WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_pending(pool: &PgPool) -> Result<Vec<DataRequest>, sqlx::Error> {
    sqlx::query_as::<_, DataRequest>(
        "SELECT * FROM data_requests WHERE status = 'pending' ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<DataRequest>, sqlx::Error> {
    sqlx::query_as::<_, DataRequest>("SELECT * FROM data_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, new: &NewDataRequest) -> Result<DataRequest, sqlx::Error> {
    sqlx::query_as::<_, DataRequest>(
        "INSERT INTO data_requests (user_id, request_type, industry, justification, requested_count)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(new.user_id)
    .bind(&new.request_type)
    .bind(new.industry.as_deref())
    .bind(new.justification.as_deref())
    .bind(new.requested_count)
    .fetch_one(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: RequestStatus,
    approved_by: Option<Uuid>,
) -> Result<Option<DataRequest>, sqlx::Error> {
    sqlx::query_as::<_, DataRequest>(
        "UPDATE data_requests SET status = $2, approved_by = $3, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status.as_str())
    .bind(approved_by)
    .fetch_optional(pool)
    .await
}

/// Approve a pending request and hand the requester up to `requested_count` unassigned
/// companies, in one transaction. `None` if the request is missing or already decided.
pub async fn approve_and_assign(
    pool: &PgPool,
    id: Uuid,
    admin_id: Uuid,
) -> Result<Option<(DataRequest, Vec<Company>)>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let request = sqlx::query_as::<_, DataRequest>(
        "UPDATE data_requests SET status = 'approved', approved_by = $2, updated_at = now()
         WHERE id = $1 AND status = 'pending' RETURNING *",
    )
    .bind(id)
    .bind(admin_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(request) = request else {
        return Ok(None);
    };

    let companies = db::companies::assign_to_user(
        &mut *tx,
        request.user_id,
        i64::from(request.requested_count),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        "Data request {} approved by {admin_id}: {} companies assigned",
        request.id,
        companies.len()
    );

    Ok(Some((request, companies)))
}
