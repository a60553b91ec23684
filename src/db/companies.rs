use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Category, Company, CompanyStatus, CompanyUpdate, CompanyWithCategory, NewCompany};

pub async fn list_all(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY updated_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "SELECT * FROM companies WHERE assigned_to_user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, new: &NewCompany) -> Result<Company, sqlx::Error> {
    let status = if new.assigned_to_user_id.is_some() {
        CompanyStatus::Active
    } else {
        CompanyStatus::Unassigned
    };

    sqlx::query_as::<_, Company>(
        "INSERT INTO companies
             (name, industry, email, phone, address, website, company_size, notes, status, assigned_to_user_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
    )
    .bind(&new.name)
    .bind(new.industry.as_deref())
    .bind(new.email.as_deref())
    .bind(new.phone.as_deref())
    .bind(new.address.as_deref())
    .bind(new.website.as_deref())
    .bind(new.company_size.as_deref())
    .bind(new.notes.as_deref())
    .bind(status.as_str())
    .bind(new.assigned_to_user_id)
    .fetch_one(pool)
    .await
}

/// Partial update; always stamps `updated_at`. Setting an assignee marks the company
/// active; status is never set independently of the assignee.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    update: &CompanyUpdate,
) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "UPDATE companies SET
             name = COALESCE($2, name),
             industry = COALESCE($3, industry),
             email = COALESCE($4, email),
             phone = COALESCE($5, phone),
             address = COALESCE($6, address),
             website = COALESCE($7, website),
             company_size = COALESCE($8, company_size),
             notes = COALESCE($9, notes),
             status = CASE WHEN $10::uuid IS NOT NULL THEN 'active' ELSE status END,
             assigned_to_user_id = COALESCE($10, assigned_to_user_id),
             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(update.name.as_deref())
    .bind(update.industry.as_deref())
    .bind(update.email.as_deref())
    .bind(update.phone.as_deref())
    .bind(update.address.as_deref())
    .bind(update.website.as_deref())
    .bind(update.company_size.as_deref())
    .bind(update.notes.as_deref())
    .bind(update.assigned_to_user_id)
    .fetch_optional(pool)
    .await
}

/// Return a company to the unassigned pool.
pub async fn unassign(pool: &PgPool, id: Uuid) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "UPDATE companies
         SET assigned_to_user_id = NULL, status = 'unassigned', updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Comments go with the company (`ON DELETE CASCADE`).
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Companies with at least one comment of `category`, optionally limited to one assignee.
/// Each company appears once no matter how many matching comments it has.
pub async fn list_by_category(
    pool: &PgPool,
    category: Category,
    user_id: Option<Uuid>,
) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "SELECT c.* FROM companies c
         WHERE EXISTS (
             SELECT 1 FROM comments m
             WHERE m.company_id = c.id AND m.category = $1
         )
         AND ($2::uuid IS NULL OR c.assigned_to_user_id = $2)
         ORDER BY c.updated_at DESC",
    )
    .bind(category.as_str())
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Companies paired with the category of their most recent comment.
pub async fn list_with_latest_category(
    pool: &PgPool,
    user_id: Option<Uuid>,
) -> Result<Vec<CompanyWithCategory>, sqlx::Error> {
    sqlx::query_as::<_, CompanyWithCategory>(
        "SELECT c.*, latest.category AS latest_category
         FROM companies c
         LEFT JOIN LATERAL (
             SELECT m.category FROM comments m
             WHERE m.company_id = c.id
             ORDER BY m.comment_date DESC, m.created_at DESC
             LIMIT 1
         ) latest ON true
         WHERE ($1::uuid IS NULL OR c.assigned_to_user_id = $1)
         ORDER BY c.updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_unassigned(pool: &PgPool, limit: i64) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "SELECT * FROM companies WHERE assigned_to_user_id IS NULL
         ORDER BY created_at ASC, id ASC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Atomically claim up to `count` unassigned companies (oldest first) for `user_id`.
///
/// The candidate rows are locked once in a materialized CTE, so the LIMIT is applied a
/// single time; rows another claim holds are skipped, so concurrent callers never
/// receive the same company.
pub async fn assign_to_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    count: i64,
) -> Result<Vec<Company>, sqlx::Error> {
    if count <= 0 {
        return Ok(Vec::new());
    }

    let mut claimed = sqlx::query_as::<_, Company>(
        "WITH picked AS MATERIALIZED (
             SELECT id FROM companies
             WHERE assigned_to_user_id IS NULL
             ORDER BY created_at ASC, id ASC
             LIMIT $2
             FOR UPDATE SKIP LOCKED
         )
         UPDATE companies c
         SET assigned_to_user_id = $1, status = 'active', updated_at = now()
         FROM picked
         WHERE c.id = picked.id AND c.assigned_to_user_id IS NULL
         RETURNING c.*",
    )
    .bind(user_id)
    .bind(count)
    .fetch_all(executor)
    .await?;

    claimed.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

    tracing::info!(
        "Assigned {} of {count} requested companies to user {user_id}",
        claimed.len()
    );

    Ok(claimed)
}

/// Record activity on a company. Only `updated_at` changes; categories live on comments.
pub async fn touch<'e, E: sqlx::PgExecutor<'e>>(executor: E, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE companies SET updated_at = now() WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
