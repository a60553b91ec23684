use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, UserField};
use crate::models::{NewUser, User, UserUpdate};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_employee_id(
    pool: &PgPool,
    employee_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE employee_id = $1")
        .bind(employee_id)
        .fetch_optional(pool)
        .await
}

/// Insert a user. Taken usernames, emails and employee ids are rejected up front, and a
/// unique violation that slips past the pre-check (concurrent insert) is reported the
/// same way.
pub async fn create(pool: &PgPool, new: &NewUser) -> Result<User, StoreError> {
    tracing::debug!(
        "Creating user username={} email={} role={} password_hash=[REDACTED]",
        new.username,
        new.email,
        new.role
    );

    if find_by_username(pool, &new.username).await?.is_some() {
        return Err(rejected(UserField::Username, &new.username));
    }
    if find_by_email(pool, &new.email).await?.is_some() {
        return Err(rejected(UserField::Email, &new.email));
    }
    if let Some(employee_id) = new.employee_id.as_deref() {
        if find_by_employee_id(pool, employee_id).await?.is_some() {
            return Err(rejected(UserField::EmployeeId, employee_id));
        }
    }

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, full_name, employee_id, role, password_hash)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(&new.username)
    .bind(&new.email)
    .bind(&new.full_name)
    .bind(new.employee_id.as_deref())
    .bind(new.role.as_str())
    .bind(&new.password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        normalize_unique_violation(
            e,
            Some(new.username.as_str()),
            Some(new.email.as_str()),
            new.employee_id.as_deref(),
        )
    })?;

    tracing::info!(
        "User created id={} username={} role={}",
        user.id,
        user.username,
        user.role
    );

    Ok(user)
}

pub async fn update_login_time(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET login_time = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    update: &UserUpdate,
) -> Result<Option<User>, StoreError> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET
             username = COALESCE($2, username),
             email = COALESCE($3, email),
             full_name = COALESCE($4, full_name),
             employee_id = COALESCE($5, employee_id),
             role = COALESCE($6, role),
             password_hash = COALESCE($7, password_hash)
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(update.username.as_deref())
    .bind(update.email.as_deref())
    .bind(update.full_name.as_deref())
    .bind(update.employee_id.as_deref())
    .bind(update.role.map(|r| r.as_str()))
    .bind(update.password_hash.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        normalize_unique_violation(
            e,
            update.username.as_deref(),
            update.email.as_deref(),
            update.employee_id.as_deref(),
        )
    })
}

/// Delete a user, returning their companies to the unassigned pool first.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let released = sqlx::query(
        "UPDATE companies
         SET assigned_to_user_id = NULL, status = 'unassigned', updated_at = now()
         WHERE assigned_to_user_id = $1",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    if released.rows_affected() > 0 {
        tracing::info!(
            "User {id} deleted; {} companies returned to the pool",
            released.rows_affected()
        );
    }

    Ok(())
}

fn rejected(field: UserField, value: &str) -> StoreError {
    tracing::warn!("Rejected user write: {} '{value}' already taken", field.as_str());
    StoreError::Duplicate {
        field,
        value: value.to_string(),
    }
}

/// Postgres reports unique violations as SQLSTATE 23505; the constraint name tells us
/// which column collided.
fn normalize_unique_violation(
    err: sqlx::Error,
    username: Option<&str>,
    email: Option<&str>,
    employee_id: Option<&str>,
) -> StoreError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            let field = UserField::from_constraint(db_err.constraint());
            let value = match field {
                UserField::Username => username,
                UserField::Email => email,
                UserField::EmployeeId => employee_id,
                UserField::Unknown => None,
            };
            rejected(field, value.unwrap_or_default())
        }
        _ => StoreError::Database(err),
    }
}
