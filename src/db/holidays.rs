use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Holiday, HolidayUpdate, NewHoliday};

pub async fn list_all(pool: &PgPool) -> Result<Vec<Holiday>, sqlx::Error> {
    sqlx::query_as::<_, Holiday>("SELECT * FROM holidays ORDER BY date ASC")
        .fetch_all(pool)
        .await
}

pub async fn create(pool: &PgPool, new: &NewHoliday) -> Result<Holiday, sqlx::Error> {
    sqlx::query_as::<_, Holiday>(
        "INSERT INTO holidays (date, name, description) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(new.date)
    .bind(&new.name)
    .bind(new.description.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    update: &HolidayUpdate,
) -> Result<Option<Holiday>, sqlx::Error> {
    sqlx::query_as::<_, Holiday>(
        "UPDATE holidays SET
             date = COALESCE($2, date),
             name = COALESCE($3, name),
             description = COALESCE($4, description)
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(update.date)
    .bind(update.name.as_deref())
    .bind(update.description.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM holidays WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
