use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::{Comment, CommentWithAuthor, NewComment};

pub async fn list_by_company(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, CommentWithAuthor>(
        "SELECT m.*, u.full_name AS author_name, u.role AS author_role
         FROM comments m
         JOIN users u ON m.user_id = u.id
         WHERE m.company_id = $1
         ORDER BY m.created_at DESC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Comments by `user_id` whose `comment_date` falls in `[start, end)`.
pub async fn list_between(
    pool: &PgPool,
    user_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments
         WHERE user_id = $1 AND comment_date >= $2 AND comment_date < $3
         ORDER BY comment_date DESC",
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Comments dated today in the server's local time zone.
pub async fn list_today_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    let (start, end) = day_bounds(&Local::now());
    list_between(pool, user_id, start, end).await
}

/// Insert a comment and record activity on its company. The two writes are separate
/// statements; if the second fails the comment stays and the error is returned.
pub async fn create(pool: &PgPool, new: &NewComment) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (company_id, user_id, content, category, comment_date)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(new.company_id)
    .bind(new.user_id)
    .bind(&new.content)
    .bind(new.category.as_str())
    .bind(new.comment_date)
    .fetch_one(pool)
    .await?;

    db::companies::touch(pool, new.company_id).await?;

    Ok(comment)
}

/// `[start of the local day containing now, start of the next local day)` in UTC.
pub fn day_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = now.timezone();
    let today = now.date_naive();
    let tomorrow = today.succ_opt().unwrap_or(NaiveDate::MAX);
    (start_of_day(&tz, today), start_of_day(&tz, tomorrow))
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    // Midnight can be skipped by a DST jump; the day then starts an hour later.
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
