use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Followup,
    Hot,
    Block,
}

text_enum!(Category, "category", {
    General => "general",
    Followup => "followup",
    Hot => "hot",
    Block => "block",
});

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub comment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub category: Category,
    pub comment_date: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub comment: Comment,
    pub author_name: String,
    #[sqlx(try_from = "String")]
    pub author_role: Role,
}
