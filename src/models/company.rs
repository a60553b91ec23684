use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    #[default]
    Unassigned,
    Active,
}

text_enum!(CompanyStatus, "company status", {
    Unassigned => "unassigned",
    Active => "active",
});

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub company_size: Option<String>,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: CompanyStatus,
    pub assigned_to_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub company_size: Option<String>,
    pub notes: Option<String>,
    pub assigned_to_user_id: Option<Uuid>,
}

/// Partial update. Setting `assigned_to_user_id` is a direct admin assignment and
/// activates the company; status always follows the assignee.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub company_size: Option<String>,
    pub notes: Option<String>,
    pub assigned_to_user_id: Option<Uuid>,
}

/// A company card: the company plus the category of its most recent comment.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyWithCategory {
    #[serde(flatten)]
    pub company: Company,
    pub latest_category: Option<Category>,
}

impl<'r> FromRow<'r, PgRow> for CompanyWithCategory {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let company = Company::from_row(row)?;
        let latest_category = row
            .try_get::<Option<String>, _>("latest_category")?
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "latest_category".to_string(),
                source: Box::new(e),
            })?;

        Ok(CompanyWithCategory {
            company,
            latest_category,
        })
    }
}
