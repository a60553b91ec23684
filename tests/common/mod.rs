#![allow(dead_code)]

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crmdesk::db;
use crmdesk::models::{Company, NewCompany, NewUser, Role, User};

/// A migrated, throwaway database for one test.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Create a fresh database, run migrations, and return a pool connected to it.
pub async fn spawn_db() -> TestDb {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let db_name = format!("crmdesk_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    TestDb { pool, db_name }
}

/// Drop the test database.
pub async fn cleanup(test_db: TestDb) {
    let db_name = test_db.db_name.clone();
    test_db.pool.close().await;

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        full_name: format!("{username} Example"),
        employee_id: None,
        role: Role::Employee,
        password_hash: "$argon2id$v=19$not-a-real-hash".to_string(),
    }
}

pub async fn create_user(pool: &PgPool, username: &str) -> User {
    db::users::create(pool, &new_user(username))
        .await
        .expect("create user failed")
}

pub async fn create_company(pool: &PgPool, name: &str) -> Company {
    db::companies::create(
        pool,
        &NewCompany {
            name: name.to_string(),
            industry: Some("Manufacturing".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("create company failed")
}
