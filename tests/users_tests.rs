mod common;

use crmdesk::db;
use crmdesk::error::{StoreError, UserField};
use crmdesk::models::{CompanyStatus, Role, UserUpdate};

// ── Create & lookup ─────────────────────────────────────────────

#[tokio::test]
async fn create_then_lookup_by_id_username_and_email() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    let mut new = common::new_user("alice");
    new.employee_id = Some("E-100".to_string());
    new.role = Role::Admin;
    let user = db::users::create(pool, &new).await.unwrap();

    let found = db::users::find_by_id(pool, user.id).await.unwrap().unwrap();
    assert_eq!(found.username, "alice");
    assert_eq!(found.email, "alice@example.com");
    assert_eq!(found.employee_id.as_deref(), Some("E-100"));
    assert_eq!(found.role, Role::Admin);
    assert!(found.is_admin());
    assert!(found.login_time.is_none());
    assert_eq!(found.created_at, user.created_at);

    assert!(db::users::find_by_username(pool, "alice").await.unwrap().is_some());
    assert!(db::users::find_by_email(pool, "alice@example.com").await.unwrap().is_some());
    assert!(db::users::find_by_username(pool, "nobody").await.unwrap().is_none());

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn password_hash_is_not_serialized() {
    let test_db = common::spawn_db().await;

    let user = common::create_user(&test_db.pool, "bob").await;
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "employee");

    common::cleanup(test_db).await;
}

// ── Duplicates ──────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    common::create_user(pool, "carol").await;

    let mut again = common::new_user("carol");
    again.email = "other@example.com".to_string();
    let err = db::users::create(pool, &again).await.unwrap_err();
    match err {
        StoreError::Duplicate { field, value } => {
            assert_eq!(field, UserField::Username);
            assert_eq!(value, "carol");
        }
        other => panic!("expected duplicate error, got {other}"),
    }

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    common::create_user(pool, "dave").await;

    let mut again = common::new_user("dave2");
    again.email = "dave@example.com".to_string();
    let err = db::users::create(pool, &again).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Duplicate { field: UserField::Email, .. }
    ));

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn duplicate_employee_id_is_rejected() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    let mut first = common::new_user("erin");
    first.employee_id = Some("E-7".to_string());
    db::users::create(pool, &first).await.unwrap();

    let mut second = common::new_user("frank");
    second.employee_id = Some("E-7".to_string());
    let err = db::users::create(pool, &second).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Duplicate { field: UserField::EmployeeId, .. }
    ));

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn concurrent_creates_with_same_username_yield_one_duplicate() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    let first = common::new_user("gina");
    let mut second = common::new_user("gina");
    second.email = "gina.other@example.com".to_string();

    let (a, b) = tokio::join!(
        db::users::create(pool, &first),
        db::users::create(pool, &second)
    );

    let results = [a, b];
    let ok = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1, "exactly one create should succeed");

    for result in results {
        if let Err(err) = result {
            assert!(
                matches!(err, StoreError::Duplicate { field: UserField::Username, .. }),
                "expected duplicate username, got {err}"
            );
        }
    }

    assert_eq!(db::users::list_all(pool).await.unwrap().len(), 1);

    common::cleanup(test_db).await;
}

// ── Update & delete ─────────────────────────────────────────────

#[tokio::test]
async fn partial_update_only_touches_given_fields() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    let user = common::create_user(pool, "hank").await;

    let updated = db::users::update(
        pool,
        user.id,
        &UserUpdate {
            full_name: Some("Hank Hill".to_string()),
            role: Some(Role::Admin),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.full_name, "Hank Hill");
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(updated.username, "hank");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.password_hash, user.password_hash);

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn update_missing_user_returns_none() {
    let test_db = common::spawn_db().await;

    let result = db::users::update(&test_db.pool, uuid::Uuid::now_v7(), &UserUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn update_to_taken_email_is_duplicate() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    common::create_user(pool, "ivy").await;
    let jack = common::create_user(pool, "jack").await;

    let err = db::users::update(
        pool,
        jack.id,
        &UserUpdate {
            email: Some("ivy@example.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    match err {
        StoreError::Duplicate { field, value } => {
            assert_eq!(field, UserField::Email);
            assert_eq!(value, "ivy@example.com");
        }
        other => panic!("expected duplicate error, got {other}"),
    }

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn login_time_is_stamped() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    let user = common::create_user(pool, "kim").await;
    db::users::update_login_time(pool, user.id).await.unwrap();

    let found = db::users::find_by_id(pool, user.id).await.unwrap().unwrap();
    assert!(found.login_time.is_some());

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn list_all_is_newest_first_and_delete_removes() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    let older = common::create_user(pool, "lee").await;
    let newer = common::create_user(pool, "max").await;

    let users = db::users::list_all(pool).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, newer.id);
    assert_eq!(users[1].id, older.id);

    db::users::delete(pool, older.id).await.unwrap();
    assert!(db::users::find_by_id(pool, older.id).await.unwrap().is_none());

    common::cleanup(test_db).await;
}

#[tokio::test]
async fn deleting_user_unassigns_their_companies() {
    let test_db = common::spawn_db().await;
    let pool = &test_db.pool;

    let user = common::create_user(pool, "nina").await;
    common::create_company(pool, "Acme").await;
    let assigned = db::companies::assign_to_user(pool, user.id, 1).await.unwrap();
    assert_eq!(assigned.len(), 1);

    db::users::delete(pool, user.id).await.unwrap();

    let company = db::companies::find_by_id(pool, assigned[0].id)
        .await
        .unwrap()
        .unwrap();
    assert!(company.assigned_to_user_id.is_none());
    assert_eq!(company.status, CompanyStatus::Unassigned);

    // Released companies can be claimed again.
    let next = common::create_user(pool, "olga").await;
    let reclaimed = db::companies::assign_to_user(pool, next.id, 5).await.unwrap();
    assert_eq!(reclaimed.len(), 1);
    assert_eq!(reclaimed[0].id, company.id);

    common::cleanup(test_db).await;
}
