//! 仓库层测试（需要数据库，设置 TEST_DATABASE_URL 后运行 `--ignored`）

use pharmex_admin::{
    access::{AccessDecision, AccessPolicy, PgAdminDirectory},
    auth::SessionContext,
    models::{AdminRole, Principal, StaffRole},
    repository::{AdminRepository, PharmacistRepository},
};
use std::sync::Arc;
use uuid::Uuid;

mod common;
use common::{admin_record, create_test_config, insert_admin, insert_pharmacist, setup_test_db};

async fn decide(policy: &AccessPolicy, user_id: Uuid) -> AccessDecision {
    policy
        .decide(&SessionContext::authenticated(Principal::new(user_id)))
        .await
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_admin_repository_find_by_user_id() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let user_id = Uuid::new_v4();
    let record = admin_record(user_id, "AD0001", AdminRole::SuperAdmin, true);
    insert_admin(&pool, &record).await;

    let repo = AdminRepository::new(pool.clone());

    let found = repo
        .find_by_user_id(user_id)
        .await
        .unwrap()
        .expect("Admin not found");
    assert_eq!(found, record);

    assert!(repo.find_by_user_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_admin_repository_list_active() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    insert_admin(&pool, &admin_record(Uuid::new_v4(), "AD0002", AdminRole::Admin, true)).await;
    insert_admin(&pool, &admin_record(Uuid::new_v4(), "AD0001", AdminRole::SuperAdmin, true)).await;
    insert_admin(&pool, &admin_record(Uuid::new_v4(), "AD0003", AdminRole::Admin, false)).await;

    let admins = AdminRepository::new(pool).list_active().await.unwrap();
    let ids: Vec<&str> = admins.iter().map(|a| a.admin_id.as_str()).collect();
    assert_eq!(ids, vec!["AD0001", "AD0002"]);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_unknown_role_is_a_lookup_failure() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let user_id = Uuid::new_v4();
    insert_admin(&pool, &admin_record(user_id, "AD0009", AdminRole::Admin, true)).await;
    sqlx::query("UPDATE admin_users SET role = 'owner' WHERE user_id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(AdminRepository::new(pool.clone())
        .find_by_user_id(user_id)
        .await
        .is_err());

    let policy = AccessPolicy::standard(Arc::new(PgAdminDirectory::new(pool)));
    assert!(!decide(&policy, user_id).await.is_granted());
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_pharmacist_repository_joins_pharmacy() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let user_id = Uuid::new_v4();
    insert_pharmacist(&pool, user_id, "admin", "PH0002").await;

    let record = PharmacistRepository::new(pool)
        .find_by_user_id(user_id)
        .await
        .unwrap()
        .expect("Pharmacist not found");

    assert_eq!(record.role, StaffRole::Admin);
    assert_eq!(record.display_id(), "PH0002");
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_policy_against_database() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    let (current, legacy, staff) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    insert_admin(&pool, &admin_record(current, "AD0001", AdminRole::SuperAdmin, true)).await;
    insert_pharmacist(&pool, legacy, "admin", "PH0002").await;
    insert_pharmacist(&pool, staff, "staff", "PH0003").await;

    let policy = AccessPolicy::standard(Arc::new(PgAdminDirectory::new(pool)));

    assert!(matches!(decide(&policy, current).await, AccessDecision::GrantedCurrent(_)));
    assert!(matches!(decide(&policy, legacy).await, AccessDecision::GrantedLegacy { .. }));
    assert!(matches!(decide(&policy, staff).await, AccessDecision::Denied(_)));
}
