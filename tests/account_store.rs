//! Integration tests for the account store

mod common;

use common::TestStore;
use serde_json::json;
use socialwatch::data::{Account, AccountField, AccountForm, NewAccountStats, NewProxy};
use socialwatch::error::AppError;

#[tokio::test]
async fn test_display_name_examples() {
    let store = TestStore::new().await;

    let alice = store.create_account("alice").await;
    assert_eq!(alice.display_name(), "@alice");

    let form = AccountForm::from_value(json!({ "username": "bob", "name": "Bob Smith" }));
    let bob = store.state.accounts.create_from_form(&form).await.unwrap();
    assert_eq!(bob.display_name(), "Bob Smith");
    assert_eq!(bob.username_prefixed(), "@bob");
}

#[tokio::test]
async fn test_second_account_with_same_username_is_rejected() {
    let store = TestStore::new().await;
    store.create_account("alice").await;

    let form = AccountForm::from_value(json!({ "username": "alice" }));
    let error = store
        .state
        .accounts
        .create_from_form(&form)
        .await
        .unwrap_err();

    let errors = error.validation_errors().expect("validation error");
    assert_eq!(errors.fields(), vec![AccountField::Username]);
    assert_eq!(store.state.db.count_accounts().await.unwrap(), 1);
}

#[tokio::test]
async fn test_proxy_reference_must_exist() {
    let store = TestStore::new().await;

    let form = AccountForm::from_value(json!({ "username": "alice", "proxy_id": 12 }));
    let error = store
        .state
        .accounts
        .create_from_form(&form)
        .await
        .unwrap_err();
    assert_eq!(
        error.validation_errors().unwrap().first(AccountField::ProxyId),
        Some("Proxy ID is invalid.")
    );

    let proxy = store
        .state
        .db
        .insert_proxy(&NewProxy {
            ip: "192.168.1.20".to_string(),
            port: 8080,
            username: Some("user".to_string()),
            password: Some("secret".to_string()),
        })
        .await
        .unwrap();

    let form = AccountForm::from_value(json!({ "username": "alice", "proxy_id": proxy.id }));
    let account = store.state.accounts.create_from_form(&form).await.unwrap();
    let resolved = account.proxy().one(store.state.db.pool()).await.unwrap();
    assert_eq!(resolved.map(|p| p.ip), Some("192.168.1.20".to_string()));
}

#[tokio::test]
async fn test_monitoring_job_flow() {
    let store = TestStore::new().await;
    let db = &store.state.db;
    let accounts = &store.state.accounts;

    let account = accounts.register_discovered("alice", None).await.unwrap();
    for followed_by in [100, 150, 175] {
        accounts
            .record_stats(
                account.id,
                &NewAccountStats {
                    followed_by,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let latest = account
        .last_account_stats()
        .one(db.pool())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.followed_by, 175);

    let reason = db.insert_invalidation_type("restricted").await.unwrap();
    let invalid = accounts.invalidate(account.id, Some(reason.id)).await.unwrap();
    let resolved = invalid.invalidation_type().one(db.pool()).await.unwrap();
    assert_eq!(resolved.map(|t| t.name), Some("restricted".to_string()));
    assert!(invalid.update_stats_after.is_some());
}

#[tokio::test]
async fn test_accounts_sharing_media_and_used_tags() {
    let store = TestStore::new().await;
    let db = &store.state.db;

    let owner = store.create_account("owner").await;
    let tagged = store.create_account("tagged").await;

    let media = db
        .insert_media(owner.id, &TestStore::media("Cx1"))
        .await
        .unwrap();
    db.link_media_account(media.id, tagged.id).await.unwrap();

    let reached = owner.accounts().all(db.pool()).await.unwrap();
    assert_eq!(reached.len(), 1);
    assert_eq!(reached[0].id, tagged.id);

    let zoo = db.insert_tag("Zoo", "zoo").await.unwrap();
    let art = db.insert_tag("Art", "art").await.unwrap();
    for account in [&owner, &tagged] {
        db.attach_tag(account.id, zoo.id, None).await.unwrap();
    }
    db.attach_tag(tagged.id, art.id, None).await.unwrap();

    let used = Account::used_tags().all(db.pool()).await.unwrap();
    assert_eq!(used, vec![art, zoo]);
}

#[tokio::test]
async fn test_missing_account_operations_are_not_found() {
    let store = TestStore::new().await;

    let result = store.state.accounts.revalidate(404).await;
    assert!(matches!(result, Err(AppError::NotFound)));

    let result = store.state.accounts.schedule_stats_update(404).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}
