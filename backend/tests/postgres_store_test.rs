//! Postgres store tests
//!
//! These need a database at `TEST_DATABASE_URL`.

mod common;

use pizza_tracker_backend::repositories::{
    NewPizzeria, PgPizzeriaStore, PgUserStore, PizzeriaStore, StoreError, UserStore,
};

fn unique_email() -> String {
    format!("store_{}@example.com", uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_user_create_and_find() {
    let app = common::TestApp::with_database().await;
    let store = PgUserStore::new(app.pool.clone().unwrap());
    let email = unique_email();

    let created = store.create(&email, "$argon2id$hash").await.unwrap();
    assert!(created.is_active);

    let found = store.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, "$argon2id$hash");
    assert!(store.find_by_email(&unique_email()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_user_unique_violation_is_duplicate() {
    let app = common::TestApp::with_database().await;
    let store = PgUserStore::new(app.pool.clone().unwrap());
    let email = unique_email();

    store.create(&email, "first").await.unwrap();
    let result = store.create(&email, "second").await;

    assert!(matches!(result, Err(StoreError::Duplicate)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_user_store_ping() {
    let app = common::TestApp::with_database().await;
    let store = PgUserStore::new(app.pool.clone().unwrap());

    assert!(store.ping().await.is_ok());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_pizzeria_location_round_trip() {
    let app = common::TestApp::with_database().await;
    let store = PgPizzeriaStore::new(app.pool.clone().unwrap());

    let created = store
        .create(NewPizzeria {
            name: "Sorbillo".to_string(),
            address: "Via dei Tribunali 32".to_string(),
            lat: Some(40.8506),
            lng: Some(14.2561),
            rating: Some(4.0),
            google_maps_url: None,
            review: None,
            visited_at: None,
        })
        .await
        .unwrap();

    let listed = store.list().await.unwrap();
    let found = listed.into_iter().find(|p| p.id == created.id).unwrap();
    assert_eq!(found.lat, Some(40.8506));
    assert_eq!(found.lng, Some(14.2561));
}
