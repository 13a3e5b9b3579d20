//! In-memory stores
//!
//! Same contracts as the Postgres stores, kept in process memory. Used by
//! the test suites and for running the API without a database.

use super::{NewPizzeria, PizzeriaRecord, PizzeriaStore, StoreError, UserRecord, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// In-memory user store keyed by email
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
    last_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the `is_active` flag off. Returns false if no such user.
    pub async fn deactivate(&self, email: &str) -> bool {
        match self.users.write().await.get_mut(email) {
            Some(user) => {
                user.is_active = false;
                true
            }
            None => false,
        }
    }

    /// Drop a user entirely, leaving any issued tokens dangling
    pub async fn remove(&self, email: &str) -> bool {
        self.users.write().await.remove(email).is_some()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(StoreError::Duplicate);
        }

        let user = UserRecord {
            id: self.last_id.fetch_add(1, Ordering::Relaxed) + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        users.insert(email.to_string(), user.clone());

        Ok(user)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory pizzeria store, listed in insertion order
#[derive(Default)]
pub struct InMemoryPizzeriaStore {
    pizzerias: RwLock<Vec<PizzeriaRecord>>,
}

impl InMemoryPizzeriaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PizzeriaStore for InMemoryPizzeriaStore {
    async fn list(&self) -> Result<Vec<PizzeriaRecord>, StoreError> {
        Ok(self.pizzerias.read().await.clone())
    }

    async fn create(&self, input: NewPizzeria) -> Result<PizzeriaRecord, StoreError> {
        let mut pizzerias = self.pizzerias.write().await;
        let now = Utc::now();

        let record = PizzeriaRecord {
            id: pizzerias.len() as i64 + 1,
            name: input.name,
            address: input.address,
            lat: input.lat,
            lng: input.lng,
            rating: input.rating,
            google_maps_url: input.google_maps_url,
            review: input.review,
            visited_at: input.visited_at,
            created_at: now,
            updated_at: now,
        };
        pizzerias.push(record.clone());

        Ok(record)
    }
}
