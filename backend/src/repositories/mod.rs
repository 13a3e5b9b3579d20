//! Data access layer
//!
//! The auth core and the pizzeria service only see the [`UserStore`] and
//! [`PizzeriaStore`] traits. Postgres implementations back the running
//! server; the in-memory ones back tests and database-less local runs.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod pizzeria;
pub mod user;

pub use memory::{InMemoryPizzeriaStore, InMemoryUserStore};
pub use pizzeria::{NewPizzeria, PgPizzeriaStore, PizzeriaRecord};
pub use user::{PgUserStore, UserRecord};

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Record already exists")]
    Duplicate,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// User lookup and creation
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new active user; `Duplicate` if the email is taken.
    async fn create(&self, email: &str, password_hash: &str) -> Result<UserRecord, StoreError>;

    /// Readiness probe
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Pizzeria listing and creation
#[async_trait]
pub trait PizzeriaStore: Send + Sync {
    async fn list(&self) -> Result<Vec<PizzeriaRecord>, StoreError>;

    async fn create(&self, input: NewPizzeria) -> Result<PizzeriaRecord, StoreError>;
}
