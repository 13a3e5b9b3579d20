//! Pizzeria repository for database operations

use super::{PizzeriaStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pizza_tracker_shared::{Location, PizzeriaRead};
use sqlx::PgPool;

/// Pizzeria record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PizzeriaRecord {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub google_maps_url: Option<String>,
    pub review: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PizzeriaRecord {
    /// Response shape, with coordinates folded into `location`
    pub fn into_read(self) -> PizzeriaRead {
        PizzeriaRead {
            id: self.id,
            name: self.name,
            address: self.address,
            location: Location::from_parts(self.lat, self.lng),
            rating: self.rating,
            google_maps_url: self.google_maps_url,
            review: self.review,
            visited_at: self.visited_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for creating a pizzeria
#[derive(Debug, Clone)]
pub struct NewPizzeria {
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub google_maps_url: Option<String>,
    pub review: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
}

/// Postgres-backed pizzeria store
#[derive(Clone)]
pub struct PgPizzeriaStore {
    pool: PgPool,
}

impl PgPizzeriaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PizzeriaStore for PgPizzeriaStore {
    async fn list(&self) -> Result<Vec<PizzeriaRecord>, StoreError> {
        let records = sqlx::query_as::<_, PizzeriaRecord>(
            r#"
            SELECT id, name, address, lat, lng, rating, google_maps_url, review,
                   visited_at, created_at, updated_at
            FROM pizzerias
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(anyhow::Error::from)?;

        Ok(records)
    }

    async fn create(&self, input: NewPizzeria) -> Result<PizzeriaRecord, StoreError> {
        let record = sqlx::query_as::<_, PizzeriaRecord>(
            r#"
            INSERT INTO pizzerias
                (name, address, lat, lng, rating, google_maps_url, review, visited_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, address, lat, lng, rating, google_maps_url, review,
                      visited_at, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.lat)
        .bind(input.lng)
        .bind(input.rating)
        .bind(&input.google_maps_url)
        .bind(&input.review)
        .bind(input.visited_at)
        .fetch_one(&self.pool)
        .await
        .map_err(anyhow::Error::from)?;

        Ok(record)
    }
}
