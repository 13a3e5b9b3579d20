//! Pizzeria listing and creation

use crate::error::ApiError;
use crate::repositories::{NewPizzeria, PizzeriaStore, UserRecord};
use pizza_tracker_shared::{PizzeriaCreate, PizzeriaRead};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct PizzeriaService {
    store: Arc<dyn PizzeriaStore>,
}

impl PizzeriaService {
    pub fn new(store: Arc<dyn PizzeriaStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<PizzeriaRead>, ApiError> {
        let records = self.store.list().await?;
        Ok(records.into_iter().map(|r| r.into_read()).collect())
    }

    /// Record a visited pizzeria on behalf of `added_by`
    pub async fn create(
        &self,
        added_by: &UserRecord,
        input: PizzeriaCreate,
    ) -> Result<PizzeriaRead, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation("Name cannot be empty".to_string()));
        }
        if input.address.trim().is_empty() {
            return Err(ApiError::Validation("Address cannot be empty".to_string()));
        }

        let record = self
            .store
            .create(NewPizzeria {
                name: input.name,
                address: input.address,
                lat: input.location.map(|l| l.lat),
                lng: input.location.map(|l| l.lng),
                rating: input.rating,
                google_maps_url: input.google_maps_url,
                review: input.review,
                visited_at: input.visited_at,
            })
            .await?;

        info!(pizzeria_id = record.id, user_id = added_by.id, "Pizzeria added");
        Ok(record.into_read())
    }
}
