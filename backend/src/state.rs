//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: signing keys and hashing
//!    parameters are validated and built once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::auth::{PasswordService, TokenService};
use crate::config::AppConfig;
use crate::repositories::{InMemoryPizzeriaStore, InMemoryUserStore, PizzeriaStore, UserStore};
use crate::services::{AuthService, PizzeriaService};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub pizzerias: PizzeriaService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails on unusable signing or hashing configuration, which must
    /// abort startup rather than surface per request.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        pizzerias: Arc<dyn PizzeriaStore>,
    ) -> Result<Self> {
        let tokens = TokenService::new(&config.jwt).context("Invalid JWT configuration")?;
        let passwords = PasswordService::new(&config.password)
            .context("Invalid password hashing configuration")?;

        Ok(Self {
            config: Arc::new(config),
            auth: AuthService::new(tokens, passwords, users),
            pizzerias: PizzeriaService::new(pizzerias),
        })
    }

    /// State backed by fresh in-memory stores
    pub fn in_memory(config: AppConfig) -> Result<Self> {
        Self::new(
            config,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryPizzeriaStore::new()),
        )
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the authentication service
    #[inline]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[inline]
    pub fn pizzerias(&self) -> &PizzeriaService {
        &self.pizzerias
    }
}
