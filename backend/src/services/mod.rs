//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth primitives.

pub mod auth;
pub mod pizzeria;

pub use auth::AuthService;
pub use pizzeria::PizzeriaService;
