//! Authentication module
//!
//! Provides JWT-based authentication with argon2 password hashing.

mod error;
mod jwt;
mod middleware;
mod password;

pub use error::AuthError;
pub use jwt::{Claims, TokenConfigError, TokenKind, TokenPair, TokenService};
pub use middleware::{bearer_token, CurrentUser};
pub use password::{PasswordError, PasswordService};
