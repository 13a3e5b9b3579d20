//! Input validation functions
//!
//! Only shape checks live here. There is deliberately no password
//! strength policy: any non-empty password is accepted.

use std::sync::OnceLock;

fn email_regex() -> &'static regex_lite::Regex {
    static EMAIL_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email_regex().is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate a password supplied at registration
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    Ok(())
}
