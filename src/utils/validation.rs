//! Input validation shared by accounts and catalogue records

use crate::utils::error::{Result, ShopError};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("username pattern is valid"));

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

/// Data validation utilities
pub struct DataValidator;

impl DataValidator {
    /// Validate username
    pub fn validate_username(username: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(ShopError::validation("Username cannot be empty"));
        }

        if username.len() < 3 {
            return Err(ShopError::validation(
                "Username must be at least 3 characters",
            ));
        }

        if username.len() > 50 {
            return Err(ShopError::validation(
                "Username cannot exceed 50 characters",
            ));
        }

        if !USERNAME_REGEX.is_match(username) {
            return Err(ShopError::validation(
                "Username can only contain letters, numbers, underscores, and hyphens",
            ));
        }

        Ok(())
    }

    /// Validate password strength
    pub fn validate_password(password: &str) -> Result<()> {
        if password.len() < 8 {
            return Err(ShopError::validation(
                "Password must be at least 8 characters",
            ));
        }

        if password.len() > 128 {
            return Err(ShopError::validation(
                "Password cannot exceed 128 characters",
            ));
        }

        let has_lowercase = password.chars().any(|c| c.is_lowercase());
        let has_uppercase = password.chars().any(|c| c.is_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password
            .chars()
            .any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c));

        let strength_count = [has_lowercase, has_uppercase, has_digit, has_special]
            .iter()
            .filter(|&&x| x)
            .count();

        if strength_count < 3 {
            return Err(ShopError::validation(
                "Password must contain at least 3 of: lowercase, uppercase, digit, special character",
            ));
        }

        Ok(())
    }

    /// Validate email address
    pub fn validate_email(email: &str) -> Result<()> {
        if !EMAIL_REGEX.is_match(email) {
            return Err(ShopError::validation(format!("Invalid email address: {}", email)));
        }
        Ok(())
    }

    /// Reject blank required text fields
    pub fn require_text(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ShopError::validation(format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    /// Reject negative amounts of money
    pub fn require_non_negative(field: &str, cents: i64) -> Result<()> {
        if cents < 0 {
            return Err(ShopError::validation(format!("{} cannot be negative", field)));
        }
        Ok(())
    }
}
