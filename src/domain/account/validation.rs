//! Account field validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during account validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountValidationError {
    #[error("Name cannot be empty")]
    NameRequired,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Email cannot be empty")]
    EmailRequired,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email address format is invalid")]
    EmailFormat,

    #[error("Email address is already taken")]
    EmailTaken,

    #[error("Phone number cannot be empty")]
    PhoneRequired,

    #[error("Phone number may contain digits only")]
    PhoneNotNumeric,

    #[error("Phone number is too short. Minimum length is {0} digits")]
    PhoneTooShort(usize),

    #[error("Phone number exceeds maximum length of {0} digits")]
    PhoneTooLong(usize),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

/// Email shape check: word-ish ASCII local part, '@', then a dotted domain
/// with a letters-only final label. The classes are spelled out since `\w`
/// and `\d` match beyond ASCII here.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_+\-.]+@[A-Za-z0-9\-.]+\.[A-Za-z]+$")
        .expect("email regex must compile")
});

/// Validation limits and the reset token lifetime
///
/// A policy is plain data handed to each service at construction; nothing
/// reads ambient global settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccountPolicy {
    /// Maximum display name length
    pub name_max: usize,
    /// Maximum email address length
    pub email_max: usize,
    /// Minimum phone number digits
    pub phone_min: usize,
    /// Maximum phone number digits
    pub phone_max: usize,
    /// Minimum password length
    pub password_min: usize,
    /// Maximum password length
    pub password_max: usize,
    /// Hours a password reset token stays valid
    pub password_expired_hours: i64,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            name_max: 50,
            email_max: 255,
            phone_min: 10,
            phone_max: 11,
            password_min: 6,
            password_max: 128,
            password_expired_hours: 2,
        }
    }
}

impl AccountPolicy {
    /// The reset token validity window as a duration
    pub fn reset_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.password_expired_hours)
    }

    /// Validate a display name
    pub fn validate_name(&self, name: &str) -> Result<(), AccountValidationError> {
        if name.trim().is_empty() {
            return Err(AccountValidationError::NameRequired);
        }

        if name.chars().count() > self.name_max {
            return Err(AccountValidationError::NameTooLong(self.name_max));
        }

        Ok(())
    }

    /// Validate an email address
    ///
    /// Checks presence, length, and shape only; uniqueness is the store's
    /// concern.
    pub fn validate_email(&self, email: &str) -> Result<(), AccountValidationError> {
        if email.trim().is_empty() {
            return Err(AccountValidationError::EmailRequired);
        }

        if email.chars().count() > self.email_max {
            return Err(AccountValidationError::EmailTooLong(self.email_max));
        }

        if !EMAIL_REGEX.is_match(email) {
            return Err(AccountValidationError::EmailFormat);
        }

        Ok(())
    }

    /// Validate a phone number
    pub fn validate_phone(&self, phone: &str) -> Result<(), AccountValidationError> {
        if phone.is_empty() {
            return Err(AccountValidationError::PhoneRequired);
        }

        if !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(AccountValidationError::PhoneNotNumeric);
        }

        if phone.len() < self.phone_min {
            return Err(AccountValidationError::PhoneTooShort(self.phone_min));
        }

        if phone.len() > self.phone_max {
            return Err(AccountValidationError::PhoneTooLong(self.phone_max));
        }

        Ok(())
    }

    /// Validate a password
    pub fn validate_password(&self, password: &str) -> Result<(), AccountValidationError> {
        if password.len() < self.password_min {
            return Err(AccountValidationError::PasswordTooShort(self.password_min));
        }

        if password.len() > self.password_max {
            return Err(AccountValidationError::PasswordTooLong(self.password_max));
        }

        Ok(())
    }
}

/// Canonical form of an email address: trimmed and lower-cased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
