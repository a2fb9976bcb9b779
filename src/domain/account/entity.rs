//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::normalize_email;
use crate::domain::token::TokenKind;

/// Account identifier - an opaque UUID assigned at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account entity for authentication
///
/// Token digests are stored on the account but never serialized. All
/// mutations go through explicit methods on a fetched instance and refresh
/// `updated_at`; persisting the result is the caller's job via the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    id: AccountId,
    /// Display name
    name: String,
    /// Lower-cased email address, unique across accounts
    email: String,
    /// Contact phone number, digits only
    phone: String,
    /// Digest of the password - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_digest: String,
    /// Whether the email address has been confirmed
    activated: bool,
    /// When the account was first activated
    #[serde(skip_serializing_if = "Option::is_none", default)]
    activated_at: Option<DateTime<Utc>>,
    /// Digest of the activation token issued at creation
    #[serde(skip_serializing, default)]
    activation_digest: String,
    /// Digest of the current "remember me" token, if any
    #[serde(skip_serializing, default)]
    remember_digest: Option<String>,
    /// Digest of the current password reset token, if any
    #[serde(skip_serializing, default)]
    reset_digest: Option<String>,
    /// When the current reset token was sent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    reset_sent_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, unactivated account
    ///
    /// The email is stored in its canonical lower-cased form. The activation
    /// digest is fixed here and never regenerated for the account's lifetime.
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        email: &str,
        phone: impl Into<String>,
        password_digest: impl Into<String>,
        activation_digest: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: normalize_email(email),
            phone: phone.into(),
            password_digest: password_digest.into(),
            activated: false,
            activated_at: None,
            activation_digest: activation_digest.into(),
            remember_digest: None,
            reset_digest: None,
            reset_sent_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn password_digest(&self) -> &str {
        &self.password_digest
    }

    pub fn activated(&self) -> bool {
        self.activated
    }

    pub fn activated_at(&self) -> Option<DateTime<Utc>> {
        self.activated_at
    }

    pub fn remember_digest(&self) -> Option<&str> {
        self.remember_digest.as_deref()
    }

    pub fn reset_digest(&self) -> Option<&str> {
        self.reset_digest.as_deref()
    }

    pub fn reset_sent_at(&self) -> Option<DateTime<Utc>> {
        self.reset_sent_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The stored digest for a token kind, if one is usable
    ///
    /// An empty digest behaves exactly like an absent one: it never matches.
    pub fn digest(&self, kind: TokenKind) -> Option<&str> {
        let digest = match kind {
            TokenKind::Activation => Some(self.activation_digest.as_str()),
            TokenKind::Remember => self.remember_digest.as_deref(),
            TokenKind::Reset => self.reset_digest.as_deref(),
        };

        digest.filter(|d| !d.is_empty())
    }

    // Mutators

    /// Mark the email address as confirmed
    ///
    /// Activating an already activated account is a no-op; `activated_at`
    /// records the first activation only.
    pub fn activate(&mut self, now: DateTime<Utc>) {
        if !self.activated {
            self.activated = true;
            self.activated_at = Some(now);
            self.touch(now);
        }
    }

    /// Store or clear the remember token digest
    pub fn set_remember_digest(&mut self, digest: Option<String>, now: DateTime<Utc>) {
        self.remember_digest = digest;
        self.touch(now);
    }

    /// Store a new reset token digest and stamp when it was sent
    pub fn set_reset_digest(&mut self, digest: impl Into<String>, now: DateTime<Utc>) {
        self.reset_digest = Some(digest.into());
        self.reset_sent_at = Some(now);
        self.touch(now);
    }

    /// Invalidate the current reset token
    pub fn clear_reset_digest(&mut self, now: DateTime<Utc>) {
        self.reset_digest = None;
        self.touch(now);
    }

    /// Replace the password digest
    pub fn set_password_digest(&mut self, digest: impl Into<String>, now: DateTime<Utc>) {
        self.password_digest = digest.into();
        self.touch(now);
    }

    /// Whether the current reset token is older than the allowed window
    ///
    /// An account that never had a reset sent counts as expired.
    pub fn reset_expired(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        match self.reset_sent_at {
            Some(sent_at) => now - sent_at > window,
            None => true,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
