use serde::Deserialize;

use crate::domain::account::AccountPolicy;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub policy: AccountPolicy,
    pub hashing: HashingConfig,
}

/// Credential hashing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    pub profile: HashProfile,
}

/// Cost profile for the credential hasher
///
/// `Test` trades hardness for speed so suites that create many accounts
/// stay fast. The profile is always selected explicitly; nothing sniffs
/// the environment to pick it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashProfile {
    #[default]
    Production,
    Test,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            policy: AccountPolicy::default(),
            hashing: HashingConfig::default(),
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            profile: HashProfile::default(),
        }
    }
}

impl AuthConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("AUTH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
