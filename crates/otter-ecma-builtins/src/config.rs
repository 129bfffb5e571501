//! Engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which set of builtins the engine exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinProfile {
    /// Every implemented builtin
    Full,
    /// Reduced set: Date, RegExp, JSON and the Error hierarchy are replaced
    /// by accessors that throw `CompactProfileError`
    Compact,
}

impl Default for BuiltinProfile {
    fn default() -> Self {
        if cfg!(feature = "compact_profile") {
            Self::Compact
        } else {
            Self::Full
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Builtin profile
    pub profile: BuiltinProfile,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed
    #[error("invalid engine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EngineConfig {
    /// Configuration with the given profile
    pub fn with_profile(profile: BuiltinProfile) -> Self {
        Self { profile }
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check if the compact profile is selected
    pub fn is_compact(&self) -> bool {
        self.profile == BuiltinProfile::Compact
    }
}
