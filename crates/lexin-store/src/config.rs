//! Store configuration
//!
//! Loaded from TOML; every field has a default.
//!
//! ```toml
//! default_actor = "alice"
//! enforcement = "advisory"
//! summary_locale = "en"
//!
//! [storage_keys]
//! documents = "lexin_prd_list"
//! ```

use crate::error::StoreError;
use lexin_diff::SummaryLocale;
use lexin_governance::EnforcementMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Actor recorded when none is supplied
pub const DEFAULT_ACTOR: &str = "系统";

/// Byte store keys of the three entity collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Requirement documents
    pub documents: String,
    /// Design artifacts
    pub designs: String,
    /// Projects
    pub projects: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            documents: "lexin_prd_list".to_string(),
            designs: "lexin_ui_design_list".to_string(),
            projects: "lexin_project_list".to_string(),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Actor recorded on versions and change requests
    pub default_actor: String,
    /// Frozen-entity edit policy
    pub enforcement: EnforcementMode,
    /// Language of generated summaries
    pub summary_locale: SummaryLocale,
    /// Collection keys
    pub storage_keys: StorageKeys,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_actor: DEFAULT_ACTOR.to_string(),
            enforcement: EnforcementMode::default(),
            summary_locale: SummaryLocale::default(),
            storage_keys: StorageKeys::default(),
        }
    }
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set default actor
    #[inline]
    #[must_use]
    pub fn with_default_actor(mut self, actor: impl Into<String>) -> Self {
        self.default_actor = actor.into();
        self
    }

    /// Set enforcement mode
    #[inline]
    #[must_use]
    pub fn with_enforcement(mut self, mode: EnforcementMode) -> Self {
        self.enforcement = mode;
        self
    }

    /// Set summary locale
    #[inline]
    #[must_use]
    pub fn with_summary_locale(mut self, locale: SummaryLocale) -> Self {
        self.summary_locale = locale;
        self
    }

    /// Set storage keys
    #[inline]
    #[must_use]
    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns [`StoreError::Config`] on malformed input or a blank actor
    pub fn from_toml_str(text: &str) -> Result<Self, StoreError> {
        let config: Self = toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Returns [`StoreError::Config`] if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Check field constraints
    ///
    /// # Errors
    /// Returns [`StoreError::Config`] naming the offending field
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.default_actor.trim().is_empty() {
            return Err(StoreError::Config("default_actor must not be blank".into()));
        }
        let keys = &self.storage_keys;
        if keys.documents == keys.designs || keys.documents == keys.projects || keys.designs == keys.projects {
            return Err(StoreError::Config("storage keys must be distinct".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stored_layout() {
        let config = StoreConfig::new();
        assert_eq!(config.default_actor, DEFAULT_ACTOR);
        assert_eq!(config.enforcement, EnforcementMode::Strict);
        assert_eq!(config.storage_keys.designs, "lexin_ui_design_list");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = StoreConfig::from_toml_str(
            "enforcement = \"advisory\"\nsummary_locale = \"en\"\n[storage_keys]\nprojects = \"p\"\n",
        )
        .unwrap();
        assert_eq!(config.enforcement, EnforcementMode::Advisory);
        assert_eq!(config.summary_locale, SummaryLocale::En);
        assert_eq!(config.storage_keys.projects, "p");
        assert_eq!(config.storage_keys.documents, "lexin_prd_list");
        assert_eq!(config.default_actor, DEFAULT_ACTOR);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(StoreConfig::from_toml_str("enforcement = \"lax\"").is_err());
        assert!(StoreConfig::from_toml_str("default_actor = \"  \"").is_err());
        assert!(StoreConfig::from_toml_str("[storage_keys]\ndesigns = \"lexin_prd_list\"").is_err());
    }

    #[test]
    fn builders_chain() {
        let config = StoreConfig::new()
            .with_default_actor("alice")
            .with_enforcement(EnforcementMode::Advisory);
        assert_eq!(config.default_actor, "alice");
        assert!(config.validate().is_ok());
    }
}
