//! Editorial settings with layered precedence (defaults -> file -> env).

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::locale::Locale;
use crate::domain::moderation::PublishedEditPolicy;

const ENV_PREFIX: &str = "CATALOG";

/// Errors raised while loading [`EditorialConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load editorial configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Options controlling the editorial workflow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorialConfig {
    /// Status handling when a published record is edited.
    pub published_edit_policy: PublishedEditPolicy,
    /// Locale used when a caller does not request one.
    pub default_locale: Locale,
    /// Fill empty `en`/`fr` text from `ar` before records are persisted.
    pub fill_secondary_locales: bool,
}

impl Default for EditorialConfig {
    fn default() -> Self {
        Self {
            published_edit_policy: PublishedEditPolicy::KeepPublished,
            default_locale: Locale::Ar,
            fill_secondary_locales: true,
        }
    }
}

impl EditorialConfig {
    /// Loads settings from an optional YAML file, then `CATALOG__*` environment
    /// variables. A `.env` file in the working directory is honoured.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_layered(path, ENV_PREFIX)
    }

    fn load_layered(path: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Yaml).required(true),
            );
        }
        builder = builder.add_source(Environment::with_prefix(env_prefix).separator("__"));

        let settings: EditorialConfig = builder.build()?.try_deserialize()?;
        log::debug!(
            "Loaded editorial config: policy={:?}, default_locale={}",
            settings.published_edit_policy,
            settings.default_locale
        );
        Ok(settings)
    }
}
