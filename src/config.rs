//! Runtime configuration
//!
//! Every field has a default, so an empty TOML file (or no file at all)
//! yields a working setup pointed at the public TCGdex API.

use crate::{HandError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Number of cards in an opening hand
pub const HAND_SIZE: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the card database
    pub api_base: String,
    /// Language segment of the lookup path
    pub language: String,
    pub image_quality: String,
    pub image_extension: String,
    /// Placeholder used when a card cannot be resolved
    pub default_card_image: String,
    /// Placeholder used for an energy symbol with no local image
    pub default_energy_image: String,
    /// Directory holding the `basic<Type>Energy.jpg` images
    pub energy_image_dir: PathBuf,
    /// Per-lookup timeout in milliseconds (0 disables it)
    pub lookup_timeout_ms: u64,
    /// Cap on draw attempts per hand; `None` retries until a legal hand appears
    pub max_attempts: Option<usize>,
    /// Honour HTTP(S)_PROXY from the environment
    pub use_system_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: "https://api.tcgdex.net".to_string(),
            language: "en".to_string(),
            image_quality: "high".to_string(),
            image_extension: "png".to_string(),
            default_card_image: "/path/to/default-card.jpg".to_string(),
            default_energy_image: "/path/to/default-energy.jpg".to_string(),
            energy_image_dir: PathBuf::from("assets/images"),
            lookup_timeout_ms: 10_000,
            max_attempts: None,
            use_system_proxy: true,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| HandError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(HandError::Config("api_base must not be empty".to_string()));
        }
        if self.max_attempts == Some(0) {
            return Err(HandError::Config("max_attempts must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Lookup timeout, if enabled
    pub fn lookup_timeout(&self) -> Option<Duration> {
        (self.lookup_timeout_ms > 0).then(|| Duration::from_millis(self.lookup_timeout_ms))
    }

    /// URL of a card in the database
    /// "swsh1-25" -> "https://api.tcgdex.net/v2/en/cards/swsh1-25"
    pub fn card_url(&self, key: &str) -> String {
        format!(
            "{}/v2/{}/cards/{}",
            self.api_base.trim_end_matches('/'),
            self.language,
            key
        )
    }

    /// Final image reference for a card image base
    pub fn image_url(&self, image_base: &str) -> String {
        format!("{}/{}.{}", image_base, self.image_quality, self.image_extension)
    }
}
