//! TOML configuration.
//!
//! ```toml
//! data_dir = "assets/data"
//! default_model = "human"
//!
//! [highlight]
//! base = "rgb(207,181,59)"
//! highlight = "rgb(1, 0, 79)"
//!
//! [gradient]
//! low = "rgb(0, 0, 255)"
//! high = "rgb(255, 255, 255)"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{ModelCatalog, DEFAULT_MODEL};
use crate::color::{
    Color, DEFAULT_BASE_COLOR, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_HIGH_COLOR, DEFAULT_LOW_COLOR,
};
use crate::error::ConfigError;
use crate::pipeline::ColorSpec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightColors {
    pub base: Color,
    pub highlight: Color,
}

impl Default for HighlightColors {
    fn default() -> Self {
        Self {
            base: Color::from(DEFAULT_BASE_COLOR),
            highlight: Color::from(DEFAULT_HIGHLIGHT_COLOR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientColors {
    pub low: Color,
    pub high: Color,
}

impl Default for GradientColors {
    fn default() -> Self {
        Self {
            low: Color::from(DEFAULT_LOW_COLOR),
            high: Color::from(DEFAULT_HIGH_COLOR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<model id>.obj` files
    pub data_dir: PathBuf,
    pub default_model: String,
    pub highlight: HighlightColors,
    pub gradient: GradientColors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            default_model: DEFAULT_MODEL.to_string(),
            highlight: HighlightColors::default(),
            gradient: GradientColors::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from: {}.", path.display());
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn catalog(&self) -> ModelCatalog {
        ModelCatalog::new(&self.data_dir)
    }

    pub fn highlight_spec(&self) -> ColorSpec {
        ColorSpec::Highlight {
            base: self.highlight.base.clone(),
            highlight: self.highlight.highlight.clone(),
        }
    }

    pub fn gradient_spec(&self) -> ColorSpec {
        ColorSpec::Gradient {
            low: self.gradient.low.clone(),
            high: self.gradient.high.clone(),
        }
    }
}
