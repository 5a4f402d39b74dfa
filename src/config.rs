//! Configuration file support.
//!
//! The ratio table, display limits and tree settings are read from a TOML
//! file. Ratios are stored in their `{a, b}` form:
//!
//! ```toml
//! [[ratios]]
//! a = 15
//! b = 16
//!
//! [limits]
//! max_combined = 24
//! max_combined_enabled = true
//!
//! [tree]
//! root_degree = 3
//! depth = 6
//! ```

use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::harmony::{Rational, Rationalizer, DEFAULT_BASE_RATIOS};
use crate::tree::{Limits, MAX_TREE_DEPTH};

/// Shape of the displayed chord tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    /// Interval of the symmetric root chord, in semitones
    pub root_degree: i64,
    /// Lowest note of the root chord, relative to middle C
    pub bass_pitch: i64,
    /// Rows shown below the root, at most [`MAX_TREE_DEPTH`]
    pub depth: u32,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            root_degree: 4,
            bass_pitch: 0,
            depth: 5,
        }
    }
}

/// Everything the presentation layer hands to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ratios for intervals of 1 through 11 semitones
    pub ratios: Vec<Rational>,
    /// Display limits; absent means every chord is shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
    /// Tree settings
    pub tree: TreeSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ratios: DEFAULT_BASE_RATIOS.to_vec(),
            limits: None,
            tree: TreeSettings::default(),
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text. Missing fields take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse configuration")?;
        ensure!(
            config.tree.depth <= MAX_TREE_DEPTH,
            "tree depth {} exceeds the maximum of {}",
            config.tree.depth,
            MAX_TREE_DEPTH
        );
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Builds the rationalizer for the configured ratio table.
    ///
    /// A table that is not strictly decreasing inside (1/2, 1) is accepted
    /// with a warning.
    pub fn rationalizer(&self) -> Result<Rationalizer> {
        let rationalizer = Rationalizer::new(&self.ratios).context("Invalid ratio table")?;
        if !rationalizer.is_well_formed() {
            warn!(
                "ratio table is not strictly decreasing within (1/2, 1): {}",
                self.ratios.iter().map(Rational::to_string).collect::<Vec<_>>().join(" ")
            );
        }
        Ok(rationalizer)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        let mut ret = String::from("# chordfold configuration\n");
        ret.push_str(&toml::to_string(self).context("Failed to serialize configuration")?);
        Ok(ret)
    }
}
