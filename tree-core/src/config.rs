use crate::error::{Error, InvalidConfig, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Files tried by [`Config::from_default_paths`], in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 3] = ["tree.yaml", "tree.yml", "tree.json"];

/// Tunable parameters of the growth simulation.
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of generations allowed; branches live in `0..max_recursion_depth`.
    pub max_recursion_depth: u32,
    /// A branch stops growing once its age exceeds this.
    pub max_age: u32,
    /// Chance per tick that a growing branch sprouts a child.
    pub sprout_probability: f32,
    /// Length of one growth step.
    pub grow_speed: f32,
    /// Integration step for the angular-velocity chain.
    pub dt: f32,
    /// Where the root starts, in screen-space units relative to the canvas center.
    pub origin: Vec2,
    pub fill_opacity: f32,
    /// Seed for the random source. `None` draws a seed from the OS.
    pub seed: Option<u64>,
    /// Name of a preset palette. `None` picks a random preset.
    pub palette: Option<String>,
    /// Drop branches that have been dormant for more than this many ticks.
    /// `None` keeps every branch forever.
    pub prune_dormant_after: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_recursion_depth: 5,
            max_age: 100,
            sprout_probability: 0.07,
            grow_speed: 10.0,
            dt: 0.2,
            origin: Vec2::new(0.0, 300.0),
            fill_opacity: 1.0,
            seed: None,
            palette: None,
            prune_dormant_after: None,
        }
    }
}

impl Config {
    /// Checks the values a tree cannot be built from.
    pub fn validate(&self) -> std::result::Result<(), InvalidConfig> {
        if !(self.grow_speed.is_finite() && self.grow_speed > 0.0) {
            return Err(InvalidConfig::GrowSpeed(self.grow_speed));
        }
        if self.max_recursion_depth < 1 {
            return Err(InvalidConfig::RecursionDepth(self.max_recursion_depth));
        }
        if !(0.0..=1.0).contains(&self.sprout_probability) {
            return Err(InvalidConfig::SproutProbability(self.sprout_probability));
        }
        if !self.dt.is_finite() {
            return Err(InvalidConfig::TimeStep(self.dt));
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(InvalidConfig::FillOpacity(self.fill_opacity));
        }
        Ok(())
    }

    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Loads a config file, choosing the parser from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> std::result::Result<Self, String> = match ext.as_deref() {
            Some("yaml") | Some("yml") => |t: &str| Self::from_yaml_str(t).map_err(|e| e.to_string()),
            Some("json") => |t: &str| Self::from_json_str(t).map_err(|e| e.to_string()),
            _ => return Err(Error::UnsupportedFormat(path.to_path_buf())),
        };

        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = parse(&text).map_err(|message| Error::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        info!(path = %path.display(), "loaded tree config");
        Ok(cfg)
    }

    /// Loads the first readable file in [`DEFAULT_CONFIG_PATHS`], or the defaults.
    pub fn from_default_paths() -> Self {
        Self::from_default_paths_in(".")
    }

    /// Like [`Config::from_default_paths`], looking in `dir` instead of the
    /// working directory. Files that exist but fail to load are logged and
    /// skipped.
    pub fn from_default_paths_in(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        for candidate in DEFAULT_CONFIG_PATHS {
            let path = dir.join(candidate);
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(cfg) => return cfg,
                Err(e) => warn!(error = %e, "ignoring config file"),
            }
        }
        Self::default()
    }
}
