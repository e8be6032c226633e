// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

// --- Enums ---

/// How the pairwise bond scan is carried out. All variants produce the same
/// bond set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondSearch {
  /// Plain scan below a size threshold, cell list above it
  #[default]
  Auto,
  Naive,
  /// Row-parallel scan on the rayon pool
  Parallel,
  CellList,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("could not access config file {path:?}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("could not parse config file {path:?}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("config value `{name}` is out of range: {reason}")]
  OutOfRange { name: &'static str, reason: String },
}

/// Largest translation depth accepted for either expansion factor.
/// Depth N yields up to (N+1)³ images per site.
pub const MAX_EXPANSION_DEPTH: u32 = 16;

// --- Main Config Struct ---

/// Numeric knobs of the geometry pipeline. Every field has a default, so a
/// partial `settings.json` is fine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
  /// Cells whose mean edge (a + b + c) / 3 is below this get the larger
  /// expansion factor (Å)
  pub expansion_small_cell_threshold: f64,
  pub expansion_factor_small: u32,
  pub expansion_factor_default: u32,
  /// Slack around the expansion envelope (Å)
  pub boundary_tolerance: f64,

  pub max_bond_distance: f64,
  pub min_bond_distance: f64,
  /// Multiplier on the covalent radius sum
  pub bond_ratio: f64,
  pub bond_search: BondSearch,

  pub framing_floor: f64,
  pub framing_padding: f64,

  /// Display radius = covalent radius × atom_scale
  pub atom_scale: f64,
  /// Relative mismatch allowed between a supplied and a computed volume
  /// before a warning is recorded
  pub volume_tolerance: f64,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      expansion_small_cell_threshold: 6.0,
      expansion_factor_small: 2,
      expansion_factor_default: 1,
      boundary_tolerance: 0.01,
      max_bond_distance: 3.0,
      min_bond_distance: 0.1,
      bond_ratio: 1.5,
      bond_search: BondSearch::Auto,
      framing_floor: 10.0,
      framing_padding: 1.5,
      atom_scale: 0.4,
      volume_tolerance: 1e-3,
    }
  }
}

fn out_of_range(name: &'static str, reason: impl Into<String>) -> ConfigError {
  ConfigError::OutOfRange {
    name,
    reason: reason.into(),
  }
}

impl EngineConfig {
  /// Checks the knobs against the ranges the pipeline relies on.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let finite_non_negative = [
      ("expansion_small_cell_threshold", self.expansion_small_cell_threshold),
      ("boundary_tolerance", self.boundary_tolerance),
      ("min_bond_distance", self.min_bond_distance),
      ("volume_tolerance", self.volume_tolerance),
    ];
    for (name, value) in finite_non_negative {
      if !(value.is_finite() && value >= 0.0) {
        return Err(out_of_range(name, format!("must be finite and >= 0, got {}", value)));
      }
    }

    let positive = [
      ("max_bond_distance", self.max_bond_distance),
      ("bond_ratio", self.bond_ratio),
      ("framing_floor", self.framing_floor),
      ("framing_padding", self.framing_padding),
      ("atom_scale", self.atom_scale),
    ];
    for (name, value) in positive {
      if !(value.is_finite() && value > 0.0) {
        return Err(out_of_range(name, format!("must be finite and > 0, got {}", value)));
      }
    }

    let depths = [
      ("expansion_factor_small", self.expansion_factor_small),
      ("expansion_factor_default", self.expansion_factor_default),
    ];
    for (name, value) in depths {
      if value > MAX_EXPANSION_DEPTH {
        return Err(out_of_range(
          name,
          format!("must be <= {}, got {}", MAX_EXPANSION_DEPTH, value),
        ));
      }
    }

    if self.min_bond_distance >= self.max_bond_distance {
      return Err(out_of_range(
        "min_bond_distance",
        format!(
          "must be below max_bond_distance ({} >= {})",
          self.min_bond_distance, self.max_bond_distance
        ),
      ));
    }
    Ok(())
  }

  pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let cfg: Self =
      serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
      })?;
    cfg.validate()?;
    Ok(cfg)
  }

  pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| io_err(e.into()))
  }

  /// Loads config from standard OS location (e.g., ~/.config/cview-geometry/settings.json)
  ///
  /// A missing or broken file is not fatal; defaults are used and the reason
  /// is logged.
  pub fn load() -> Self {
    let path = Self::get_path();
    if !path.exists() {
      log::info!("No config found at {:?}. Using defaults.", path);
      return Self::default();
    }
    match Self::load_from(&path) {
      Ok(cfg) => {
        log::info!("Config loaded from {:?}", path);
        cfg
      }
      Err(e) => {
        log::warn!("{}. Using defaults.", e);
        Self::default()
      }
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> Result<PathBuf, ConfigError> {
    let path = Self::get_path();
    self.save_to(&path)?;
    log::info!("Config saved to {:?}", path);
    Ok(path)
  }

  pub fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "cview-geometry") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
