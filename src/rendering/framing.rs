// src/rendering/framing.rs

use crate::config::EngineConfig;
use crate::physics::expansion::Atom;
use crate::utils::geometry::bounding_box;
use crate::utils::linalg::Vec3;
use serde::Serialize;

/// Where an external camera should look and how far it should see.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FramingResult {
  pub center: Vec3,
  pub extent: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramingCalculator {
  pub floor: f64,
  pub padding: f64,
}

impl Default for FramingCalculator {
  fn default() -> Self {
    Self::from_config(&EngineConfig::default())
  }
}

impl FramingCalculator {
  pub fn from_config(config: &EngineConfig) -> Self {
    Self {
      floor: config.framing_floor,
      padding: config.framing_padding,
    }
  }

  /// Center = midpoint of the per-axis bounds, extent = max(largest span ×
  /// padding, floor). No atoms gives the origin and the floor.
  pub fn frame(&self, atoms: &[Atom]) -> FramingResult {
    let Some((min, max)) = bounding_box(atoms.iter().map(|a| &a.position)) else {
      return FramingResult {
        center: [0.0; 3],
        extent: self.floor,
      };
    };

    let center = [
      (min[0] + max[0]) / 2.0,
      (min[1] + max[1]) / 2.0,
      (min[2] + max[2]) / 2.0,
    ];
    let range = (max[0] - min[0]).max(max[1] - min[1]).max(max[2] - min[2]);

    FramingResult {
      center,
      extent: (range * self.padding).max(self.floor),
    }
  }
}
