// src/physics/warnings.rs

use serde::Serialize;
use std::fmt;

/// Recoverable problems met while building a render model. The pipeline
/// logs each one and keeps going with a safe default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryWarning {
    /// Species not in the element table; the fallback entry was used.
    UnknownElement { species: String },
    /// No sites, so the model is empty.
    EmptyStructure,
    /// Supplied cell volume disagrees with the basis.
    VolumeMismatch { supplied: f64, computed: f64 },
    /// Site skipped because a fractional coordinate is NaN or infinite.
    NonFiniteCoordinates { site_index: usize },
    OccupancyOutOfRange { site_index: usize, occupancy: f64 },
}

impl fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeometryWarning::UnknownElement { species } => {
                write!(f, "Unknown species '{}', using fallback element", species)
            }
            GeometryWarning::EmptyStructure => write!(f, "Structure contains no sites"),
            GeometryWarning::VolumeMismatch { supplied, computed } => write!(
                f,
                "Supplied volume {:.4} Å³ differs from computed {:.4} Å³",
                supplied, computed
            ),
            GeometryWarning::NonFiniteCoordinates { site_index } => {
                write!(f, "Site {} has non-finite fractional coordinates, skipped", site_index)
            }
            GeometryWarning::OccupancyOutOfRange {
                site_index,
                occupancy,
            } => write!(
                f,
                "Site {} occupancy {} is outside [0, 1]",
                site_index, occupancy
            ),
        }
    }
}

/// Collects warnings and logs each as it is recorded
#[derive(Debug, Default)]
pub(crate) struct WarningSink {
    warnings: Vec<GeometryWarning>,
}

impl WarningSink {
    pub(crate) fn push(&mut self, warning: GeometryWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub(crate) fn into_vec(self) -> Vec<GeometryWarning> {
        self.warnings
    }
}
