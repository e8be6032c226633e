//! Geometry engine for crystal-structure viewing.
//!
//! Turns a structure record (lattice constants plus fractional sites) into a
//! [`RenderModel`]: cartesian atoms over a few periodic images, inferred
//! bonds, the unit-cell wireframe and camera framing. Everything here is a
//! pure function of the input structure and an [`EngineConfig`].
//!
//! ```no_run
//! use cview_geometry::{calculate_scene, EngineConfig, Structure};
//!
//! let json = std::fs::read_to_string("fixtures/silicon.json").unwrap();
//! let structure = Structure::from_json(&json).unwrap();
//! let model = calculate_scene(&structure, &EngineConfig::default()).unwrap();
//! println!("{} atoms, {} bonds", model.atoms.len(), model.bonds.len());
//! ```

pub mod config;
pub mod model;
pub mod physics;
pub mod rendering;
pub mod utils;

pub use config::{BondSearch, ConfigError, EngineConfig};
pub use model::{Lattice, Site, Structure};
pub use physics::{Atom, Bond, GeometryWarning, LatticeBasis, LatticeError};
pub use rendering::{calculate_scene, FramingResult, RenderModel, UnitCellOutline};
