// src/rendering/scene.rs

use crate::config::EngineConfig;
use crate::model::structure::Structure;
use crate::physics::bonds::{infer_bonds, Bond, BondCriteria};
use crate::physics::expansion::{Atom, ExpansionPolicy, SiteExpander};
use crate::physics::lattice::{LatticeBasis, LatticeError};
use crate::physics::warnings::{GeometryWarning, WarningSink};
use crate::rendering::framing::{FramingCalculator, FramingResult};
use crate::rendering::unit_cell::UnitCellOutline;
use serde::Serialize;

/// Everything a renderer needs to draw one structure. Built fresh for every
/// structure and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderModel {
  pub atoms: Vec<Atom>,
  pub bonds: Vec<Bond>,
  pub unit_cell: UnitCellOutline,
  pub framing: FramingResult,
  pub basis: LatticeBasis,
  /// Translation depth N used for the expansion (0..=N per axis)
  pub expansion: u32,
  pub warnings: Vec<GeometryWarning>,
}

/// Turns a structure record into a render model.
///
/// Lattice problems abort with a [`LatticeError`]; everything else (unknown
/// species, empty site list, volume drift) is recorded as a warning.
pub fn calculate_scene(
  structure: &Structure,
  config: &EngineConfig,
) -> Result<RenderModel, LatticeError> {
  let lattice = &structure.lattice;
  let basis = LatticeBasis::from_parameters(lattice)?;
  let mut sink = WarningSink::default();

  // 1. Supplied volume is only checked, never used
  let computed = basis.volume();
  if let Some(supplied) = lattice.volume {
    let drift = (supplied - computed).abs() / computed;
    if !(drift <= config.volume_tolerance) {
      sink.push(GeometryWarning::VolumeMismatch { supplied, computed });
    }
  }

  // 2. Periodic images
  let policy = ExpansionPolicy::from_config(config);
  let depth = policy.depth(lattice);
  let atoms = SiteExpander::new(&basis, depth, policy.boundary_tolerance)
    .with_atom_scale(config.atom_scale)
    .expand_into(&structure.sites, &mut sink);

  // 3. Bonds and framing both read the expanded atoms
  let bonds = infer_bonds(&atoms, &BondCriteria::from_config(config), config.bond_search);
  let framing = FramingCalculator::from_config(config).frame(&atoms);

  // 4. Wireframe of the base cell
  let unit_cell = UnitCellOutline::new(&basis);

  log::debug!(
    "Scene: {} atoms, {} bonds, extent {:.2}",
    atoms.len(),
    bonds.len(),
    framing.extent
  );

  Ok(RenderModel {
    atoms,
    bonds,
    unit_cell,
    framing,
    basis,
    expansion: depth,
    warnings: sink.into_vec(),
  })
}
