// src/physics/mod.rs

pub mod bonds;
pub mod expansion;
pub mod lattice;
pub mod warnings;

pub use bonds::{infer_bonds, Bond, BondCriteria};
pub use expansion::{Atom, ExpansionPolicy, SiteExpander};
pub use lattice::{InvalidLattice, LatticeBasis, LatticeError};
pub use warnings::GeometryWarning;
