// src/physics/bonds.rs

use crate::config::{BondSearch, EngineConfig};
use crate::physics::expansion::Atom;
use crate::utils::geometry::distance_sq;
use crate::utils::linalg::Vec3;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// `BondSearch::Auto` switches from the plain scan to the cell list at this
/// many atoms
pub const AUTO_CELL_LIST_THRESHOLD: usize = 512;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bond {
    /// Indices into the atom list, first < second
    pub atoms: (usize, usize),
    pub start: Vec3,
    pub end: Vec3,
    pub length: f64,
}

/// Distance heuristic deciding whether two atoms are bonded.
///
/// ```text
/// min_distance < d < max_distance  AND  d < ratio × (r_i + r_j)
/// ```
/// with covalent radii `r`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BondCriteria {
    pub max_distance: f64,
    pub min_distance: f64,
    pub ratio: f64,
}

impl Default for BondCriteria {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl BondCriteria {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_distance: config.max_bond_distance,
            min_distance: config.min_bond_distance,
            ratio: config.bond_ratio,
        }
    }

    /// Bond length if the pair qualifies
    pub fn bond_length(&self, a: &Atom, b: &Atom) -> Option<f64> {
        let d = distance_sq(a.position, b.position).sqrt();
        let limit = self.ratio * (a.covalent_radius + b.covalent_radius);
        (d > self.min_distance && d < self.max_distance && d < limit).then_some(d)
    }

    // Cutoffs that can never admit a bond
    fn is_void(&self) -> bool {
        !(self.max_distance.is_finite() && self.max_distance > 0.0)
            || !(self.ratio.is_finite() && self.ratio > 0.0)
    }
}

fn make_bond(atoms: &[Atom], i: usize, j: usize, length: f64) -> Bond {
    Bond {
        atoms: (i, j),
        start: atoms[i].position,
        end: atoms[j].position,
        length,
    }
}

/// Infers bonds with the requested search strategy. Every strategy returns
/// the same bonds, ordered by atom index pair.
pub fn infer_bonds(atoms: &[Atom], criteria: &BondCriteria, search: BondSearch) -> Vec<Bond> {
    if criteria.is_void() || atoms.len() < 2 {
        return Vec::new();
    }

    let bonds = match search {
        BondSearch::Naive => naive_bonds(atoms, criteria),
        BondSearch::Parallel => parallel_bonds(atoms, criteria),
        BondSearch::CellList => cell_list_bonds(atoms, criteria),
        BondSearch::Auto if atoms.len() < AUTO_CELL_LIST_THRESHOLD => naive_bonds(atoms, criteria),
        BondSearch::Auto => cell_list_bonds(atoms, criteria),
    };

    log::debug!(
        "Bond search ({:?}) over {} atoms found {} bonds",
        search,
        atoms.len(),
        bonds.len()
    );
    bonds
}

/// Visits every unordered pair once, O(n²)
pub fn naive_bonds(atoms: &[Atom], criteria: &BondCriteria) -> Vec<Bond> {
    let mut bonds = Vec::new();
    if criteria.is_void() {
        return bonds;
    }

    for (i, a) in atoms.iter().enumerate() {
        for (j, b) in atoms.iter().enumerate().skip(i + 1) {
            if let Some(d) = criteria.bond_length(a, b) {
                bonds.push(make_bond(atoms, i, j, d));
            }
        }
    }
    bonds
}

/// Same scan as [`naive_bonds`], rows split across the rayon pool
pub fn parallel_bonds(atoms: &[Atom], criteria: &BondCriteria) -> Vec<Bond> {
    if criteria.is_void() {
        return Vec::new();
    }

    let n = atoms.len();
    // collect() keeps row order, so the result is already sorted by (i, j)
    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            (i + 1..n).filter_map(move |j| {
                criteria
                    .bond_length(&atoms[i], &atoms[j])
                    .map(|d| make_bond(atoms, i, j, d))
            })
        })
        .collect()
}

/// Spatial binning with bin edge = `max_distance`.
///
/// Any bonded pair is closer than `max_distance`, so its atoms sit in the
/// same or adjacent bins; only the 27 surrounding bins are searched.
pub fn cell_list_bonds(atoms: &[Atom], criteria: &BondCriteria) -> Vec<Bond> {
    if criteria.is_void() {
        return Vec::new();
    }

    // Bin indices stay well inside i64 so the ±1 neighbour offsets cannot
    // overflow; coordinates beyond that go through the plain scan.
    let bin = criteria.max_distance;
    let limit = (i64::MAX / 2) as f64;
    let key = |p: Vec3| -> Option<[i64; 3]> {
        let mut k = [0i64; 3];
        for (slot, &v) in k.iter_mut().zip(p.iter()) {
            let scaled = (v / bin).floor();
            if !(scaled.abs() < limit) {
                return None;
            }
            *slot = scaled as i64;
        }
        Some(k)
    };

    let keys: Option<Vec<[i64; 3]>> = atoms.iter().map(|a| key(a.position)).collect();
    let Some(keys) = keys else {
        log::debug!("Coordinates exceed the cell-list range, using the naive scan");
        return naive_bonds(atoms, criteria);
    };

    let mut cells: HashMap<[i64; 3], Vec<usize>> = HashMap::new();
    for (i, &k) in keys.iter().enumerate() {
        cells.entry(k).or_default().push(i);
    }

    let mut bonds = Vec::new();
    for (i, (a, &[cx, cy, cz])) in atoms.iter().zip(keys.iter()).enumerate() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(members) = cells.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    for &j in members {
                        if j <= i {
                            continue; // Avoid duplicates
                        }
                        if let Some(d) = criteria.bond_length(a, &atoms[j]) {
                            bonds.push(make_bond(atoms, i, j, d));
                        }
                    }
                }
            }
        }
    }

    bonds.sort_unstable_by_key(|b| b.atoms);
    bonds
}
