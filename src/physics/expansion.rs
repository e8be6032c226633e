// src/physics/expansion.rs

use crate::config::{EngineConfig, MAX_EXPANSION_DEPTH};
use crate::model::elements::{self, Rgb, FALLBACK_ELEMENT};
use crate::model::structure::{Lattice, Site};
use crate::physics::lattice::LatticeBasis;
use crate::physics::warnings::{GeometryWarning, WarningSink};
use crate::utils::geometry::bounding_box;
use crate::utils::linalg::{parallelepiped_corners, Vec3};
use serde::Serialize;
use std::collections::HashSet;

/// One periodic image of a site, in cartesian space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Atom {
    pub position: Vec3,
    /// Translated fractional coordinates (site frac + translation)
    pub frac_position: Vec3,
    /// Canonical element symbol, "X" for unknown species
    pub element: &'static str,
    /// Species string as given by the site
    pub species: String,
    /// Display radius (covalent radius × atom scale)
    pub radius: f64,
    pub covalent_radius: f64,
    pub color: Rgb,
    pub occupancy: f64,
    pub site_index: usize,
    pub translation: [u32; 3],
    /// True for every replica outside the base cell
    pub is_image: bool,
}

/// Picks how many cells to replicate along each axis.
///
/// Small cells (mean edge below the threshold) get `factor_small`, all others
/// `factor_default`. Setting both factors equal gives a fixed grid. Depths
/// are clamped to [`MAX_EXPANSION_DEPTH`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExpansionPolicy {
    pub small_cell_threshold: f64,
    pub factor_small: u32,
    pub factor_default: u32,
    pub boundary_tolerance: f64,
}

impl ExpansionPolicy {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            small_cell_threshold: config.expansion_small_cell_threshold,
            factor_small: config.expansion_factor_small,
            factor_default: config.expansion_factor_default,
            boundary_tolerance: config.boundary_tolerance,
        }
    }

    pub fn fixed(depth: u32, boundary_tolerance: f64) -> Self {
        Self {
            small_cell_threshold: 0.0,
            factor_small: depth,
            factor_default: depth,
            boundary_tolerance,
        }
    }

    pub fn depth(&self, lattice: &Lattice) -> u32 {
        let depth = if lattice.mean_length() < self.small_cell_threshold {
            self.factor_small
        } else {
            self.factor_default
        };
        if depth > MAX_EXPANSION_DEPTH {
            log::warn!(
                "Expansion depth {} clamped to {}",
                depth,
                MAX_EXPANSION_DEPTH
            );
        }
        depth.min(MAX_EXPANSION_DEPTH)
    }
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Replicates sites over translations `0..=depth` on each axis and keeps the
/// replicas that fall inside the expanded cell (plus tolerance).
#[derive(Clone, Copy, Debug)]
pub struct SiteExpander<'a> {
    basis: &'a LatticeBasis,
    depth: u32,
    tolerance: f64,
    atom_scale: f64,
}

impl<'a> SiteExpander<'a> {
    pub fn new(basis: &'a LatticeBasis, depth: u32, tolerance: f64) -> Self {
        Self {
            basis,
            depth: depth.min(MAX_EXPANSION_DEPTH),
            tolerance,
            atom_scale: EngineConfig::default().atom_scale,
        }
    }

    pub fn with_atom_scale(mut self, atom_scale: f64) -> Self {
        self.atom_scale = atom_scale;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Inclusive per-axis (min, max) a replica must fall within.
    ///
    /// Axis-aligned bounds of the `depth`-scaled cell widened by the
    /// tolerance. For orthogonal cells this is `[-ε, depth·len + ε]`.
    pub fn envelope(&self) -> (Vec3, Vec3) {
        let n = self.depth;
        let corners = parallelepiped_corners(&self.basis.scaled([n, n, n]));
        let (min, max) = bounding_box(&corners).unwrap_or(([0.0; 3], [0.0; 3]));
        let eps = self.tolerance;
        (
            [min[0] - eps, min[1] - eps, min[2] - eps],
            [max[0] + eps, max[1] + eps, max[2] + eps],
        )
    }

    pub fn expand(&self, sites: &[Site]) -> (Vec<Atom>, Vec<GeometryWarning>) {
        let mut sink = WarningSink::default();
        let atoms = self.expand_into(sites, &mut sink);
        (atoms, sink.into_vec())
    }

    pub(crate) fn expand_into(&self, sites: &[Site], sink: &mut WarningSink) -> Vec<Atom> {
        if sites.is_empty() {
            sink.push(GeometryWarning::EmptyStructure);
            return Vec::new();
        }

        let (lo, hi) = self.envelope();
        let inside = |p: &Vec3| (0..3).all(|k| p[k] >= lo[k] && p[k] <= hi[k]);

        let n = self.depth;
        let capacity = (n as usize + 1)
            .checked_pow(3)
            .and_then(|per_site| per_site.checked_mul(sites.len()))
            .unwrap_or(0);
        let mut atoms = Vec::with_capacity(capacity);
        let mut unknown: HashSet<&str> = HashSet::new();

        for (site_index, site) in sites.iter().enumerate() {
            if site.frac_coords.iter().any(|v| !v.is_finite()) {
                sink.push(GeometryWarning::NonFiniteCoordinates { site_index });
                continue;
            }
            if !(0.0..=1.0).contains(&site.occupancy) {
                sink.push(GeometryWarning::OccupancyOutOfRange {
                    site_index,
                    occupancy: site.occupancy,
                });
            }

            let element = match elements::lookup_species(&site.species) {
                Some(e) => e,
                None => {
                    if unknown.insert(site.species.as_str()) {
                        sink.push(GeometryWarning::UnknownElement {
                            species: site.species.clone(),
                        });
                    }
                    &FALLBACK_ELEMENT
                }
            };

            let f = site.frac_coords;
            for i in 0..=n {
                for j in 0..=n {
                    for k in 0..=n {
                        let frac = [f[0] + i as f64, f[1] + j as f64, f[2] + k as f64];
                        let position = self.basis.frac_to_cart(frac);
                        if !inside(&position) {
                            continue;
                        }

                        atoms.push(Atom {
                            position,
                            frac_position: frac,
                            element: element.symbol,
                            species: site.species.clone(),
                            radius: element.covalent_radius * self.atom_scale,
                            covalent_radius: element.covalent_radius,
                            color: element.color,
                            occupancy: site.occupancy,
                            site_index,
                            translation: [i, j, k],
                            is_image: (i, j, k) != (0, 0, 0),
                        });
                    }
                }
            }
        }

        log::debug!(
            "Expanded {} sites into {} atoms (depth {})",
            sites.len(),
            atoms.len(),
            n
        );
        atoms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(a: f64) -> LatticeBasis {
        LatticeBasis::from_parameters(&Lattice::cubic(a)).unwrap()
    }

    #[test]
    fn test_origin_site_fills_grid() {
        let basis = cubic(4.0);
        for n in 0..=3u32 {
            let expander = SiteExpander::new(&basis, n, 0.01);
            let (atoms, warnings) = expander.expand(&[Site::new("Na", [0.0, 0.0, 0.0])]);
            assert!(warnings.is_empty());
            assert_eq!(atoms.len(), ((n + 1) * (n + 1) * (n + 1)) as usize);

            let (lo, hi) = expander.envelope();
            for atom in &atoms {
                for k in 0..3 {
                    assert!(atom.position[k] >= lo[k] && atom.position[k] <= hi[k]);
                }
            }
        }
    }

    #[test]
    fn test_replicas_past_the_boundary_are_dropped() {
        let basis = cubic(5.431);
        let expander = SiteExpander::new(&basis, 2, 0.01);
        let (atoms, _) = expander.expand(&[
            Site::new("Si", [0.0, 0.0, 0.0]),
            Site::new("Si", [0.25, 0.25, 0.25]),
        ]);
        // 27 corner images, inner site only for translations 0..=1
        assert_eq!(atoms.iter().filter(|a| a.site_index == 0).count(), 27);
        assert_eq!(atoms.iter().filter(|a| a.site_index == 1).count(), 8);
        assert_eq!(atoms.len(), 35);
    }

    #[test]
    fn test_base_cell_atom_is_not_image() {
        let basis = cubic(3.0);
        let (atoms, _) = SiteExpander::new(&basis, 1, 0.01).expand(&[Site::new("Fe", [0.5, 0.5, 0.5])]);
        assert_eq!(atoms.len(), 1);
        assert!(!atoms[0].is_image);
        assert_eq!(atoms[0].translation, [0, 0, 0]);
        for k in 0..3 {
            assert!((atoms[0].position[k] - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_sites_warns() {
        let basis = cubic(3.0);
        let (atoms, warnings) = SiteExpander::new(&basis, 2, 0.01).expand(&[]);
        assert!(atoms.is_empty());
        assert_eq!(warnings, vec![GeometryWarning::EmptyStructure]);
    }

    #[test]
    fn test_unknown_species_falls_back_once() {
        let basis = cubic(3.0);
        let sites = [Site::new("Xx", [0.0, 0.0, 0.0]), Site::new("Xx", [0.5, 0.5, 0.5])];
        let (atoms, warnings) = SiteExpander::new(&basis, 0, 0.01)
            .with_atom_scale(1.0)
            .expand(&sites);

        assert_eq!(
            warnings,
            vec![GeometryWarning::UnknownElement {
                species: "Xx".into()
            }]
        );
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].element, "X");
        assert_eq!(atoms[0].color, FALLBACK_ELEMENT.color);
        assert_eq!(atoms[0].radius, FALLBACK_ELEMENT.covalent_radius);
    }

    #[test]
    fn test_decorated_species_resolve() {
        let basis = cubic(3.0);
        let (atoms, warnings) =
            SiteExpander::new(&basis, 0, 0.01).expand(&[Site::new("Fe2+", [0.0, 0.0, 0.0])]);
        assert!(warnings.is_empty());
        assert_eq!(atoms[0].element, "Fe");
        assert_eq!(atoms[0].species, "Fe2+");
    }

    #[test]
    fn test_non_finite_site_skipped() {
        let basis = cubic(3.0);
        let sites = [
            Site::new("O", [f64::NAN, 0.0, 0.0]),
            Site::new("O", [0.0, 0.0, 0.0]),
        ];
        let (atoms, warnings) = SiteExpander::new(&basis, 0, 0.01).expand(&sites);
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].site_index, 1);
        assert_eq!(warnings, vec![GeometryWarning::NonFiniteCoordinates { site_index: 0 }]);
    }

    #[test]
    fn test_hexagonal_envelope_has_negative_x() {
        let basis = LatticeBasis::from_parameters(&Lattice::new(3.0, 3.0, 5.0, 90.0, 90.0, 120.0)).unwrap();
        let expander = SiteExpander::new(&basis, 1, 0.01);
        let (lo, hi) = expander.envelope();
        assert!((lo[0] - (-1.5 - 0.01)).abs() < 1e-9);
        assert!((hi[0] - (3.0 + 0.01)).abs() < 1e-9);

        // b-translated origin sits at x = -1.5 and must survive
        let (atoms, _) = expander.expand(&[Site::new("C", [0.0, 0.0, 0.0])]);
        assert_eq!(atoms.len(), 8);
    }

    #[test]
    fn test_policy_depth() {
        let policy = ExpansionPolicy::default();
        assert_eq!(policy.depth(&Lattice::cubic(5.431)), 2);
        assert_eq!(policy.depth(&Lattice::cubic(10.0)), 1);
        assert_eq!(ExpansionPolicy::fixed(3, 0.01).depth(&Lattice::cubic(1.0)), 3);
    }

    #[test]
    fn test_depth_is_clamped() {
        let policy = ExpansionPolicy::fixed(3_000_000, 0.01);
        assert_eq!(policy.depth(&Lattice::cubic(5.0)), MAX_EXPANSION_DEPTH);

        let basis = cubic(2.0);
        let expander = SiteExpander::new(&basis, u32::MAX, 0.01);
        assert_eq!(expander.depth(), MAX_EXPANSION_DEPTH);
        let (atoms, _) = expander.expand(&[Site::new("H", [0.0, 0.0, 0.0])]);
        assert_eq!(atoms.len(), 17 * 17 * 17);
    }

    #[test]
    fn test_occupancy_out_of_range_is_carried() {
        let basis = cubic(3.0);
        let mut site = Site::new("Fe", [0.5, 0.5, 0.5]);
        site.occupancy = 1.5;
        let (atoms, warnings) = SiteExpander::new(&basis, 1, 0.01).expand(&[site]);

        assert_eq!(
            warnings,
            vec![GeometryWarning::OccupancyOutOfRange {
                site_index: 0,
                occupancy: 1.5
            }]
        );
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].occupancy, 1.5);
        assert_eq!(atoms[0].element, "Fe");
    }
}
