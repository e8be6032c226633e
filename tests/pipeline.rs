//! End-to-end runs over the sample structure records in `fixtures/`.

use approx::assert_relative_eq;
use cview_geometry::physics::bonds::{cell_list_bonds, naive_bonds, parallel_bonds, BondCriteria};
use cview_geometry::physics::lattice::analytic_volume;
use cview_geometry::{
    calculate_scene, BondSearch, EngineConfig, GeometryWarning, Lattice, LatticeBasis,
    LatticeError, RenderModel, Site, Structure,
};

const SILICON: &str = include_str!("../fixtures/silicon.json");
const NACL: &str = include_str!("../fixtures/nacl.json");
const FEO: &str = include_str!("../fixtures/feo.json");
const ZNO: &str = include_str!("../fixtures/zno_wurtzite.json");

fn model(json: &str) -> RenderModel {
    let structure = Structure::from_json(json).expect("fixture parses");
    calculate_scene(&structure, &EngineConfig::default()).expect("fixture has a valid lattice")
}

#[test]
fn silicon_end_to_end() {
    let m = model(SILICON);

    let expected = [[5.431, 0.0, 0.0], [0.0, 5.431, 0.0], [0.0, 0.0, 5.431]];
    for (row, exp) in m.basis.matrix().iter().zip(expected.iter()) {
        for k in 0..3 {
            assert_relative_eq!(row[k], exp[k], epsilon = 1e-12);
        }
    }

    // Depth 2: 27 corner images plus 8 inner ones, each inner atom bonded
    // to the corner atom of its own cell
    assert_eq!(m.expansion, 2);
    assert_eq!(m.atoms.len(), 35);
    assert_eq!(m.bonds.len(), 8);
    for bond in &m.bonds {
        assert_relative_eq!(bond.length, 5.431 * 0.25 * 3f64.sqrt(), max_relative = 1e-9);
        let (i, j) = bond.atoms;
        assert_ne!(m.atoms[i].site_index, m.atoms[j].site_index);
        assert_eq!(m.atoms[i].translation, m.atoms[j].translation);
    }

    // The two base atoms
    let base: Vec<_> = m.atoms.iter().filter(|a| !a.is_image).collect();
    assert_eq!(base.len(), 2);
    let d = cview_geometry::utils::geometry::calculate_distance(base[0].position, base[1].position);
    assert_relative_eq!(d, 2.3517, epsilon = 1e-4);

    assert!(m.warnings.is_empty());
    assert_relative_eq!(m.framing.extent, 2.0 * 5.431 * 1.5, max_relative = 1e-12);
}

#[test]
fn rock_salt_fixtures_have_no_bonds_under_hard_cutoff() {
    for json in [NACL, FEO] {
        let m = model(json);
        assert_eq!(m.atoms.len(), 35);
        // Nearest cation-anion distance here is half the body diagonal (> 3 Å)
        assert!(m.bonds.is_empty());
    }
}

#[test]
fn feo_supplied_volume_is_flagged() {
    let m = model(FEO);
    match m.warnings.as_slice() {
        [GeometryWarning::VolumeMismatch { supplied, computed }] => {
            assert_eq!(*supplied, 80.15);
            assert_relative_eq!(*computed, 4.31f64.powi(3), max_relative = 1e-12);
        }
        other => panic!("unexpected warnings: {:?}", other),
    }
}

#[test]
fn wurtzite_bonds_are_all_zn_o() {
    let m = model(ZNO);
    assert_eq!(m.expansion, 2);
    assert_eq!(m.atoms.len(), 50);
    assert_eq!(m.bonds.len(), 70);
    for bond in &m.bonds {
        let (i, j) = bond.atoms;
        let mut pair = [m.atoms[i].element, m.atoms[j].element];
        pair.sort();
        assert_eq!(pair, ["O", "Zn"]);
        assert!(bond.length > 1.95 && bond.length < 2.0, "length {}", bond.length);
    }
}

#[test]
fn bond_strategies_agree_on_fixtures() {
    let criteria = BondCriteria::default();
    for json in [SILICON, NACL, FEO, ZNO] {
        let atoms = model(json).atoms;
        let reference = naive_bonds(&atoms, &criteria);
        assert_eq!(parallel_bonds(&atoms, &criteria), reference);
        assert_eq!(cell_list_bonds(&atoms, &criteria), reference);
    }
}

#[test]
fn bond_search_setting_does_not_change_the_model() {
    let structure = Structure::from_json(ZNO).unwrap();
    let reference = calculate_scene(&structure, &EngineConfig::default()).unwrap();
    for bond_search in [BondSearch::Naive, BondSearch::Parallel, BondSearch::CellList] {
        let config = EngineConfig {
            bond_search,
            ..Default::default()
        };
        assert_eq!(calculate_scene(&structure, &config).unwrap(), reference);
    }
}

#[test]
fn large_cell_uses_default_expansion() {
    let structure = Structure::new(
        Lattice::new(8.0, 9.0, 10.0, 90.0, 90.0, 90.0),
        vec![Site::new("C", [0.0, 0.0, 0.0])],
    );
    let m = calculate_scene(&structure, &EngineConfig::default()).unwrap();
    assert_eq!(m.expansion, 1);
    assert_eq!(m.atoms.len(), 8);
}

#[test]
fn triple_product_reproduces_volume() {
    let lattices = [
        Lattice::new(5.2, 6.1, 7.3, 80.0, 95.0, 110.0),
        Lattice::new(3.25, 3.25, 5.21, 90.0, 90.0, 120.0),
        Lattice::new(4.9, 4.9, 4.9, 70.0, 70.0, 70.0),
    ];
    for lattice in lattices {
        let volume = analytic_volume(&lattice);
        let structure = Structure::new(lattice.with_volume(volume), vec![]);
        let m = calculate_scene(&structure, &EngineConfig::default()).unwrap();
        assert_relative_eq!(m.basis.volume(), volume, max_relative = 1e-6);
        // only the empty-structure warning, no volume drift
        assert_eq!(m.warnings, vec![GeometryWarning::EmptyStructure]);
    }
}

#[test]
fn lattice_errors_abort_the_pipeline() {
    let sites = vec![Site::new("Si", [0.0, 0.0, 0.0])];

    let straight = Structure::new(Lattice::new(3.0, 3.0, 3.0, 90.0, 90.0, 180.0), sites.clone());
    assert!(matches!(
        calculate_scene(&straight, &EngineConfig::default()),
        Err(LatticeError::Degenerate { .. })
    ));

    let impossible = Structure::new(Lattice::new(3.0, 3.0, 3.0, 170.0, 20.0, 20.0), sites);
    assert!(matches!(
        calculate_scene(&impossible, &EngineConfig::default()),
        Err(LatticeError::Invalid(_))
    ));
    assert!(LatticeBasis::from_parameters(&impossible.lattice).is_err());
}

#[test]
fn render_model_serializes() {
    let value = serde_json::to_value(model(SILICON)).unwrap();
    assert_eq!(value["atoms"].as_array().unwrap().len(), 35);
    assert_eq!(value["bonds"].as_array().unwrap().len(), 8);
    assert_eq!(value["unit_cell"]["vertices"].as_array().unwrap().len(), 8);
    assert_eq!(value["unit_cell"]["edges"].as_array().unwrap().len(), 12);
    assert_eq!(value["atoms"][0]["element"], "Si");
    assert!(value["framing"]["extent"].as_f64().unwrap() >= 10.0);
}
