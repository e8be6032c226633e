// src/rendering/unit_cell.rs

use crate::physics::lattice::LatticeBasis;
use crate::utils::geometry::bounding_box;
use crate::utils::linalg::{parallelepiped_corners, Vec3};
use serde::Serialize;

/// Wireframe of the parallelepiped spanned by the basis vectors.
///
/// Vertex `4·i + 2·j + k` is `i·a + j·b + k·c`. Edges join vertices whose
/// coefficients differ in exactly one place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnitCellOutline {
  pub vertices: [Vec3; 8],
  pub edges: [(usize, usize); 12],
}

const EDGES: [(usize, usize); 12] = {
  let mut edges = [(0, 0); 12];
  let mut n = 0;
  let mut v = 0;
  while v < 8 {
    let mut bit = 4;
    while bit > 0 {
      if v & bit == 0 {
        edges[n] = (v, v | bit);
        n += 1;
      }
      bit >>= 1;
    }
    v += 1;
  }
  edges
};

impl UnitCellOutline {
  pub fn new(basis: &LatticeBasis) -> Self {
    Self::from_vectors(&basis.matrix())
  }

  /// Outline of the cell repeated `n[k]` times along each axis
  pub fn scaled(basis: &LatticeBasis, n: [u32; 3]) -> Self {
    Self::from_vectors(&basis.scaled(n))
  }

  fn from_vectors(vectors: &[Vec3; 3]) -> Self {
    Self {
      vertices: parallelepiped_corners(vectors),
      edges: EDGES,
    }
  }

  /// Segment endpoints, one pair per edge
  pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
    self.edges
      .iter()
      .map(move |&(i, j)| (self.vertices[i], self.vertices[j]))
  }

  /// Axis-aligned (min, max) of the vertices
  pub fn bounds(&self) -> (Vec3, Vec3) {
    bounding_box(&self.vertices).unwrap_or(([0.0; 3], [0.0; 3]))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::structure::Lattice;

  #[test]
  fn test_edges_differ_in_one_coefficient() {
    let outline = UnitCellOutline::new(&LatticeBasis::from_parameters(&Lattice::cubic(2.0)).unwrap());
    assert_eq!(outline.edges.len(), 12);

    let mut seen = std::collections::HashSet::new();
    for &(i, j) in &outline.edges {
      assert!(i < j);
      assert_eq!((i ^ j).count_ones(), 1);
      assert!(seen.insert((i, j)));
    }

    // 3 edges leave the origin
    assert_eq!(outline.edges.iter().filter(|e| e.0 == 0).count(), 3);
    // every vertex has degree 3
    for v in 0..8 {
      let degree = outline.edges.iter().filter(|e| e.0 == v || e.1 == v).count();
      assert_eq!(degree, 3);
    }
  }

  #[test]
  fn test_vertices_are_basis_combinations() {
    let basis = LatticeBasis::from_parameters(&Lattice::new(3.0, 4.0, 5.0, 80.0, 95.0, 110.0)).unwrap();
    let outline = UnitCellOutline::new(&basis);
    let [a, b, c] = basis.matrix();

    assert_eq!(outline.vertices[0], [0.0, 0.0, 0.0]);
    let far: Vec3 = [a[0] + b[0] + c[0], a[1] + b[1] + c[1], a[2] + b[2] + c[2]];
    for k in 0..3 {
      assert!((outline.vertices[4][k] - a[k]).abs() < 1e-12);
      assert!((outline.vertices[2][k] - b[k]).abs() < 1e-12);
      assert!((outline.vertices[1][k] - c[k]).abs() < 1e-12);
      assert!((outline.vertices[7][k] - far[k]).abs() < 1e-12);
    }

    for (p, q) in outline.segments() {
      let len = crate::utils::geometry::calculate_distance(p, q);
      let expected = [3.0, 4.0, 5.0];
      assert!(expected.iter().any(|e| (len - e).abs() < 1e-9), "edge length {}", len);
    }
  }

  #[test]
  fn test_scaled_outline_bounds() {
    let basis = LatticeBasis::from_parameters(&Lattice::cubic(2.0)).unwrap();
    let (min, max) = UnitCellOutline::scaled(&basis, [2, 3, 1]).bounds();
    assert!(min.iter().all(|v| v.abs() < 1e-12));
    assert!((max[0] - 4.0).abs() < 1e-12);
    assert!((max[1] - 6.0).abs() < 1e-12);
    assert!((max[2] - 2.0).abs() < 1e-12);
  }
}
