// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

pub type Vec3 = [f64; 3];

/// Row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]] as an nalgebra matrix
fn row_matrix(lattice: &[Vec3; 3]) -> Matrix3<f64> {
  Matrix3::from_row_slice(&[
    lattice[0][0],
    lattice[0][1],
    lattice[0][2],
    lattice[1][0],
    lattice[1][1],
    lattice[1][2],
    lattice[2][0],
    lattice[2][1],
    lattice[2][2],
  ])
}

/// Convert fractional coordinates to Cartesian using lattice matrix
///
/// # Arguments
/// * `frac` - Fractional coordinates, any range (images outside [0, 1) are fine)
/// * `lattice` - Lattice vectors as row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]]
///
/// # Formula
/// ```text
/// Cartesian = x·a + y·b + z·c
/// ```
pub fn frac_to_cart(frac: Vec3, lattice: &[Vec3; 3]) -> Vec3 {
  let [a, b, c] = lattice;
  [
    frac[0] * a[0] + frac[1] * b[0] + frac[2] * c[0],
    frac[0] * a[1] + frac[1] * b[1] + frac[2] * c[1],
    frac[0] * a[2] + frac[1] * b[2] + frac[2] * c[2],
  ]
}

/// Convert Cartesian coordinates to fractional using lattice matrix
///
/// # Returns
/// Fractional coordinates [x, y, z] or None if lattice is singular
///
/// # Formula
/// ```text
/// Fractional = (Lattice^T)^-1 × Cartesian
/// ```
pub fn cart_to_frac(cart: Vec3, lattice: &[Vec3; 3]) -> Option<Vec3> {
  let inv_lat = row_matrix(lattice).transpose().try_inverse()?;
  let frac_vec = inv_lat * Vector3::from(cart);
  Some([frac_vec.x, frac_vec.y, frac_vec.z])
}

/// Scalar triple product a · (b × c), the signed cell volume
pub fn triple_product(lattice: &[Vec3; 3]) -> f64 {
  let a = Vector3::from(lattice[0]);
  let b = Vector3::from(lattice[1]);
  let c = Vector3::from(lattice[2]);
  a.dot(&b.cross(&c))
}

/// The 8 corners of the parallelepiped spanned by the rows, indexed as
/// 4·i + 2·j + k for coefficients (i, j, k) in {0, 1}³
pub fn parallelepiped_corners(lattice: &[Vec3; 3]) -> [Vec3; 8] {
  let mut corners = [[0.0; 3]; 8];
  for x in 0..=1 {
    for y in 0..=1 {
      for z in 0..=1 {
        corners[x * 4 + y * 2 + z] = frac_to_cart([x as f64, y as f64, z as f64], lattice);
      }
    }
  }
  corners
}

pub fn norm(v: Vec3) -> f64 {
  (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

pub fn scale(v: Vec3, s: f64) -> Vec3 {
  [v[0] * s, v[1] * s, v[2] * s]
}
