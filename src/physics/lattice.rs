// src/physics/lattice.rs

use crate::model::structure::Lattice;
use crate::utils::linalg::{self, Vec3};
use serde::Serialize;
use thiserror::Error;

/// |sin γ| below this leaves the c-vector undefined
pub const SIN_EPSILON: f64 = 1e-10;

/// Cells whose volume is at or below this fraction of |a|·|b|·|c| are
/// treated as collapsed
const MIN_VOLUME_RATIO: f64 = 1e-12;

// --- 1. ERROR HANDLING ---

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    /// γ is 0° or 180° (mod 180°); `b` is collinear with `a`.
    #[error("degenerate lattice: sin(gamma) vanishes for gamma = {gamma}°")]
    Degenerate { gamma: f64 },

    #[error("invalid lattice: {0}")]
    Invalid(#[from] InvalidLattice),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidLattice {
    #[error("length {axis} must be positive and finite, got {value}")]
    NonPositiveLength { axis: &'static str, value: f64 },

    #[error("angle {name} must lie strictly between 0° and 180°, got {value}")]
    AngleOutOfRange { name: &'static str, value: f64 },

    #[error("angles alpha = {alpha}°, beta = {beta}°, gamma = {gamma}° cannot close a cell")]
    InconsistentAngles { alpha: f64, beta: f64, gamma: f64 },

    #[error("cell volume must be positive and finite, got {0}")]
    NonPositiveVolume(f64),
}

// --- 2. BASIS ---

/// Cartesian basis of a valid lattice, rows are `a`, `b`, `c`.
///
/// Standard crystallographic setting: `a` along x, `b` in the xy-plane.
/// A `LatticeBasis` always has a positive, finite volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LatticeBasis {
    vectors: [Vec3; 3],
}

impl LatticeBasis {
    /// Builds the basis from the six lattice constants.
    ///
    /// # Formula
    /// ```text
    /// a = (a, 0, 0)
    /// b = (b cos γ, b sin γ, 0)
    /// c = (c cos β, c (cos α − cos β cos γ) / sin γ, c sqrt(1 − cos²β − ((cos α − cos β cos γ) / sin γ)²))
    /// ```
    pub fn from_parameters(lattice: &Lattice) -> Result<Self, LatticeError> {
        for (axis, value) in [("a", lattice.a), ("b", lattice.b), ("c", lattice.c)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidLattice::NonPositiveLength { axis, value }.into());
            }
        }

        let angles = [
            ("alpha", lattice.alpha),
            ("beta", lattice.beta),
            ("gamma", lattice.gamma),
        ];
        for (name, value) in angles {
            if !value.is_finite() {
                return Err(InvalidLattice::AngleOutOfRange { name, value }.into());
            }
        }

        let (sin_g, cos_g) = lattice.gamma.to_radians().sin_cos();
        if sin_g.abs() < SIN_EPSILON {
            return Err(LatticeError::Degenerate {
                gamma: lattice.gamma,
            });
        }

        for (name, value) in angles {
            if value <= 0.0 || value >= 180.0 {
                return Err(InvalidLattice::AngleOutOfRange { name, value }.into());
            }
        }

        let cos_a = lattice.alpha.to_radians().cos();
        let cos_b = lattice.beta.to_radians().cos();

        let cy_unit = (cos_a - cos_b * cos_g) / sin_g;
        let radicand = 1.0 - cos_b * cos_b - cy_unit * cy_unit;
        if radicand < 0.0 {
            return Err(InvalidLattice::InconsistentAngles {
                alpha: lattice.alpha,
                beta: lattice.beta,
                gamma: lattice.gamma,
            }
            .into());
        }

        let c = lattice.c;
        let vectors = [
            [lattice.a, 0.0, 0.0],
            [lattice.b * cos_g, lattice.b * sin_g, 0.0],
            [c * cos_b, c * cy_unit, c * radicand.sqrt()],
        ];

        Self::from_vectors(vectors)
    }

    /// Wraps explicit row vectors, rejecting left-handed or collapsed cells.
    pub fn from_vectors(vectors: [Vec3; 3]) -> Result<Self, LatticeError> {
        let volume = linalg::triple_product(&vectors);
        let scale: f64 = vectors.iter().map(|v| linalg::norm(*v)).product();
        if !(volume.is_finite() && volume > MIN_VOLUME_RATIO * scale) {
            return Err(InvalidLattice::NonPositiveVolume(volume).into());
        }
        Ok(Self { vectors })
    }

    /// Rows are the basis vectors
    pub fn matrix(&self) -> [Vec3; 3] {
        self.vectors
    }

    /// Triple product of the basis vectors (Å³)
    pub fn volume(&self) -> f64 {
        linalg::triple_product(&self.vectors)
    }

    /// Norms of `a`, `b`, `c`
    pub fn lengths(&self) -> Vec3 {
        [
            linalg::norm(self.vectors[0]),
            linalg::norm(self.vectors[1]),
            linalg::norm(self.vectors[2]),
        ]
    }

    pub fn frac_to_cart(&self, frac: Vec3) -> Vec3 {
        linalg::frac_to_cart(frac, &self.vectors)
    }

    pub fn cart_to_frac(&self, cart: Vec3) -> Option<Vec3> {
        linalg::cart_to_frac(cart, &self.vectors)
    }

    /// Same cell repeated `n[k]` times along each axis
    pub fn scaled(&self, n: [u32; 3]) -> [Vec3; 3] {
        [
            linalg::scale(self.vectors[0], n[0] as f64),
            linalg::scale(self.vectors[1], n[1] as f64),
            linalg::scale(self.vectors[2], n[2] as f64),
        ]
    }
}

/// Closed-form cell volume from the six constants, no basis needed
pub fn analytic_volume(lattice: &Lattice) -> f64 {
    let ca = lattice.alpha.to_radians().cos();
    let cb = lattice.beta.to_radians().cos();
    let cg = lattice.gamma.to_radians().cos();
    let v = (1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg).max(0.0);
    lattice.a * lattice.b * lattice.c * v.sqrt()
}
