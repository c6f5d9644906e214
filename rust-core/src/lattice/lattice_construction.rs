use nalgebra::{Matrix3, Vector3};

use crate::errors::BrillouinZoneError;
use crate::interfaces::Space;
use crate::lattice::base_matrix::LatticeMatrix;

// Standard lattice construction utilities for common 3D lattices (primitive cells, rows are vectors)

/// Create a simple cubic lattice with given lattice parameter
pub fn simple_cubic_lattice(a: f64) -> Result<LatticeMatrix, BrillouinZoneError> {
    let direct = Matrix3::new(
        a, 0.0, 0.0,
        0.0, a, 0.0,
        0.0, 0.0, a,
    );
    LatticeMatrix::from_matrix(direct, Space::Real)
}

/// Create the primitive cell of a body-centered cubic lattice
pub fn body_centered_cubic_lattice(a: f64) -> Result<LatticeMatrix, BrillouinZoneError> {
    let h = a / 2.0;
    let direct = Matrix3::new(
        -h, h, h,
        h, -h, h,
        h, h, -h,
    );
    LatticeMatrix::from_matrix(direct, Space::Real)
}

/// Create the primitive cell of a face-centered cubic lattice
pub fn face_centered_cubic_lattice(a: f64) -> Result<LatticeMatrix, BrillouinZoneError> {
    let h = a / 2.0;
    let direct = Matrix3::new(
        0.0, h, h,
        h, 0.0, h,
        h, h, 0.0,
    );
    LatticeMatrix::from_matrix(direct, Space::Real)
}

/// Create a hexagonal lattice with in-plane parameter a and height c
pub fn hexagonal_lattice(a: f64, c: f64) -> Result<LatticeMatrix, BrillouinZoneError> {
    let direct = Matrix3::new(
        a, 0.0, 0.0,
        -a / 2.0, a * 3.0_f64.sqrt() / 2.0, 0.0,
        0.0, 0.0, c,
    );
    LatticeMatrix::from_matrix(direct, Space::Real)
}

/// Create a tetragonal lattice
pub fn tetragonal_lattice(a: f64, c: f64) -> Result<LatticeMatrix, BrillouinZoneError> {
    orthorhombic_lattice(a, a, c)
}

/// Create an orthorhombic lattice
pub fn orthorhombic_lattice(a: f64, b: f64, c: f64) -> Result<LatticeMatrix, BrillouinZoneError> {
    let direct = Matrix3::new(
        a, 0.0, 0.0,
        0.0, b, 0.0,
        0.0, 0.0, c,
    );
    LatticeMatrix::from_matrix(direct, Space::Real)
}

/// Create a triclinic lattice from lengths and angles (radians)
pub fn triclinic_lattice(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<LatticeMatrix, BrillouinZoneError> {
    let cx = c * beta.cos();
    let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    let cz_squared = c * c - cx * cx - cy * cy;
    if cz_squared <= 0.0 {
        return Err(BrillouinZoneError::degenerate_lattice(format!(
            "Angles ({alpha}, {beta}, {gamma}) do not describe a 3D cell."
        )));
    }
    LatticeMatrix::from_rows(
        Vector3::new(a, 0.0, 0.0),
        Vector3::new(b * gamma.cos(), b * gamma.sin(), 0.0),
        Vector3::new(cx, cy, cz_squared.sqrt()),
        Space::Real,
    )
}

// Utility functions for lattice transformations

/// Scale a lattice uniformly
pub fn scale_lattice(lattice: &LatticeMatrix, scale: f64) -> Result<LatticeMatrix, BrillouinZoneError> {
    LatticeMatrix::from_matrix(lattice.base_matrix() * scale, lattice.space())
}

/// Apply a linear transformation to every lattice vector (v ↦ M·v)
pub fn transform_lattice(
    lattice: &LatticeMatrix,
    transformation: &Matrix3<f64>,
) -> Result<LatticeMatrix, BrillouinZoneError> {
    LatticeMatrix::from_matrix(lattice.base_matrix() * transformation.transpose(), lattice.space())
}
