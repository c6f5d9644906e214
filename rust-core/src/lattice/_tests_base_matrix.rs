#[cfg(test)]
mod _tests_base_matrix {
    use super::super::base_matrix::LatticeMatrix;
    use super::super::lattice_construction::{
        face_centered_cubic_lattice, orthorhombic_lattice, scale_lattice, simple_cubic_lattice, transform_lattice,
        triclinic_lattice,
    };
    use crate::errors::ErrorKind;
    use crate::interfaces::{ReciprocalConvention, Space};
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};
    use std::f64::consts::PI;

    const TOL: f64 = 1e-10;

    // a_i · b_j for every pair, as a matrix
    fn duality_matrix(direct: &LatticeMatrix, reciprocal: &LatticeMatrix) -> Matrix3<f64> {
        direct.base_matrix() * reciprocal.base_matrix().transpose()
    }

    #[test]
    fn test_simple_cubic_reciprocal_two_pi() {
        let direct = simple_cubic_lattice(2.0).unwrap();
        let reciprocal = direct.reciprocal(ReciprocalConvention::TwoPi).unwrap();

        assert_eq!(reciprocal.space(), Space::Reciprocal);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { PI } else { 0.0 };
                assert_relative_eq!(reciprocal.base_matrix()[(i, j)], expected, epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_duality_relation_triclinic() {
        let direct = triclinic_lattice(1.0, 1.3, 1.7, 1.2, 1.4, 1.9).unwrap();

        let reciprocal = direct.reciprocal(ReciprocalConvention::TwoPi).unwrap();
        let product = duality_matrix(&direct, &reciprocal);
        assert!(
            (product - 2.0 * PI * Matrix3::identity()).abs().max() < 1e-9,
            "a_i·b_j should be 2π·δ_ij, got {}",
            product
        );

        let unit = direct.reciprocal(ReciprocalConvention::Unit).unwrap();
        let product = duality_matrix(&direct, &unit);
        assert!(
            (product - Matrix3::identity()).abs().max() < 1e-9,
            "a_i·b_j should be δ_ij, got {}",
            product
        );
    }

    #[test]
    fn test_reciprocal_of_reciprocal_is_direct() {
        let direct = face_centered_cubic_lattice(3.5).unwrap();
        let back = direct
            .reciprocal(ReciprocalConvention::TwoPi)
            .and_then(|reciprocal| reciprocal.reciprocal(ReciprocalConvention::TwoPi))
            .unwrap();

        assert_eq!(back.space(), Space::Real);
        assert!((back.base_matrix() - direct.base_matrix()).abs().max() < 1e-12);
    }

    #[test]
    fn test_reciprocal_volume() {
        let direct = orthorhombic_lattice(1.0, 2.0, 4.0).unwrap();
        let reciprocal = direct.reciprocal(ReciprocalConvention::TwoPi).unwrap();
        assert_relative_eq!(reciprocal.volume(), (2.0 * PI).powi(3) / 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_identical_rows_rejected() {
        let result = LatticeMatrix::from_rows(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Space::Real,
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::DegenerateLattice);
    }

    #[test]
    fn test_coplanar_rows_rejected() {
        let result = LatticeMatrix::from_array(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            Space::Real,
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::DegenerateLattice);
    }

    #[test]
    fn test_zero_and_non_finite_rows_rejected() {
        let zero = LatticeMatrix::from_matrix(Matrix3::zeros(), Space::Real);
        assert_eq!(zero.unwrap_err().kind(), ErrorKind::DegenerateLattice);

        let nan = LatticeMatrix::from_array(
            [[f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            Space::Real,
        );
        assert_eq!(nan.unwrap_err().kind(), ErrorKind::DegenerateLattice);
    }

    #[test]
    fn test_tiny_lattice_accepted() {
        let direct = scale_lattice(&simple_cubic_lattice(1.0).unwrap(), 1e-12).unwrap();
        let reciprocal = direct.reciprocal(ReciprocalConvention::TwoPi).unwrap();
        assert_relative_eq!(reciprocal.base_matrix()[(0, 0)], 2.0 * PI * 1e12, max_relative = 1e-12);
    }

    #[test]
    fn test_nearly_flat_lattice_rejected() {
        // Third vector tilted 1e-10 rad out of the plane of the first two
        let result = LatticeMatrix::from_array(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 1e-10]],
            Space::Real,
        );
        assert!(result.is_err(), "normalized determinant 1e-10 must be rejected");
    }

    #[test]
    fn test_plane_spacings_and_frac_to_cart() {
        let lattice = orthorhombic_lattice(1.0, 2.0, 3.0).unwrap();
        let spacings = lattice.plane_spacings();
        assert_relative_eq!(spacings[0], 1.0, epsilon = TOL);
        assert_relative_eq!(spacings[1], 2.0, epsilon = TOL);
        assert_relative_eq!(spacings[2], 3.0, epsilon = TOL);

        let cart = lattice.frac_to_cart(Vector3::new(0.5, 0.5, 1.0));
        assert_relative_eq!(cart, Vector3::new(0.5, 1.0, 3.0), epsilon = TOL);
    }

    #[test]
    fn test_rotation_keeps_volume_and_reciprocal_duality() {
        let lattice = orthorhombic_lattice(1.0, 2.0, 3.0).unwrap();
        let angle = PI / 6.0;
        let rotation = Matrix3::new(
            angle.cos(), -angle.sin(), 0.0,
            angle.sin(), angle.cos(), 0.0,
            0.0, 0.0, 1.0,
        );
        let rotated = transform_lattice(&lattice, &rotation).unwrap();

        assert_relative_eq!(rotated.volume(), 6.0, epsilon = 1e-12);
        let [v1, _, _] = rotated.base_vectors();
        assert_relative_eq!(v1, Vector3::new(angle.cos(), angle.sin(), 0.0), epsilon = 1e-12);

        let reciprocal = rotated.reciprocal(ReciprocalConvention::TwoPi).unwrap();
        let product = duality_matrix(&rotated, &reciprocal);
        assert!((product - 2.0 * PI * Matrix3::identity()).abs().max() < 1e-9);
    }
}
