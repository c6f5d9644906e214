#[cfg(test)]
mod _tests_assembler {
    use super::super::assembler::*;
    use crate::config::BrillouinZoneConfig;
    use crate::errors::ErrorKind;
    use crate::interfaces::{EdgeMode, ReciprocalConvention};
    use crate::lattice::lattice_construction::{hexagonal_lattice, simple_cubic_lattice};
    use crate::symmetries::high_symmetry_points::{HighSymmetryData, GAMMA};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::collections::BTreeSet;
    use std::f64::consts::PI;

    fn cubic_annotations() -> HighSymmetryData {
        HighSymmetryData::new()
            .with_point(GAMMA, Vector3::zeros())
            .with_point("X", Vector3::new(0.0, 0.5, 0.0))
            .with_point("R", Vector3::new(0.5, 0.5, 0.5))
            .with_segment(GAMMA, "X")
            .with_segment("X", "R")
    }

    #[test]
    fn test_assemble_is_pure_aggregation() {
        let reciprocal = simple_cubic_lattice(1.0)
            .unwrap()
            .reciprocal(ReciprocalConvention::TwoPi)
            .unwrap();
        let vertices = vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)];
        let edges: BTreeSet<(usize, usize)> = [(0, 1)].into_iter().collect();

        let zone = BrillouinZone::assemble(vertices.clone(), edges.clone(), &reciprocal, cubic_annotations());
        assert_eq!(zone.vertices(), vertices.as_slice());
        assert_eq!(zone.edges(), &edges);
        assert_eq!(zone.kpoints().len(), 3);
        assert_eq!(zone.path().len(), 2);
        assert_eq!(zone.reciprocal_lattice(), reciprocal.base_matrix());
        assert_eq!(zone.volume(), 0.0);
    }

    #[test]
    fn test_simple_cubic_zone() {
        let lattice = simple_cubic_lattice(1.0).unwrap();
        let config = BrillouinZoneConfig::default().with_edges(EdgeMode::Polygonal);
        let zone = compute_brillouin_zone(&lattice, cubic_annotations(), &config).unwrap();

        assert_eq!(zone.vertices().len(), 8);
        assert_eq!(zone.edges().len(), 12);
        assert_eq!(zone.faces.len(), 6);
        assert_relative_eq!(zone.volume(), (2.0 * PI).powi(3), max_relative = 1e-9);
        assert_eq!(zone.kpoints(), &cubic_annotations().kpoints);
    }

    #[test]
    fn test_kpoints_cartesian_and_segments() {
        let lattice = simple_cubic_lattice(1.0).unwrap();
        let zone = compute_brillouin_zone(&lattice, cubic_annotations(), &BrillouinZoneConfig::default()).unwrap();

        let cartesian = zone.kpoints_cartesian();
        assert_relative_eq!(cartesian["R"], Vector3::new(PI, PI, PI), epsilon = 1e-9);

        let segments = zone.path_segments();
        assert_eq!(segments.len(), 2);
        assert_relative_eq!(segments[0].length(), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_contains_high_symmetry_points() {
        let lattice = simple_cubic_lattice(1.0).unwrap();
        let zone = compute_brillouin_zone(&lattice, cubic_annotations(), &BrillouinZoneConfig::default()).unwrap();

        // Zone-boundary points lie on the surface, Γ in the interior
        for (label, k_point) in zone.kpoints_cartesian() {
            assert!(zone.contains(k_point), "{} should lie in the zone", label);
        }
        assert!(!zone.contains(Vector3::new(0.0, 1.1 * PI, 0.0)));
    }

    #[test]
    fn test_hexagonal_prism() {
        let lattice = hexagonal_lattice(1.0, 1.633).unwrap();
        let config = BrillouinZoneConfig::default().with_edges(EdgeMode::Polygonal);
        let zone = compute_brillouin_zone(&lattice, HighSymmetryData::new(), &config).unwrap();

        assert_eq!(zone.vertices().len(), 12);
        assert_eq!(zone.edges().len(), 18);
        assert_eq!(zone.faces.len(), 8);
    }

    #[test]
    fn test_unit_convention_scales_zone() {
        let lattice = simple_cubic_lattice(1.0).unwrap();
        let config = BrillouinZoneConfig::default().with_convention(ReciprocalConvention::Unit);
        let zone = compute_brillouin_zone(&lattice, HighSymmetryData::new(), &config).unwrap();

        for vertex in zone.vertices() {
            assert!(vertex.iter().all(|c| (c.abs() - 0.5).abs() < 1e-9), "{:?}", vertex);
        }
    }

    #[test]
    fn test_degenerate_rows_propagate() {
        let result = compute_brillouin_zone_from_rows(
            [[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [0.0, 0.0, 1.0]],
            HighSymmetryData::new(),
            &BrillouinZoneConfig::default(),
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::DegenerateLattice);
    }

    #[test]
    fn test_tolerance_from_json_is_validated() {
        let lattice = simple_cubic_lattice(1.0).unwrap();
        for tolerance in ["0", "-1e-9", "1e-3", "1e300"] {
            let json = format!(r#"{{"edges": "polygonal", "tolerance": {}}}"#, tolerance);
            let config: BrillouinZoneConfig = serde_json::from_str(&json).unwrap();
            let error = compute_brillouin_zone(&lattice, cubic_annotations(), &config).unwrap_err();
            eprintln!("DEBUG: tolerance {} -> {}", tolerance, error);
            assert_eq!(error.kind(), ErrorKind::InvalidConfig);
        }

        let config: BrillouinZoneConfig = serde_json::from_str(r#"{"edges": "polygonal", "tolerance": 1e-6}"#).unwrap();
        let zone = compute_brillouin_zone(&lattice, cubic_annotations(), &config).unwrap();
        assert_eq!(zone.vertices().len(), 8);
        assert_eq!(zone.edges().len(), 12);
    }

    #[test]
    fn test_serialized_field_names() {
        let zone = compute_brillouin_zone_from_rows(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            cubic_annotations(),
            &BrillouinZoneConfig::default(),
        )
        .unwrap();
        let value = serde_json::to_value(&zone).unwrap();

        for field in ["vertices", "edges", "kpoints", "path", "reciprocal_lattice"] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(value["reciprocal_lattice"].as_array().unwrap().len(), 3);
        assert_eq!(value["vertices"][0].as_array().unwrap().len(), 3);
        assert_eq!(value["path"][0][0], GAMMA);

        let back: BrillouinZone = serde_json::from_value(value).unwrap();
        assert_eq!(back.edges(), zone.edges());
        assert_eq!(back.kpoints(), zone.kpoints());
    }
}
