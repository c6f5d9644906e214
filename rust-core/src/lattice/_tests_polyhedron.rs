#[cfg(test)]
mod tests_polyhedron {
    use super::super::convex_hull::ConvexHull;
    use super::super::polyhedron::Polyhedron;
    use crate::config::GEOMETRY_TOLERANCE;
    use crate::interfaces::EdgeMode;
    use nalgebra::Vector3;

    fn unit_cube_hull() -> ConvexHull {
        let mut points = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    points.push(Vector3::new(x, y, z));
                }
            }
        }
        ConvexHull::compute(&points, GEOMETRY_TOLERANCE).unwrap()
    }

    #[test]
    fn test_new() {
        let poly = Polyhedron::new();
        assert!(poly.vertices.is_empty());
        assert!(poly.edges.is_empty());
        assert!(poly.faces.is_empty());
        assert_eq!(poly.measure, 0.0);
    }

    #[test]
    fn test_default() {
        let poly = Polyhedron::default();
        assert!(poly.vertices.is_empty());
        assert_eq!(poly.measure(), 0.0);
    }

    #[test]
    fn test_from_hull_edge_modes() {
        let hull = unit_cube_hull();

        let triangulated = Polyhedron::from_hull(&hull, EdgeMode::Triangulated);
        assert_eq!(triangulated.vertices().len(), 8);
        assert_eq!(triangulated.edges().len(), 18);
        assert_eq!(triangulated.faces().len(), 6);
        assert!((triangulated.measure() - 1.0).abs() < 1e-12);

        let polygonal = Polyhedron::from_hull(&hull, EdgeMode::Polygonal);
        assert_eq!(polygonal.edges().len(), 12);
        assert_eq!(polygonal.faces(), triangulated.faces());
    }

    #[test]
    fn test_vertex_degrees() {
        let polygonal = Polyhedron::from_hull(&unit_cube_hull(), EdgeMode::Polygonal);
        assert_eq!(polygonal.vertex_degrees(), vec![3; 8]);

        let triangulated = Polyhedron::from_hull(&unit_cube_hull(), EdgeMode::Triangulated);
        let degrees = triangulated.vertex_degrees();
        assert!(degrees.iter().all(|&d| d >= 3), "{:?}", degrees);
        assert_eq!(degrees.iter().sum::<usize>(), 36);
    }

    #[test]
    fn test_from_hull_keeps_only_hull_vertices() {
        let mut points = vec![Vector3::new(0.5, 0.5, 0.5), Vector3::new(0.25, 0.75, 0.5)];
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    points.push(Vector3::new(x, y, z));
                }
            }
        }
        points.push(Vector3::new(1.0, 1.0, 1.0));
        let hull = ConvexHull::compute(&points, GEOMETRY_TOLERANCE).unwrap();
        assert_eq!(hull.points().len(), 11);

        for mode in [EdgeMode::Triangulated, EdgeMode::Polygonal] {
            let poly = Polyhedron::from_hull(&hull, mode);
            eprintln!("DEBUG: {:?} -> {} vertices, {} edges", mode, poly.vertices().len(), poly.edges().len());
            assert_eq!(poly.vertices().len(), 8);
            assert!(poly.vertices().iter().all(|v| (v - Vector3::new(0.5, 0.5, 0.5)).norm() > 0.1));
            assert!(poly.vertices().iter().all(|v| (v - Vector3::new(0.25, 0.75, 0.5)).norm() > 0.1));
            assert!(poly.edges().iter().all(|&(i, j)| i < j && j < 8));
            assert!(poly.faces().iter().flatten().all(|&i| i < 8));
            assert!(poly.vertex_degrees().iter().all(|&d| d >= 3));
            assert!((poly.measure() - 1.0).abs() < 1e-12);
        }

        let polygonal = Polyhedron::from_hull(&hull, EdgeMode::Polygonal);
        assert_eq!(polygonal.vertex_degrees(), vec![3; 8]);
        assert_eq!(polygonal.edges().len(), 12);
    }

    #[test]
    fn test_contains_unit_cube() {
        let poly = Polyhedron::from_hull(&unit_cube_hull(), EdgeMode::Polygonal);

        // Interior points
        assert!(poly.contains(Vector3::new(0.5, 0.5, 0.5)));
        assert!(poly.contains(Vector3::new(0.1, 0.9, 0.2)));

        // Boundary points
        assert!(poly.contains(Vector3::new(0.0, 0.5, 0.5)));
        assert!(poly.contains(Vector3::new(1.0, 1.0, 1.0)));

        // Exterior points
        assert!(!poly.contains(Vector3::new(1.5, 0.5, 0.5)));
        assert!(!poly.contains(Vector3::new(0.5, -0.1, 0.5)));
        assert!(!poly.contains(Vector3::new(0.5, 0.5, 1.0001)));
    }

    #[test]
    fn test_contains_empty_polyhedron() {
        let poly = Polyhedron::new();
        assert!(!poly.contains(Vector3::zeros()));
    }
}
