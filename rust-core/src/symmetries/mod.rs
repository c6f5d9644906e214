// Symmetries module: high-symmetry annotation of the Brillouin zone
// Points and paths come from an external k-path finder and are passed through

// ======================== MODULE DECLARATIONS ========================
pub mod high_symmetry_points;


// ======================== HIGH SYMMETRY POINTS & PATHS ========================
pub use high_symmetry_points::{
    HighSymmetryData, // struct - label → fractional k-point map plus the path legs
    PathSegment,      // struct - one path leg in Cartesian coordinates
    GAMMA,            // const - label of the zone center
};

// HighSymmetryData impl methods:
//   new() -> Self                                                    - creates empty data
//   with_point / add_point(label, position)                          - adds a labeled fractional point
//   with_segment / add_segment(start, end)                           - appends a path leg
//   get_point(&self, label: &str) -> Option<&Vector3<f64>>           - retrieves point by label
//   cartesian_points(&self, reciprocal) -> BTreeMap<String, Vector3> - fractional → Cartesian
//   path_segments(&self, reciprocal) -> Vec<PathSegment>             - Cartesian legs, unknown labels skipped
//   interpolate_path(&self, reciprocal, n) -> Vec<Vector3<f64>>      - k-points along the path
