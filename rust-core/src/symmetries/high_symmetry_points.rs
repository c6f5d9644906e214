use log::warn;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label of the zone center, as emitted by common k-path finders.
pub const GAMMA: &str = "GAMMA";

/// High-symmetry annotation of a Brillouin zone, supplied by an external k-path finder.
///
/// Points are fractional coordinates with respect to the reciprocal basis and
/// are carried through unchanged; nothing here validates the labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighSymmetryData {
    /// Label → fractional reciprocal coordinates
    #[serde(default)]
    pub kpoints: BTreeMap<String, Vector3<f64>>,
    /// Legs of the recommended path as (start label, end label)
    #[serde(default)]
    pub path: Vec<(String, String)>,
}

/// One leg of the path in Cartesian reciprocal coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub start_label: String,
    pub end_label: String,
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
}

impl PathSegment {
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

impl HighSymmetryData {
    /// Create new high symmetry data
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point(mut self, label: impl Into<String>, position: Vector3<f64>) -> Self {
        self.add_point(label, position);
        self
    }

    pub fn with_segment(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.add_segment(start, end);
        self
    }

    /// Add a high symmetry point
    pub fn add_point(&mut self, label: impl Into<String>, position: Vector3<f64>) {
        self.kpoints.insert(label.into(), position);
    }

    pub fn add_segment(&mut self, start: impl Into<String>, end: impl Into<String>) {
        self.path.push((start.into(), end.into()));
    }

    /// Get a point by label
    pub fn get_point(&self, label: &str) -> Option<&Vector3<f64>> {
        self.kpoints.get(label)
    }

    pub fn is_empty(&self) -> bool {
        self.kpoints.is_empty() && self.path.is_empty()
    }

    // `reciprocal` rows are the basis vectors b₁, b₂, b₃ throughout

    /// All points converted to Cartesian coordinates k = Σ fᵢ·bᵢ.
    pub fn cartesian_points(&self, reciprocal: &Matrix3<f64>) -> BTreeMap<String, Vector3<f64>> {
        self.kpoints
            .iter()
            .map(|(label, fractional)| (label.clone(), frac_to_cart(reciprocal, fractional)))
            .collect()
    }

    /// Path legs in Cartesian coordinates; legs naming an unknown label are skipped.
    pub fn path_segments(&self, reciprocal: &Matrix3<f64>) -> Vec<PathSegment> {
        self.path
            .iter()
            .filter_map(|(start_label, end_label)| {
                match (self.kpoints.get(start_label), self.kpoints.get(end_label)) {
                    (Some(start), Some(end)) => Some(PathSegment {
                        start_label: start_label.clone(),
                        end_label: end_label.clone(),
                        start: frac_to_cart(reciprocal, start),
                        end: frac_to_cart(reciprocal, end),
                    }),
                    _ => {
                        warn!("Skipping path leg {} -> {}: unknown label", start_label, end_label);
                        None
                    }
                }
            })
            .collect()
    }

    /// Cartesian k-points along every path leg, `n_points_per_segment` per leg plus each leg's end.
    pub fn interpolate_path(&self, reciprocal: &Matrix3<f64>, n_points_per_segment: usize) -> Vec<Vector3<f64>> {
        let mut k_points = Vec::new();
        if n_points_per_segment == 0 {
            return k_points;
        }

        let segments = self.path_segments(reciprocal);
        for (index, segment) in segments.iter().enumerate() {
            for j in 0..n_points_per_segment {
                let t = j as f64 / n_points_per_segment as f64;
                k_points.push(segment.start + t * (segment.end - segment.start));
            }
            // Close the leg when the next one does not continue from here
            let continues = segments
                .get(index + 1)
                .is_some_and(|next| next.start_label == segment.end_label);
            if !continues {
                k_points.push(segment.end);
            }
        }
        k_points
    }
}

// Σ fᵢ·bᵢ for a basis stored as rows
fn frac_to_cart(rows: &Matrix3<f64>, fractional: &Vector3<f64>) -> Vector3<f64> {
    rows.transpose() * fractional
}
