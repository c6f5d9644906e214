//! Incremental 3D convex hull and the edge sets derived from it.
//!
//! The hull is triangulated. [`ConvexHull::triangulated_edges`] reports every
//! triangle edge, which on a non-triangular face includes the diagonals the
//! triangulation introduced (a square face contributes five edges instead of
//! four). [`ConvexHull::polygonal_faces`] merges coplanar triangles back into
//! polygons, and [`ConvexHull::polygonal_edges`] keeps only their boundary
//! edges, which is the exact edge set of the polyhedron.

use log::debug;
use nalgebra::Vector3;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::{validate_tolerance, MERGE_FACTOR};
use crate::errors::BrillouinZoneError;

/// An undirected edge stored as (smaller index, larger index).
pub type Edge = (usize, usize);

/// A triangle of the hull, wound counter-clockwise when seen from outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullFacet {
    /// Indices into the input point list.
    pub vertices: [usize; 3],
    /// Outward unit normal (in the hull's working coordinates).
    normal: Vector3<f64>,
    /// Plane offset: `normal · x = offset` on the facet.
    offset: f64,
}

impl HullFacet {
    fn distance(&self, point: &Vector3<f64>) -> f64 {
        self.normal.dot(point) - self.offset
    }

    fn directed_edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    pub fn normal(&self) -> &Vector3<f64> {
        &self.normal
    }
}

/// Convex hull of a point set.
#[derive(Debug, Clone)]
pub struct ConvexHull {
    points: Vec<Vector3<f64>>,
    // Points translated to their centroid and divided by the largest radius
    working: Vec<Vector3<f64>>,
    facets: Vec<HullFacet>,
    interior: Vector3<f64>,
    centroid: Vector3<f64>,
    scale: f64,
    tolerance: f64,
}

impl ConvexHull {
    /// Compute the hull of `points`.
    ///
    /// `tolerance` is relative to the extent of the point set.
    ///
    /// # Errors
    ///
    /// `DegenerateHull` when there are fewer than four points, when the points
    /// do not span three dimensions (coincident, collinear, coplanar), or when a
    /// new point is collinear with a hull edge. `InvalidConfig` for a tolerance
    /// outside (0, `MAX_GEOMETRY_TOLERANCE`].
    pub fn compute(points: &[Vector3<f64>], tolerance: f64) -> Result<Self, BrillouinZoneError> {
        validate_tolerance(tolerance)?;
        if points.len() < 4 {
            return Err(BrillouinZoneError::degenerate_hull(format!(
                "{} points cannot form a 3D polyhedron; at least 4 are required.",
                points.len()
            )));
        }
        if points.iter().any(|p| p.iter().any(|value| !value.is_finite())) {
            return Err(BrillouinZoneError::degenerate_hull("Point set contains non-finite coordinates."));
        }

        let centroid = points.iter().fold(Vector3::zeros(), |acc, p| acc + p) / points.len() as f64;
        let scale = points
            .iter()
            .map(|p| (p - centroid).norm())
            .fold(0.0_f64, f64::max);
        if scale == 0.0 {
            return Err(BrillouinZoneError::degenerate_hull("All points coincide."));
        }
        let working: Vec<Vector3<f64>> = points.iter().map(|p| (p - centroid) / scale).collect();

        let simplex = initial_simplex(&working, tolerance)?;
        let interior = simplex.iter().fold(Vector3::zeros(), |acc, &i| acc + working[i]) / 4.0;

        let mut hull = ConvexHull {
            points: points.to_vec(),
            working,
            facets: Vec::new(),
            interior,
            centroid,
            scale,
            tolerance,
        };

        let [i0, i1, i2, i3] = simplex;
        for triangle in [[i0, i1, i2], [i0, i1, i3], [i0, i2, i3], [i1, i2, i3]] {
            let facet = hull.oriented_facet(triangle)?;
            hull.facets.push(facet);
        }

        for index in 0..hull.working.len() {
            if simplex.contains(&index) {
                continue;
            }
            hull.add_point(index)?;
        }

        debug!(
            "Convex hull: {} points, {} hull vertices, {} facets",
            hull.points.len(),
            hull.vertex_indices().len(),
            hull.facets.len()
        );
        Ok(hull)
    }

    // Build a facet over `triangle` with its normal pointing away from the interior point
    fn oriented_facet(&self, triangle: [usize; 3]) -> Result<HullFacet, BrillouinZoneError> {
        let [a, b, c] = triangle;
        let (normal, offset) = facet_plane(&self.working[a], &self.working[b], &self.working[c], self.tolerance)
            .ok_or_else(|| {
                BrillouinZoneError::degenerate_hull(format!("Facet ({a}, {b}, {c}) is collinear within the tolerance."))
            })?;

        if normal.dot(&self.interior) - offset > 0.0 {
            // Reverse winding so the normal points outward
            Ok(HullFacet {
                vertices: [a, c, b],
                normal: -normal,
                offset: -offset,
            })
        } else {
            Ok(HullFacet {
                vertices: [a, b, c],
                normal,
                offset,
            })
        }
    }

    fn add_point(&mut self, index: usize) -> Result<(), BrillouinZoneError> {
        let point = self.working[index];
        let visible: Vec<bool> = self
            .facets
            .iter()
            .map(|facet| facet.distance(&point) > self.tolerance)
            .collect();
        if !visible.iter().any(|&v| v) {
            return Ok(()); // Inside or on the surface
        }

        let visible_edges: HashSet<(usize, usize)> = self
            .facets
            .iter()
            .zip(&visible)
            .filter(|(_, is_visible)| **is_visible)
            .flat_map(|(facet, _)| facet.directed_edges())
            .collect();

        // Horizon: edges of visible facets whose twin belongs to a hidden facet
        let horizon: Vec<(usize, usize)> = self
            .facets
            .iter()
            .zip(&visible)
            .filter(|(_, is_visible)| **is_visible)
            .flat_map(|(facet, _)| facet.directed_edges())
            .filter(|&(a, b)| !visible_edges.contains(&(b, a)))
            .collect();

        let mut kept: Vec<HullFacet> = self
            .facets
            .iter()
            .zip(&visible)
            .filter(|(_, is_visible)| !**is_visible)
            .map(|(facet, _)| *facet)
            .collect();
        for (a, b) in horizon {
            kept.push(self.oriented_facet([a, b, index])?);
        }
        self.facets = kept;
        Ok(())
    }

    /// The input points, in input order.
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    pub fn facets(&self) -> &[HullFacet] {
        &self.facets
    }

    /// Triangles as index triples into [`ConvexHull::points`].
    pub fn simplices(&self) -> Vec<[usize; 3]> {
        self.facets.iter().map(|facet| facet.vertices).collect()
    }

    /// Sorted indices of the points that are hull vertices.
    pub fn vertex_indices(&self) -> Vec<usize> {
        let vertices: BTreeSet<usize> = self.facets.iter().flat_map(|facet| facet.vertices).collect();
        vertices.into_iter().collect()
    }

    /// Enclosed volume, in the units of the input points.
    pub fn volume(&self) -> f64 {
        let working_volume: f64 = self
            .facets
            .iter()
            .map(|facet| {
                let [a, b, c] = facet.vertices.map(|i| self.working[i] - self.interior);
                a.dot(&b.cross(&c)) / 6.0
            })
            .sum();
        working_volume * self.scale.powi(3)
    }

    /// Edges of the triangulation, canonicalized and deduplicated.
    pub fn triangulated_edges(&self) -> BTreeSet<Edge> {
        let mut unique_edges = BTreeSet::new();
        for facet in &self.facets {
            let face = facet.vertices;
            for i in 0..face.len() {
                add_normalized_edge(&mut unique_edges, face[i], face[(i + 1) % face.len()]);
            }
        }
        unique_edges
    }

    /// Coplanar facets merged into polygons, each wound counter-clockwise seen from outside.
    pub fn polygonal_faces(&self) -> Vec<Vec<usize>> {
        let groups = self.coplanar_groups();
        let mut faces = Vec::with_capacity(groups.len());

        for group in groups {
            let directed: Vec<(usize, usize)> = group
                .iter()
                .flat_map(|&facet_index| self.facets[facet_index].directed_edges())
                .collect();
            let directed_set: HashSet<(usize, usize)> = directed.iter().copied().collect();

            // Boundary edges have no twin inside the group; chain them into a loop
            let next: HashMap<usize, usize> = directed
                .iter()
                .filter(|&&(a, b)| !directed_set.contains(&(b, a)))
                .map(|&(a, b)| (a, b))
                .collect();
            let Some(&start) = next.keys().min() else {
                continue;
            };

            let mut polygon = vec![start];
            let mut current = start;
            while let Some(&following) = next.get(&current) {
                if following == start || polygon.len() > next.len() {
                    break;
                }
                polygon.push(following);
                current = following;
            }
            faces.push(polygon);
        }
        faces
    }

    /// Edges of the polyhedron after merging coplanar facets.
    pub fn polygonal_edges(&self) -> BTreeSet<Edge> {
        let mut unique_edges = BTreeSet::new();
        for face in self.polygonal_faces() {
            for i in 0..face.len() {
                add_normalized_edge(&mut unique_edges, face[i], face[(i + 1) % face.len()]);
            }
        }
        unique_edges
    }

    /// Whether `point` lies inside or on the hull.
    pub fn contains(&self, point: &Vector3<f64>) -> bool {
        let working_point = (point - self.centroid) / self.scale;
        self.facets
            .iter()
            .all(|facet| facet.distance(&working_point) <= self.tolerance)
    }

    // Facet indices grouped by supporting plane. Larger facets seed groups so that
    // sliver triangles join the plane of their face instead of defining their own.
    fn coplanar_groups(&self) -> Vec<Vec<usize>> {
        let mut order: Vec<usize> = (0..self.facets.len()).collect();
        let area = |facet: &HullFacet| {
            let [a, b, c] = facet.vertices.map(|i| self.working[i]);
            (b - a).cross(&(c - a)).norm()
        };
        order.sort_by(|&x, &y| area(&self.facets[y]).total_cmp(&area(&self.facets[x])));

        let mut groups: Vec<(HullFacet, Vec<usize>)> = Vec::new();
        for facet_index in order {
            let facet = self.facets[facet_index];
            let plane = groups.iter_mut().find(|(seed, _)| {
                seed.normal.dot(&facet.normal) > 0.5
                    && facet
                        .vertices
                        .iter()
                        .all(|&i| seed.distance(&self.working[i]).abs() <= self.tolerance * MERGE_FACTOR)
            });
            match plane {
                Some((_, members)) => members.push(facet_index),
                None => groups.push((facet, vec![facet_index])),
            }
        }
        groups.into_iter().map(|(_, members)| members).collect()
    }
}

/// Unit normal and offset of the plane through three points, wound a → b → c.
///
/// `None` when the triangle's height over its longest side is within `tolerance`,
/// where the normal would be dominated by rounding.
pub(crate) fn facet_plane(
    pa: &Vector3<f64>,
    pb: &Vector3<f64>,
    pc: &Vector3<f64>,
    tolerance: f64,
) -> Option<(Vector3<f64>, f64)> {
    let cross = (pb - pa).cross(&(pc - pa));
    let length = cross.norm();
    let longest = (pb - pa).norm().max((pc - pb).norm()).max((pa - pc).norm());
    if !length.is_finite() || longest == 0.0 || length / longest <= tolerance {
        return None;
    }
    let normal = cross / length;
    Some((normal, normal.dot(pa)))
}

// Four affinely independent points, or the reason none exist
fn initial_simplex(points: &[Vector3<f64>], tolerance: f64) -> Result<[usize; 4], BrillouinZoneError> {
    let i0 = 0;
    let (i1, spread) = farthest(points, |p| (p - points[i0]).norm());
    if spread <= tolerance {
        return Err(BrillouinZoneError::degenerate_hull("All points coincide."));
    }

    let axis = (points[i1] - points[i0]).normalize();
    let (i2, line_distance) = farthest(points, |p| (p - points[i0]).cross(&axis).norm());
    if line_distance <= tolerance {
        return Err(BrillouinZoneError::degenerate_hull("All points are collinear."));
    }

    let normal = (points[i1] - points[i0]).cross(&(points[i2] - points[i0])).normalize();
    let (i3, plane_distance) = farthest(points, |p| normal.dot(&(p - points[i0])).abs());
    if plane_distance <= tolerance {
        return Err(BrillouinZoneError::degenerate_hull(format!(
            "All {} points are coplanar; no 3D polyhedron can be formed.",
            points.len()
        )));
    }

    Ok([i0, i1, i2, i3])
}

fn farthest(points: &[Vector3<f64>], measure: impl Fn(&Vector3<f64>) -> f64) -> (usize, f64) {
    points
        .iter()
        .enumerate()
        .map(|(index, p)| (index, measure(p)))
        .fold((0, f64::NEG_INFINITY), |best, candidate| {
            if candidate.1 > best.1 { candidate } else { best }
        })
}

// Add edge with normalized ordering (smaller index first)
fn add_normalized_edge(edges: &mut BTreeSet<Edge>, i: usize, j: usize) {
    if i < j {
        edges.insert((i, j));
    } else {
        edges.insert((j, i));
    }
}
