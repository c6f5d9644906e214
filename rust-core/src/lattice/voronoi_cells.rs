// Voronoi decomposition of a neighbor grid and extraction of the origin's cell
//
// Every site's region is built by native half-space clipping: a large bounding
// cube around the site is cut by the perpendicular bisector plane of every other
// site. Faces that survive from the cube mean the region is open towards
// infinity; their vertices are reported as an at-infinity marker instead of
// coordinates.

// ======================== IMPORTS ========================
use log::{debug, trace, warn};
use nalgebra::Vector3;
use std::collections::HashMap;

use crate::config::{validate_tolerance, BOUNDING_BOX_SCALE, DEFAULT_SHELL, MERGE_FACTOR};
use crate::errors::BrillouinZoneError;
use crate::interfaces::ShellStrategy;
use crate::lattice::base_matrix::LatticeMatrix;
use crate::lattice::neighbor_grid::NeighborGrid;

// ======================== CONSTANTS ========================
const MAX_VERIFICATION_POINTS: usize = 1_000_000; // Lattice points examined when checking shell sufficiency

// ======================== TYPES ========================

/// One entry of a region's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoronoiVertex {
    /// Index into [`VoronoiDiagram::vertices`].
    Finite(usize),
    /// The region extends to infinity.
    AtInfinity,
}

/// The Voronoi region of one site.
#[derive(Debug, Clone, Default)]
pub struct VoronoiRegion {
    /// Vertex list; contains [`VoronoiVertex::AtInfinity`] once if the region is unbounded.
    pub vertices: Vec<VoronoiVertex>,
    /// Sites sharing a face with this region.
    pub neighbors: Vec<usize>,
}

impl VoronoiRegion {
    pub fn is_bounded(&self) -> bool {
        !self.vertices.contains(&VoronoiVertex::AtInfinity)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Indices of the finite vertices.
    pub fn finite_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices.iter().filter_map(|vertex| match vertex {
            VoronoiVertex::Finite(index) => Some(*index),
            VoronoiVertex::AtInfinity => None,
        })
    }
}

/// Voronoi diagram of a finite set of sites: shared vertex table plus one region per site.
#[derive(Debug, Clone)]
pub struct VoronoiDiagram {
    sites: Vec<Vector3<f64>>,
    vertices: Vec<Vector3<f64>>,
    regions: Vec<VoronoiRegion>,
}

impl VoronoiDiagram {
    /// Compute the regions of all `sites`.
    ///
    /// `tolerance` is relative: geometry is evaluated in coordinates divided by
    /// the largest site norm. It must be positive; see [`validate_tolerance`].
    pub fn compute(sites: &[Vector3<f64>], tolerance: f64) -> Self {
        let scale = sites.iter().map(|site| site.norm()).fold(0.0_f64, f64::max);
        if sites.len() < 2 || scale == 0.0 || !scale.is_finite() {
            return VoronoiDiagram {
                sites: sites.to_vec(),
                vertices: Vec::new(),
                regions: vec![VoronoiRegion::default(); sites.len()],
            };
        }

        let normalized: Vec<Vector3<f64>> = sites.iter().map(|site| site / scale).collect();
        let merge_distance = tolerance * MERGE_FACTOR;

        let mut vertex_table = VertexTable::new(merge_distance * scale);
        let mut regions = Vec::with_capacity(sites.len());

        for (site_index, site) in normalized.iter().enumerate() {
            let cell = clip_cell_for_site(&normalized, site_index, tolerance, merge_distance);

            let mut region = VoronoiRegion::default();
            let mut reaches_infinity = false;
            for local_vertex in cell.unique_vertices(merge_distance) {
                if cell.touches_bound(&local_vertex, tolerance) {
                    reaches_infinity = true;
                    continue;
                }
                let global = vertex_table.insert((local_vertex + site) * scale);
                region.vertices.push(VoronoiVertex::Finite(global));
            }
            if reaches_infinity || !cell.is_bounded() {
                region.vertices.push(VoronoiVertex::AtInfinity);
            }
            region.neighbors = cell.neighbors();

            trace!(
                "Site {}: {} faces, {} vertices, bounded = {}",
                site_index,
                cell.faces.len(),
                region.vertices.len(),
                region.is_bounded()
            );
            regions.push(region);
        }

        VoronoiDiagram {
            sites: sites.to_vec(),
            vertices: vertex_table.into_vertices(),
            regions,
        }
    }

    pub fn sites(&self) -> &[Vector3<f64>] {
        &self.sites
    }

    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    pub fn regions(&self) -> &[VoronoiRegion] {
        &self.regions
    }

    /// The region of the site at `site_index`.
    pub fn region(&self, site_index: usize) -> Option<&VoronoiRegion> {
        self.regions.get(site_index)
    }
}

/// Vertices of the origin's Voronoi cell together with the shell that produced them.
#[derive(Debug, Clone)]
pub struct OriginCell {
    pub vertices: Vec<Vector3<f64>>,
    pub shell: usize,
}

// ======================== BRILLOUIN ZONE REGION ========================

/// Extract the vertices of the Voronoi cell of the grid's origin.
///
/// Fails with `UnboundedRegion` when the origin's region is missing, open, or
/// when a lattice point outside the grid would cut the cell (the shell is too
/// small for this lattice and the shape would be wrong).
pub fn extract_brillouin_zone_region(
    grid: &NeighborGrid,
    tolerance: f64,
) -> Result<Vec<Vector3<f64>>, BrillouinZoneError> {
    validate_tolerance(tolerance)?;
    let diagram = VoronoiDiagram::compute(grid.points(), tolerance);
    let origin_index = grid.origin_index();

    let region = diagram.region(origin_index).ok_or_else(|| {
        BrillouinZoneError::unbounded_region(format!("No region for the origin site {origin_index}."))
    })?;
    if region.is_empty() {
        return Err(BrillouinZoneError::unbounded_region(format!(
            "Region of the origin site {origin_index} has no vertices."
        )));
    }
    if !region.is_bounded() {
        return Err(BrillouinZoneError::unbounded_region(format!(
            "Region of the origin site {origin_index} has a vertex at infinity; \
             the {}-shell neighbor grid does not enclose it.",
            grid.shell()
        )));
    }

    let vertices: Vec<Vector3<f64>> = region
        .finite_vertices()
        .map(|index| diagram.vertices()[index])
        .collect();
    debug!(
        "Origin region: {} vertices, {} neighboring sites (shell {})",
        vertices.len(),
        region.neighbors.len(),
        grid.shell()
    );

    verify_shell_encloses_cell(grid, &vertices, tolerance)?;
    Ok(vertices)
}

/// Build the neighbor grid(s) for `basis` and extract the origin cell according to `strategy`.
pub fn compute_brillouin_zone_region(
    basis: &LatticeMatrix,
    strategy: ShellStrategy,
    tolerance: f64,
) -> Result<OriginCell, BrillouinZoneError> {
    validate_tolerance(tolerance)?;
    match strategy {
        ShellStrategy::Fixed => {
            let grid = NeighborGrid::new(basis);
            debug!("Neighbor grid: {} points, origin at {}", grid.len(), grid.origin_index());
            let vertices = extract_brillouin_zone_region(&grid, tolerance)?;
            Ok(OriginCell {
                vertices,
                shell: grid.shell(),
            })
        }
        ShellStrategy::Adaptive { max_shell } => {
            let max_shell = max_shell.max(DEFAULT_SHELL);
            let mut last_error = None;
            for shell in DEFAULT_SHELL..=max_shell {
                let grid = NeighborGrid::with_shell(basis, shell);
                debug!("Neighbor grid: {} points, origin at {}", grid.len(), grid.origin_index());
                match extract_brillouin_zone_region(&grid, tolerance) {
                    Ok(vertices) => return Ok(OriginCell { vertices, shell }),
                    Err(error @ BrillouinZoneError::UnboundedRegion { .. }) => {
                        warn!("Shell {} insufficient, growing: {}", shell, error);
                        last_error = Some(error);
                    }
                    Err(error) => return Err(error),
                }
            }
            Err(BrillouinZoneError::unbounded_region(format!(
                "Origin cell still not enclosed after growing the grid to shell {max_shell}: {}",
                last_error.map(|error| error.message().to_string()).unwrap_or_default()
            )))
        }
    }
}

// ======================== SHELL VERIFICATION ========================

// Every lattice point p outside the grid must leave the cell untouched: v·p ≤ |p|²/2 for
// all vertices v. Only points with |p| ≤ 2·max|v| can matter, and a point with
// coefficient |mᵢ| lies at least |mᵢ|·dᵢ from the origin (dᵢ = plane spacing).
fn verify_shell_encloses_cell(
    grid: &NeighborGrid,
    vertices: &[Vector3<f64>],
    tolerance: f64,
) -> Result<(), BrillouinZoneError> {
    let basis = grid.basis();
    let [vector_b1, vector_b2, vector_b3] = basis.base_vectors();
    let radius = vertices.iter().map(|v| v.norm()).fold(0.0_f64, f64::max);
    let reach = 2.0 * radius;
    let length_scale = grid.points().iter().map(|p| p.norm()).fold(0.0_f64, f64::max);
    let slack = tolerance * length_scale;

    let spacings = basis.plane_spacings();
    let limits: Vec<i64> = spacings
        .iter()
        .map(|spacing| ((reach + slack) / spacing).floor() as i64)
        .collect();
    let point_count = limits
        .iter()
        .map(|limit| 2 * (*limit as usize) + 1)
        .try_fold(1usize, |acc, side| acc.checked_mul(side));
    if point_count.map_or(true, |count| count > MAX_VERIFICATION_POINTS) {
        return Err(BrillouinZoneError::unbounded_region(format!(
            "Cell cannot be verified against the lattice: search ranges {limits:?} are too large \
             for a shell-{} grid.",
            grid.shell()
        )));
    }

    let shell = grid.shell() as i64;
    for n in -limits[0]..=limits[0] {
        for m in -limits[1]..=limits[1] {
            for l in -limits[2]..=limits[2] {
                if n.abs() <= shell && m.abs() <= shell && l.abs() <= shell {
                    continue; // Already a site of the grid
                }
                let point = (n as f64) * vector_b1 + (m as f64) * vector_b2 + (l as f64) * vector_b3;
                let distance = point.norm();
                if distance > reach + slack {
                    continue;
                }
                let half_distance = 0.5 * distance;
                let direction = point / distance;
                if vertices.iter().any(|v| v.dot(&direction) - half_distance > slack) {
                    return Err(BrillouinZoneError::unbounded_region(format!(
                        "Lattice point ({n}, {m}, {l}) outside the shell-{} grid cuts the origin cell; \
                         the lattice is too skewed for this neighbor shell.",
                        grid.shell()
                    )));
                }
            }
        }
    }
    Ok(())
}

// ======================== HALF-SPACE CLIPPING ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaceSource {
    Bisector(usize),
    Bound,
}

#[derive(Debug, Clone)]
struct CellFace {
    source: FaceSource,
    vertices: Vec<Vector3<f64>>,
}

// Convex cell in coordinates local to its site
#[derive(Debug, Clone)]
struct ClippedCell {
    faces: Vec<CellFace>,
    half_width: f64,
}

fn clip_cell_for_site(
    sites: &[Vector3<f64>],
    site_index: usize,
    tolerance: f64,
    merge_distance: f64,
) -> ClippedCell {
    let site = sites[site_index];
    let mut cell = ClippedCell::bounding_cube(BOUNDING_BOX_SCALE);

    // Nearest sites first: they remove most of the cube early
    let mut others: Vec<(usize, Vector3<f64>)> = sites
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != site_index)
        .map(|(index, other)| (index, other - site))
        .filter(|(_, offset)| offset.norm() > tolerance)
        .collect();
    others.sort_by(|a, b| a.1.norm().total_cmp(&b.1.norm()));

    for (index, offset) in others {
        let distance = offset.norm();
        let normal = offset / distance;
        cell.clip(&normal, 0.5 * distance, FaceSource::Bisector(index), tolerance, merge_distance);
        if cell.faces.is_empty() {
            break; // Degenerate case
        }
    }
    cell
}

impl ClippedCell {
    fn bounding_cube(half_width: f64) -> Self {
        let h = half_width;
        let corner = |x: f64, y: f64, z: f64| Vector3::new(x * h, y * h, z * h);
        let quads = [
            [corner(1., -1., -1.), corner(1., 1., -1.), corner(1., 1., 1.), corner(1., -1., 1.)],
            [corner(-1., -1., -1.), corner(-1., -1., 1.), corner(-1., 1., 1.), corner(-1., 1., -1.)],
            [corner(-1., 1., -1.), corner(-1., 1., 1.), corner(1., 1., 1.), corner(1., 1., -1.)],
            [corner(-1., -1., -1.), corner(1., -1., -1.), corner(1., -1., 1.), corner(-1., -1., 1.)],
            [corner(-1., -1., 1.), corner(1., -1., 1.), corner(1., 1., 1.), corner(-1., 1., 1.)],
            [corner(-1., -1., -1.), corner(-1., 1., -1.), corner(1., 1., -1.), corner(1., -1., -1.)],
        ];
        ClippedCell {
            faces: quads
                .into_iter()
                .map(|quad| CellFace {
                    source: FaceSource::Bound,
                    vertices: quad.to_vec(),
                })
                .collect(),
            half_width,
        }
    }

    // Keep the part of the cell with normal·x ≤ distance
    fn clip(
        &mut self,
        normal: &Vector3<f64>,
        distance: f64,
        source: FaceSource,
        tolerance: f64,
        merge_distance: f64,
    ) {
        let any_outside = self
            .faces
            .iter()
            .flat_map(|face| face.vertices.iter())
            .any(|vertex| normal.dot(vertex) - distance > tolerance);
        if !any_outside {
            return;
        }

        let mut cap_points = Vec::new();
        let mut clipped_faces = Vec::with_capacity(self.faces.len() + 1);
        for face in &self.faces {
            let clipped = clip_polygon_by_halfspace(&face.vertices, normal, distance, tolerance, &mut cap_points);
            let clipped = remove_consecutive_duplicates(clipped, merge_distance);
            if clipped.len() >= 3 {
                clipped_faces.push(CellFace {
                    source: face.source,
                    vertices: clipped,
                });
            }
        }

        let cap = order_cap_polygon(cap_points, normal, merge_distance);
        if cap.len() >= 3 {
            clipped_faces.push(CellFace { source, vertices: cap });
        }
        self.faces = clipped_faces;
    }

    fn is_bounded(&self) -> bool {
        self.faces.iter().all(|face| face.source != FaceSource::Bound)
    }

    fn touches_bound(&self, vertex: &Vector3<f64>, tolerance: f64) -> bool {
        vertex.amax() >= self.half_width * (1.0 - tolerance)
    }

    fn neighbors(&self) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .faces
            .iter()
            .filter_map(|face| match face.source {
                FaceSource::Bisector(index) => Some(index),
                FaceSource::Bound => None,
            })
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    // Face corners clustered within the merge distance; each cluster is replaced by its centroid
    fn unique_vertices(&self, merge_distance: f64) -> Vec<Vector3<f64>> {
        let mut clusters: Vec<(Vector3<f64>, usize)> = Vec::new();
        for vertex in self.faces.iter().flat_map(|face| face.vertices.iter()) {
            let found = clusters
                .iter_mut()
                .find(|(sum, count)| (*sum / *count as f64 - vertex).norm() < merge_distance);
            match found {
                Some((sum, count)) => {
                    *sum += vertex;
                    *count += 1;
                }
                None => clusters.push((*vertex, 1)),
            }
        }
        clusters.into_iter().map(|(sum, count)| sum / count as f64).collect()
    }
}

// Sutherland-Hodgman clipping of a planar polygon in 3D against a half-space.
// Points landing on the cutting plane are collected in `cap_points`.
fn clip_polygon_by_halfspace(
    polygon: &[Vector3<f64>],
    normal: &Vector3<f64>,
    distance: f64,
    tolerance: f64,
    cap_points: &mut Vec<Vector3<f64>>,
) -> Vec<Vector3<f64>> {
    let Some(&last) = polygon.last() else {
        return Vec::new();
    };

    let mut clipped_polygon = Vec::with_capacity(polygon.len() + 1);
    let mut previous_vertex = last;
    let mut previous_distance = normal.dot(&previous_vertex) - distance;

    for &current_vertex in polygon {
        let current_distance = normal.dot(&current_vertex) - distance;
        let previous_inside = previous_distance <= tolerance;
        let current_inside = current_distance <= tolerance;

        // Edge crosses the boundary
        if current_inside != previous_inside {
            let t = (previous_distance / (previous_distance - current_distance)).clamp(0.0, 1.0);
            let intersection = previous_vertex + (current_vertex - previous_vertex) * t;
            clipped_polygon.push(intersection);
            cap_points.push(intersection);
        }

        if current_inside {
            clipped_polygon.push(current_vertex);
            if current_distance.abs() <= tolerance {
                cap_points.push(current_vertex);
            }
        }

        previous_vertex = current_vertex;
        previous_distance = current_distance;
    }

    clipped_polygon
}

fn remove_consecutive_duplicates(polygon: Vec<Vector3<f64>>, merge_distance: f64) -> Vec<Vector3<f64>> {
    let mut result: Vec<Vector3<f64>> = Vec::with_capacity(polygon.len());
    for vertex in polygon {
        if result.last().map_or(true, |last| (last - vertex).norm() >= merge_distance) {
            result.push(vertex);
        }
    }
    while result.len() > 1 && (result[0] - result[result.len() - 1]).norm() < merge_distance {
        result.pop();
    }
    result
}

// Order the points on a cutting plane counter-clockwise around `normal`
fn order_cap_polygon(points: Vec<Vector3<f64>>, normal: &Vector3<f64>, merge_distance: f64) -> Vec<Vector3<f64>> {
    let mut unique: Vec<Vector3<f64>> = Vec::with_capacity(points.len());
    for point in points {
        if !unique.iter().any(|existing| (existing - point).norm() < merge_distance) {
            unique.push(point);
        }
    }
    if unique.len() < 3 {
        return Vec::new();
    }

    let centroid = unique.iter().fold(Vector3::zeros(), |acc, p| acc + p) / unique.len() as f64;
    let axis_u = any_perpendicular(normal);
    let axis_w = normal.cross(&axis_u);
    unique.sort_by(|a, b| {
        let angle_a = (a - centroid).dot(&axis_w).atan2((a - centroid).dot(&axis_u));
        let angle_b = (b - centroid).dot(&axis_w).atan2((b - centroid).dot(&axis_u));
        angle_a.total_cmp(&angle_b)
    });

    // Collinear points span no area
    let doubled_area = (0..unique.len())
        .map(|i| (unique[i] - centroid).cross(&(unique[(i + 1) % unique.len()] - centroid)))
        .fold(Vector3::zeros(), |acc, c| acc + c)
        .dot(normal);
    if doubled_area.abs() < merge_distance * merge_distance {
        return Vec::new();
    }
    unique
}

fn any_perpendicular(normal: &Vector3<f64>) -> Vector3<f64> {
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    normal.cross(&helper).normalize()
}

// ======================== VERTEX TABLE ========================

// Shared vertex storage; points closer than the merge distance get the same index.
// Buckets are cubes of the merge distance, so a match is in the bucket or one of its 26 neighbors.
struct VertexTable {
    vertices: Vec<Vector3<f64>>,
    buckets: HashMap<(i64, i64, i64), Vec<usize>>,
    merge_distance: f64,
}

impl VertexTable {
    fn new(merge_distance: f64) -> Self {
        VertexTable {
            vertices: Vec::new(),
            buckets: HashMap::new(),
            merge_distance,
        }
    }

    fn insert(&mut self, vertex: Vector3<f64>) -> usize {
        let key = bucket_key(&vertex, self.merge_distance);

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor = (key.0 + dx, key.1 + dy, key.2 + dz);
                    if let Some(indices) = self.buckets.get(&neighbor) {
                        if let Some(&found) = indices
                            .iter()
                            .find(|&&index| (self.vertices[index] - vertex).norm() < self.merge_distance)
                        {
                            return found;
                        }
                    }
                }
            }
        }

        let index = self.vertices.len();
        self.vertices.push(vertex);
        self.buckets.entry(key).or_default().push(index);
        index
    }

    fn into_vertices(self) -> Vec<Vector3<f64>> {
        self.vertices
    }
}

fn bucket_key(vertex: &Vector3<f64>, bucket_size: f64) -> (i64, i64, i64) {
    (
        (vertex.x / bucket_size).floor() as i64,
        (vertex.y / bucket_size).floor() as i64,
        (vertex.z / bucket_size).floor() as i64,
    )
}
