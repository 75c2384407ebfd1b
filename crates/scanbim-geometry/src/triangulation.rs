// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Turns the polygon faces of a [`ResolvedMesh`] into flat-shaded triangle
//! buffers. Non-trivial polygons are projected onto their plane and handed
//! to earcutr.

use crate::{Error, Point2, Point3, Result, Vector3};
use scanbim_model::{MeshData, ResolvedMesh};

/// Check if a polygon is convex (all cross products have same sign)
#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current_sign = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current_sign;
            } else if sign != current_sign {
                return false;
            }
        }
    }

    true
}

/// Fan triangulation around the first vertex
#[inline]
fn fan_triangulate(n: usize) -> Vec<usize> {
    (1..n - 1).flat_map(|i| [0, i, i + 1]).collect()
}

/// Triangulate a simple polygon (no holes)
///
/// Returns triangle indices into the input points.
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();

    if n < 3 {
        return Err(Error::triangulation(
            "Need at least 3 points to triangulate",
        ));
    }

    match n {
        3 => return Ok(vec![0, 1, 2]),
        4 => return Ok(vec![0, 1, 2, 0, 2, 3]),
        _ => {}
    }

    if is_convex(points) {
        return Ok(fan_triangulate(n));
    }

    let vertices: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcutr::earcut(&vertices, &[], 2)
        .map_err(|e| Error::triangulation(format!("{:?}", e)))?;

    if indices.is_empty() {
        return Err(Error::triangulation("earcut produced no triangles"));
    }
    Ok(indices)
}

/// Project 3D points onto the plane through the first point with `normal`
pub fn project_to_2d(points_3d: &[Point3<f64>], normal: &Vector3<f64>) -> Vec<Point2<f64>> {
    let Some(origin) = points_3d.first() else {
        return Vec::new();
    };

    // Pick the world axis least aligned with the normal as reference
    let abs = normal.abs();
    let reference = if abs.x <= abs.y && abs.x <= abs.z {
        Vector3::x()
    } else if abs.y <= abs.z {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let u_axis = normal.cross(&reference).normalize();
    let v_axis = normal.cross(&u_axis).normalize();

    points_3d
        .iter()
        .map(|p| {
            let v = p - origin;
            Point2::new(v.dot(&u_axis), v.dot(&v_axis))
        })
        .collect()
}

/// Polygon normal by Newell's method
///
/// Degenerate polygons get +Z.
pub fn calculate_polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    let mut normal = Vector3::<f64>::zeros();

    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];

        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    normal
        .try_normalize(1e-10)
        .unwrap_or_else(|| Vector3::new(0.0, 0.0, 1.0))
}

/// Triangulate one polygon face given by its 3D points
///
/// Returns triangle indices into `points` and the face normal. Falls back to
/// a fan when earcut fails.
pub fn triangulate_face(points: &[Point3<f64>]) -> Result<(Vec<usize>, Vector3<f64>)> {
    if points.len() < 3 {
        return Err(Error::triangulation(format!(
            "Face has {} points",
            points.len()
        )));
    }

    let normal = calculate_polygon_normal(points);
    let projected = project_to_2d(points, &normal);
    let indices = triangulate_polygon(&projected).unwrap_or_else(|e| {
        log::debug!("{}, using fan", e);
        fan_triangulate(points.len())
    });

    Ok((indices, normal))
}

/// Triangulate every face of a mesh into flat-shaded buffers
///
/// Each face contributes its own copy of its vertices so every vertex carries
/// the face normal. Faces with fewer than 3 indices or out-of-range indices
/// are skipped.
pub fn triangulate_mesh(mesh: &ResolvedMesh) -> MeshData {
    let mut out = MeshData::with_capacity(mesh.corner_count(), mesh.corner_count() * 3);

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let points = match face_points(mesh, face) {
            Ok(points) => points,
            Err(e) => {
                log::debug!("Skipping face {}: {}", face_index, e);
                continue;
            }
        };
        let (indices, normal) = match triangulate_face(&points) {
            Ok(result) => result,
            Err(e) => {
                log::debug!("Skipping face {}: {}", face_index, e);
                continue;
            }
        };

        let base = out.vertex_count() as u32;
        for p in &points {
            out.positions
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            out.normals
                .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
        }
        out.indices
            .extend(indices.into_iter().map(|i| base + i as u32));
    }

    out
}

/// Look up the positions of a face's vertex indices
fn face_points(mesh: &ResolvedMesh, face: &[u32]) -> Result<Vec<Point3<f64>>> {
    face.iter()
        .map(|&i| {
            mesh.vertices
                .get(i as usize)
                .map(|&[x, y, z]| Point3::new(x, y, z))
                .ok_or_else(|| Error::geometry(format!("Vertex index {} out of range", i)))
        })
        .collect()
}
