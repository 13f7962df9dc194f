//! # Triangle Buffer Conversion
//!
//! Helpers for turning the current level of an [`IcoSphere`] into triangle
//! mesh buffers for use with realtime rendering.
use itertools::Itertools;
use slice_of_array::prelude::*;

use crate::{subdivide::validate_indices, IcoSphere, Point, Result};

static EPSILON: f32 = 0.00000001;

type Vector = ultraviolet::vec::Vec3;
type Normal = Vector;

/// Returns a flat [`u32`] triangle index buffer and two, flat matching point
/// and normal buffers.
///
/// All the faces are disconnected. I.e. every triangle gets its own three
/// points, all carrying the face normal. Use this for flat shading.
pub fn to_triangle_mesh_buffers(
    positions: &[Point],
    indices: &[u32],
) -> Result<(Vec<u32>, Vec<[f32; 3]>, Vec<[f32; 3]>)> {
    validate_indices(indices, positions.len())?;

    let (points, normals): (Vec<[f32; 3]>, Vec<[f32; 3]>) = indices
        .chunks_exact(3)
        .flat_map(|triangle| {
            let corners = index_as_points(triangle, positions);
            // Fall back to the sphere normal if the triangle is degenerate.
            let normal = face_normal(&corners).unwrap_or_else(|| {
                (corners[0] + corners[1] + corners[2]).normalized()
            });

            corners.into_iter().map(move |point| {
                ([point.x, point.y, point.z], [normal.x, normal.y, normal.z])
            })
        })
        .unzip();

    // Every corner is its own vertex now.
    let triangle_index = (0..points.len() as u32).collect();

    Ok((triangle_index, points, normals))
}

/// Returns the index buffer of the current display level and matching point
/// and normal buffers.
///
/// Only the vertices the current level can reference are included. On the
/// unit sphere the normal of a point is the point itself.
pub fn to_smooth_mesh_buffers(sphere: &IcoSphere) -> (Vec<u32>, Vec<[f32; 3]>, Vec<[f32; 3]>) {
    let points: &[[f32; 3]] = sphere.positions_flat().nest();
    let points = &points[..sphere.referenced_vertex_count()];

    let normals = points
        .iter()
        .map(|&point| {
            let normal = Normal::from(point).normalized();
            [normal.x, normal.y, normal.z]
        })
        .collect();

    (sphere.indices().to_vec(), points.to_vec(), normals)
}

#[inline]
fn orthogonal(v0: &Point, v1: &Point, v2: &Point) -> Vector {
    (*v1 - *v0).cross(*v2 - *v1)
}

#[inline]
fn index_as_points(triangle: &[u32], points: &[Point]) -> [Point; 3] {
    [
        points[triangle[0] as usize],
        points[triangle[1] as usize],
        points[triangle[2] as usize],
    ]
}

/// Computes the normal of a counter-clockwise face.
///
/// Returns `None` if the face is degenerate.
#[inline]
fn face_normal(points: &[Point]) -> Option<Normal> {
    let mut considered_edges = 0;

    let normal = points.iter().circular_tuple_windows::<(_, _, _)>().fold(
        Vector::zero(),
        |normal, corner| {
            let ortho_normal = orthogonal(corner.0, corner.1, corner.2);
            let mag_sq = ortho_normal.mag_sq();
            // Filter out collinear edge pairs.
            if mag_sq < EPSILON as _ {
                normal
            } else {
                considered_edges += 1;
                normal + ortho_normal / mag_sq.sqrt()
            }
        },
    );

    if 0 == considered_edges {
        None
    } else {
        Some(normal.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal_points_outward() {
        let points = [Point::unit_x(), Point::unit_y(), Point::unit_z()];
        let normal = face_normal(&points).unwrap();
        let expected = Vector::one().normalized();
        assert!((normal - expected).mag() < 1.0e-6);
    }

    #[test]
    fn test_degenerate_face() {
        let points = [Point::unit_x(), Point::unit_x(), Point::unit_x()];
        assert!(face_normal(&points).is_none());
    }
}
