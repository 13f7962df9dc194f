//! The three operations that move an index sequence between levels.
//!
//! * [`subdivide()`] – Splits every triangle into four, appending three new
//!   vertices per triangle to the position sequence.
//! * [`resubdivide_indices()`] – Rebuilds the index sequence of a level whose
//!   vertices were already appended by an earlier [`subdivide()`] call.
//! * [`coarsen()`] – Recovers the parent triangles from a subdivided index
//!   sequence.
//!
//! ## Index Layout
//!
//! [`subdivide()`] walks the triangles in sequence order and appends the
//! midpoints `m01`, `m12`, `m20` of triangle `i` at
//!
//! ```text
//! first_midpoint + 3 * i + {0, 1, 2}
//! ```
//!
//! where `first_midpoint` is the length of the position sequence before the
//! call. Each parent `(i0, i1, i2)` is then replaced by twelve index entries:
//!
//! ```text
//! offset:  0    1    2  |  3    4    5  |  6    7    8  |  9   10   11
//!          i0  c01  c20 | c20  c01  c12 | c12  c01  i1  | c20  c12  i2
//! ```
//!
//! [`resubdivide_indices()`] relies on the first rule to recompute the
//! midpoint indices without touching any vertex. [`coarsen()`] relies on the
//! second to read the parent corners back from offsets `0`, `8` and `11`.
//!
//! Midpoints are not shared between adjacent triangles. Every edge midpoint is
//! appended once per triangle that contains the edge.
use crate::{Error, Point, Result};
use log::trace;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Number of child triangles a triangle is split into.
pub const CHILDREN_PER_TRIANGLE: usize = 4;

/// Number of index entries the children of one parent triangle occupy.
pub const CHILD_GROUP_LEN: usize = 3 * CHILDREN_PER_TRIANGLE;

/// Offsets of the parent corners inside a group of [`CHILD_GROUP_LEN`]
/// entries.
pub const CORNER_OFFSETS: [usize; 3] = [0, 8, 11];

/// Squared length below which an edge midpoint is considered degenerate.
static EPSILON: f32 = 1.0e-12;

/// Subdivide every triangle of `indices` into four.
///
/// Three new vertices per triangle are appended to `positions`. The returned
/// index sequence replaces `indices`.
///
/// The call is atomic: if it fails `positions` is left untouched.
///
/// # Errors
///
/// * [`Error::InvalidIndexCount`] if `indices.len()` is not a multiple of 3.
/// * [`Error::InvalidIndexReference`] if an index is out of bounds.
/// * [`Error::DegenerateGeometry`] if an edge connects antipodal vertices.
/// * [`Error::CapacityExceeded`] if a new index would not fit in a `u32`.
///
/// # Examples
///
/// ```
/// use icosphere_lod::{subdivide, BaseMesh};
///
/// let base = BaseMesh::tetrahedron();
/// let mut positions = base.positions().to_vec();
///
/// let indices = subdivide(&mut positions, base.indices())?;
///
/// assert_eq!(indices.len(), 48);
/// assert_eq!(positions.len(), 16);
/// # Ok::<(), icosphere_lod::Error>(())
/// ```
pub fn subdivide(positions: &mut Vec<Point>, indices: &[u32]) -> Result<Vec<u32>> {
    validate_indices(indices, positions.len())?;

    let first_midpoint = positions.len();
    let new_vertex_count = first_midpoint + indices.len();
    if new_vertex_count > u32::MAX as usize {
        return Err(Error::CapacityExceeded {
            required: new_vertex_count,
            capacity: u32::MAX as usize,
        });
    }

    let midpoints = triangle_midpoints(positions, indices)?;

    trace!(
        "subdivide: {} triangles, appending {} vertices at {}",
        indices.len() / 3,
        3 * midpoints.len(),
        first_midpoint
    );

    positions.reserve(3 * midpoints.len());
    positions.extend(midpoints.into_iter().flatten());

    Ok(emit_children(indices, first_midpoint as u32))
}

/// Rebuild the index sequence one level up without computing vertices.
///
/// This is the documented fast path for a tetrahedron grown mesh. The
/// midpoints of triangle `i` are taken to live at
/// `triangle_count + 3 * i + {0, 1, 2}`. That holds whenever the vertex
/// count at the level of `indices` equals its triangle count, which is the
/// case for every level grown from
/// [`BaseMesh::tetrahedron()`](crate::BaseMesh::tetrahedron()).
///
/// For other base meshes use [`resubdivide_indices_from()`].
///
/// `vertex_count` is the current length of the position sequence. It is only
/// used to guard against generating indices for vertices that were never
/// appended.
///
/// # Errors
///
/// * [`Error::InvalidIndexCount`] if `indices.len()` is not a multiple of 3.
/// * [`Error::InvalidIndexReference`] if the level above was never
///   subdivided, i.e. a generated index would be `>= vertex_count`.
/// * [`Error::CapacityExceeded`] if a generated index does not fit in a
///   `u32`.
///
/// # Examples
///
/// ```
/// use icosphere_lod::{coarsen, resubdivide_indices, subdivide, BaseMesh};
///
/// let base = BaseMesh::tetrahedron();
/// let mut positions = base.positions().to_vec();
///
/// let fine = subdivide(&mut positions, base.indices())?;
/// let coarse = coarsen(&fine)?;
///
/// assert_eq!(resubdivide_indices(&coarse, positions.len())?, fine);
/// # Ok::<(), icosphere_lod::Error>(())
/// ```
pub fn resubdivide_indices(indices: &[u32], vertex_count: usize) -> Result<Vec<u32>> {
    check_index_count(indices.len(), 3)?;
    resubdivide_indices_from(indices, indices.len() / 3, vertex_count)
}

/// Rebuild the index sequence one level up, with the midpoints of triangle `i`
/// at `first_midpoint + 3 * i + {0, 1, 2}`.
///
/// `first_midpoint` must be the length the position sequence had when
/// [`subdivide()`] was called on this level.
///
/// # Errors
///
/// See [`resubdivide_indices()`].
pub fn resubdivide_indices_from(
    indices: &[u32],
    first_midpoint: usize,
    vertex_count: usize,
) -> Result<Vec<u32>> {
    validate_indices(indices, vertex_count)?;

    // One past the last midpoint index emitted.
    let required = first_midpoint
        .checked_add(indices.len())
        .filter(|&required| required <= u32::MAX as usize)
        .ok_or(Error::CapacityExceeded {
            required: first_midpoint.saturating_add(indices.len()),
            capacity: u32::MAX as usize,
        })?;
    if required > vertex_count {
        return Err(Error::InvalidIndexReference {
            index: required - 1,
            vertex_count,
        });
    }

    trace!(
        "resubdivide: {} triangles, midpoints from {}",
        indices.len() / 3,
        first_midpoint
    );

    // `required <= u32::MAX`, so every midpoint index fits.
    Ok(emit_children(indices, first_midpoint as u32))
}

/// Replace every group of four child triangles with their parent.
///
/// The parent corners are read from offsets `0`, `8` and `11` of each group
/// of twelve index entries. This is the exact inverse of one [`subdivide()`]
/// or [`resubdivide_indices()`] step on the index sequence. Positions are not
/// involved; vertices only referenced by the removed children stay in the
/// position sequence.
///
/// # Errors
///
/// * [`Error::InvalidIndexCount`] if `indices.len()` is not a multiple of 12.
/// * [`Error::InvalidTopology`] if a group does not have the layout a
///   subdivision step produces. Only checked with the `topology_validation`
///   feature.
///
/// # Examples
///
/// ```
/// use icosphere_lod::{coarsen, subdivide, BaseMesh};
///
/// let base = BaseMesh::tetrahedron();
/// let mut positions = base.positions().to_vec();
///
/// let fine = subdivide(&mut positions, base.indices())?;
///
/// assert_eq!(coarsen(&fine)?, base.indices());
/// # Ok::<(), icosphere_lod::Error>(())
/// ```
pub fn coarsen(indices: &[u32]) -> Result<Vec<u32>> {
    check_index_count(indices.len(), CHILD_GROUP_LEN)?;

    #[cfg(feature = "topology_validation")]
    for (group_index, group) in indices.chunks_exact(CHILD_GROUP_LEN).enumerate() {
        validate_child_group(group_index, group)?;
    }

    trace!("coarsen: {} triangles", indices.len() / 3);

    Ok(indices
        .chunks_exact(CHILD_GROUP_LEN)
        .flat_map(|group| CORNER_OFFSETS.map(|offset| group[offset]))
        .collect())
}

/// Check that every index refers to one of `vertex_count` vertices.
pub(crate) fn validate_indices(indices: &[u32], vertex_count: usize) -> Result<()> {
    check_index_count(indices.len(), 3)?;

    match indices.iter().find(|&&index| index as usize >= vertex_count) {
        Some(&index) => Err(Error::InvalidIndexReference {
            index: index as _,
            vertex_count,
        }),
        None => Ok(()),
    }
}

#[inline]
fn check_index_count(len: usize, multiple: usize) -> Result<()> {
    if 0 == len % multiple {
        Ok(())
    } else {
        Err(Error::InvalidIndexCount { len, multiple })
    }
}

/// Emit the four children of every triangle, numbering the midpoints from
/// `first_midpoint`.
fn emit_children(indices: &[u32], first_midpoint: u32) -> Vec<u32> {
    let mut children = Vec::with_capacity(CHILDREN_PER_TRIANGLE * indices.len());

    for (i, triangle) in indices.chunks_exact(3).enumerate() {
        let (i0, i1, i2) = (triangle[0], triangle[1], triangle[2]);
        let c01 = first_midpoint + 3 * i as u32;
        let (c12, c20) = (c01 + 1, c01 + 2);

        children.extend_from_slice(&[
            i0, c01, c20, //
            c20, c01, c12, //
            c12, c01, i1, //
            c20, c12, i2,
        ]);
    }

    children
}

#[cfg(feature = "rayon")]
fn triangle_midpoints(positions: &[Point], indices: &[u32]) -> Result<Vec<[Point; 3]>> {
    indices
        .par_chunks_exact(3)
        .map(|triangle| midpoints(positions, triangle))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn triangle_midpoints(positions: &[Point], indices: &[u32]) -> Result<Vec<[Point; 3]>> {
    indices
        .chunks_exact(3)
        .map(|triangle| midpoints(positions, triangle))
        .collect()
}

#[inline]
fn midpoints(positions: &[Point], triangle: &[u32]) -> Result<[Point; 3]> {
    let (i0, i1, i2) = (triangle[0], triangle[1], triangle[2]);
    Ok([
        spherical_midpoint(positions, i0, i1)?,
        spherical_midpoint(positions, i1, i2)?,
        spherical_midpoint(positions, i2, i0)?,
    ])
}

/// The midpoint of the edge `a`–`b` projected onto the unit sphere.
#[inline]
fn spherical_midpoint(positions: &[Point], a: u32, b: u32) -> Result<Point> {
    let sum = positions[a as usize] + positions[b as usize];
    let mag_sq = sum.mag_sq();

    if mag_sq < EPSILON {
        Err(Error::DegenerateGeometry { a, b })
    } else {
        Ok(sum / mag_sq.sqrt())
    }
}

#[cfg(feature = "topology_validation")]
fn validate_child_group(group_index: usize, group: &[u32]) -> Result<()> {
    // Every midpoint occurs three times in a group.
    let c01 = [group[1], group[4], group[7]];
    let c12 = [group[5], group[6], group[10]];
    let c20 = [group[2], group[3], group[9]];

    for (name, occurrences) in [("c01", c01), ("c12", c12), ("c20", c20)] {
        if occurrences.iter().any(|&index| index != occurrences[0]) {
            return Err(Error::InvalidTopology(format!(
                "child group {group_index} has inconsistent midpoint {name}: {occurrences:?}"
            )));
        }
    }

    Ok(())
}
