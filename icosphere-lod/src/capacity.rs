//! Closed-form mesh sizes per level and the buffer capacity they imply.
//!
//! Every subdivision step quadruples the triangle count and appends three
//! vertices per old triangle. For a base mesh with `V` vertices and `T`
//! triangles this gives, at level `L`:
//!
//! ```text
//! triangles(L) = T * 4^L
//! vertices(L)  = V + T * (4^L - 1)
//! ```
//!
//! For the tetrahedron (`V = T = 4`) both are `4^(L + 1)`.
use crate::{BaseMesh, Error, Point, Result};

/// Highest level whose vertex indices are guaranteed to fit in a `u32` for
/// every built-in base mesh.
pub const MAX_SUPPORTED_LEVEL: usize = 13;

/// Returns the number of triangles at `level`.
///
/// # Examples
///
/// ```
/// use icosphere_lod::capacity::triangle_count;
///
/// assert_eq!(triangle_count(4, 0), 4);
/// assert_eq!(triangle_count(4, 1), 16);
/// assert_eq!(triangle_count(4, 8), 4usize.pow(9));
/// ```
#[inline]
pub const fn triangle_count(base_triangles: usize, level: usize) -> usize {
    base_triangles << (2 * level)
}

/// Returns the number of vertices in the position sequence once `level` has
/// been calculated.
///
/// # Examples
///
/// ```
/// use icosphere_lod::capacity::vertex_count;
///
/// assert_eq!(vertex_count(4, 4, 0), 4);
/// assert_eq!(vertex_count(4, 4, 1), 16);
/// ```
#[inline]
pub const fn vertex_count(base_vertices: usize, base_triangles: usize, level: usize) -> usize {
    base_vertices + triangle_count(base_triangles, level) - base_triangles
}

/// Buffer sizes needed to hold every level up to and including `max_level`.
///
/// Pre-size GPU buffers with [`position_buffer_size()`](Self::position_buffer_size())
/// and [`index_buffer_size()`](Self::index_buffer_size()) and they never need
/// to be reallocated, no matter how often the level is stepped up and down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capacity {
    max_level: usize,
    vertices: usize,
    triangles: usize,
}

impl Capacity {
    /// Capacity for `base` grown up to `max_level`.
    pub fn new(base: &BaseMesh, max_level: usize) -> Result<Self> {
        Self::from_counts(base.vertex_count(), base.triangle_count(), max_level)
    }

    /// Capacity for a base mesh with the given counts grown up to `max_level`.
    pub fn from_counts(
        base_vertices: usize,
        base_triangles: usize,
        max_level: usize,
    ) -> Result<Self> {
        if max_level > MAX_SUPPORTED_LEVEL {
            return Err(Error::LevelOutOfRange {
                level: max_level,
                max: MAX_SUPPORTED_LEVEL,
            });
        }

        let vertices = vertex_count(base_vertices, base_triangles, max_level);
        if vertices > u32::MAX as usize {
            return Err(Error::CapacityExceeded {
                required: vertices,
                capacity: u32::MAX as usize,
            });
        }

        Ok(Self {
            max_level,
            vertices,
            triangles: triangle_count(base_triangles, max_level),
        })
    }

    /// Returns the highest level this capacity covers.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Returns the maximum number of vertices.
    #[inline]
    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Returns the maximum number of triangles.
    #[inline]
    pub fn triangles(&self) -> usize {
        self.triangles
    }

    /// Returns the maximum number of index entries.
    #[inline]
    pub fn index_len(&self) -> usize {
        3 * self.triangles
    }

    /// Returns the size of a position buffer, in bytes.
    #[inline]
    pub fn position_buffer_size(&self) -> u64 {
        (self.vertices * std::mem::size_of::<Point>()) as _
    }

    /// Returns the size of a `u32` index buffer, in bytes.
    #[inline]
    pub fn index_buffer_size(&self) -> u64 {
        (self.index_len() * std::mem::size_of::<u32>()) as _
    }

    /// Check that sequences of the given lengths fit.
    pub fn check(&self, positions_len: usize, indices_len: usize) -> Result<()> {
        if positions_len > self.vertices {
            Err(Error::CapacityExceeded {
                required: positions_len,
                capacity: self.vertices,
            })
        } else if indices_len > self.index_len() {
            Err(Error::CapacityExceeded {
                required: indices_len,
                capacity: self.index_len(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tetrahedron_capacity() {
        let capacity = Capacity::new(&BaseMesh::tetrahedron(), 8).unwrap();
        assert_eq!(capacity.vertices(), 4usize.pow(9));
        assert_eq!(capacity.triangles(), 4usize.pow(9));
        assert_eq!(capacity.index_len(), 3 * 4usize.pow(9));
        assert_eq!(capacity.position_buffer_size(), 12 * 4u64.pow(9));
        assert_eq!(capacity.index_buffer_size(), 12 * 4u64.pow(9));
    }

    #[test]
    fn test_vertex_growth() {
        for level in 0..10 {
            assert_eq!(
                vertex_count(12, 20, level + 1),
                vertex_count(12, 20, level) + 3 * triangle_count(20, level)
            );
        }
    }

    #[test]
    fn test_max_level_limit() {
        assert!(Capacity::new(&BaseMesh::icosahedron(), MAX_SUPPORTED_LEVEL).is_ok());
        assert!(matches!(
            Capacity::new(&BaseMesh::tetrahedron(), MAX_SUPPORTED_LEVEL + 1),
            Err(Error::LevelOutOfRange { .. })
        ));
    }

    #[test]
    fn test_check() {
        let capacity = Capacity::new(&BaseMesh::tetrahedron(), 1).unwrap();
        assert!(capacity.check(16, 48).is_ok());
        assert!(capacity.check(17, 48).is_err());
        assert!(capacity.check(16, 51).is_err());
    }
}
