//! Level-of-detail control.
//!
//! [`IcoSphere`] owns the position and index sequences together with the two
//! level counters and is the only thing allowed to change them:
//!
//! * [`increase()`](IcoSphere::increase()) – Steps one level up. Runs
//!   [`subdivide()`](crate::subdivide()) the first time a level is visited
//!   and the much cheaper
//!   [`resubdivide_indices()`](crate::resubdivide_indices()) afterwards.
//! * [`decrease()`](IcoSphere::decrease()) – Steps one level down with
//!   [`coarsen()`](crate::coarsen()).
//!
//! Vertices are never removed. Going down only stops referencing the newest
//! ones, so going back up is pure index arithmetic.
use crate::{
    capacity::Capacity,
    subdivide::{coarsen, resubdivide_indices_from, subdivide},
    BaseMesh, Error, Point, Result,
};
use derive_more::Display;
use log::{debug, warn};

/// Options for creating an [`IcoSphere`].
///
/// # Examples
///
/// ```
/// use icosphere_lod::IcoSphereOptions;
///
/// // Eagerly compute the first six levels.
/// let options = IcoSphereOptions {
///     initial_level: 6,
///     ..Default::default()
/// };
/// assert_eq!(options.max_level, 8);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IcoSphereOptions {
    /// Highest level that can be displayed. Determines the buffer
    /// [`Capacity`].
    pub max_level: usize,
    /// Level to subdivide to on creation.
    pub initial_level: usize,
}

impl Default for IcoSphereOptions {
    /// Create options with the following defaults:
    ///
    /// | Property        | Value |
    /// |-----------------|-------|
    /// | `max_level`     | `8`   |
    /// | `initial_level` | `0`   |
    fn default() -> Self {
        Self {
            max_level: 8,
            initial_level: 0,
        }
    }
}

/// What a level transition did.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum LevelChange {
    /// New vertices were computed for a level never visited before.
    #[display("subdivided")]
    Subdivided,
    /// The index sequence of a previously calculated level was rebuilt.
    #[display("resubdivided")]
    Resubdivided,
    /// One level was dropped.
    #[display("coarsened")]
    Coarsened,
    /// The transition was not enabled at the current level.
    #[display("unchanged")]
    Unchanged,
}

/// A unit sphere approximated by a recursively subdivided base mesh, whose
/// displayed level of detail can be stepped up and down.
///
/// # Examples
///
/// ```
/// use icosphere_lod::{IcoSphere, IcoSphereOptions, LevelChange};
///
/// let mut sphere = IcoSphere::new(IcoSphereOptions::default())?;
///
/// assert_eq!(sphere.increase()?, LevelChange::Subdivided);
/// assert_eq!(sphere.decrease()?, LevelChange::Coarsened);
/// assert_eq!(sphere.increase()?, LevelChange::Resubdivided);
///
/// assert_eq!(sphere.display_level(), 1);
/// assert_eq!(sphere.calculated_level(), 1);
/// assert_eq!(sphere.triangle_count(), 16);
/// # Ok::<(), icosphere_lod::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct IcoSphere {
    positions: Vec<Point>,
    indices: Vec<u32>,
    display_level: usize,
    calculated_level: usize,
    // Length of `positions` when each level was subdivided, i.e. the index of
    // the first midpoint appended for that level. Has `calculated_level`
    // entries.
    first_midpoints: Vec<usize>,
    capacity: Capacity,
}

impl IcoSphere {
    /// Create a sphere grown from [`BaseMesh::tetrahedron()`].
    pub fn new(options: IcoSphereOptions) -> Result<Self> {
        Self::with_base_mesh(BaseMesh::tetrahedron(), options)
    }

    /// Create a sphere grown from `base`.
    ///
    /// The position and index sequences are allocated with the full
    /// [`Capacity`] for `options.max_level` up front.
    pub fn with_base_mesh(base: BaseMesh, options: IcoSphereOptions) -> Result<Self> {
        let capacity = Capacity::new(&base, options.max_level)?;
        if options.initial_level > options.max_level {
            return Err(Error::LevelOutOfRange {
                level: options.initial_level,
                max: options.max_level,
            });
        }

        let (base_positions, base_indices) = base.into_parts();

        let mut positions = Vec::with_capacity(capacity.vertices());
        positions.extend(base_positions);
        let mut indices = Vec::with_capacity(capacity.index_len());
        indices.extend(base_indices);

        let mut sphere = Self {
            positions,
            indices,
            display_level: 0,
            calculated_level: 0,
            first_midpoints: Vec::with_capacity(options.max_level),
            capacity,
        };

        for _ in 0..options.initial_level {
            sphere.increase()?;
        }

        Ok(sphere)
    }

    /// Step one level up.
    ///
    /// Does nothing and returns [`LevelChange::Unchanged`] at
    /// [`max_level()`](Self::max_level()).
    pub fn increase(&mut self) -> Result<LevelChange> {
        if self.display_level >= self.max_level() {
            warn!("increase ignored: already at max level {}", self.max_level());
            return Ok(LevelChange::Unchanged);
        }

        let change = if self.display_level == self.calculated_level {
            self.capacity.check(
                self.positions.len() + self.indices.len(),
                4 * self.indices.len(),
            )?;

            let first_midpoint = self.positions.len();
            let children = subdivide(&mut self.positions, &self.indices)?;
            self.replace_indices(&children);
            self.first_midpoints.push(first_midpoint);
            self.calculated_level += 1;

            LevelChange::Subdivided
        } else {
            let children = resubdivide_indices_from(
                &self.indices,
                self.first_midpoints[self.display_level],
                self.positions.len(),
            )?;
            self.replace_indices(&children);

            LevelChange::Resubdivided
        };
        self.display_level += 1;

        debug!(
            "{change} to level {}: {} triangles, {} of {} vertices referenced",
            self.display_level,
            self.triangle_count(),
            self.referenced_vertex_count(),
            self.positions.len()
        );

        Ok(change)
    }

    /// Step one level down.
    ///
    /// Does nothing and returns [`LevelChange::Unchanged`] at level `0`.
    pub fn decrease(&mut self) -> Result<LevelChange> {
        if 0 == self.display_level {
            warn!("decrease ignored: already at level 0");
            return Ok(LevelChange::Unchanged);
        }

        let parents = coarsen(&self.indices)?;
        self.replace_indices(&parents);
        self.display_level -= 1;

        debug!(
            "coarsened to level {}: {} triangles",
            self.display_level,
            self.triangle_count()
        );

        Ok(LevelChange::Coarsened)
    }

    // `indices` keeps the storage allocated for the full capacity.
    fn replace_indices(&mut self, indices: &[u32]) {
        self.indices.clear();
        self.indices.extend_from_slice(indices);
    }

    /// Step up or down until `level` is displayed.
    ///
    /// # Errors
    ///
    /// [`Error::LevelOutOfRange`] if `level` is above
    /// [`max_level()`](Self::max_level()). The sphere is unchanged in that
    /// case.
    pub fn set_level(&mut self, level: usize) -> Result<()> {
        if level > self.max_level() {
            return Err(Error::LevelOutOfRange {
                level,
                max: self.max_level(),
            });
        }

        while self.display_level < level {
            self.increase()?;
        }
        while self.display_level > level {
            self.decrease()?;
        }

        Ok(())
    }

    /// Returns the currently displayed level.
    #[inline]
    pub fn display_level(&self) -> usize {
        self.display_level
    }

    /// Returns the highest level vertices were computed for.
    #[inline]
    pub fn calculated_level(&self) -> usize {
        self.calculated_level
    }

    /// Returns the highest level that can be displayed.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.capacity.max_level()
    }

    /// Returns the buffer capacity needed for [`max_level()`](Self::max_level()).
    #[inline]
    pub fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    /// Returns all vertices computed so far, including those not referenced at
    /// the current display level.
    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Returns the triangle indices of the current display level.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the positions as a flat `[x0, y0, z0, x1, ...]` slice.
    #[inline]
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Returns the positions as raw bytes, ready to be written to a vertex
    /// buffer.
    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Returns the indices as raw bytes, ready to be written to a `u32` index
    /// buffer.
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Returns the number of triangles at the current display level.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the number of vertices computed so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of leading vertices the current display level can
    /// reference.
    pub fn referenced_vertex_count(&self) -> usize {
        self.first_midpoints
            .get(self.display_level)
            .copied()
            .unwrap_or(self.positions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_level_out_of_range() {
        let result = IcoSphere::new(IcoSphereOptions {
            max_level: 2,
            initial_level: 3,
        });
        assert!(matches!(
            result,
            Err(Error::LevelOutOfRange { level: 3, max: 2 })
        ));
    }

    #[test]
    fn test_referenced_vertex_count() {
        let mut sphere = IcoSphere::new(IcoSphereOptions {
            max_level: 3,
            initial_level: 3,
        })
        .unwrap();
        assert_eq!(sphere.referenced_vertex_count(), 256);

        sphere.set_level(1).unwrap();
        assert_eq!(sphere.referenced_vertex_count(), 16);
        assert_eq!(sphere.vertex_count(), 256);
    }

    #[test]
    fn test_level_change_display() {
        assert_eq!(LevelChange::Resubdivided.to_string(), "resubdivided");
    }
}
