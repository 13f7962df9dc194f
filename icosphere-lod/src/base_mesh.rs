//! Coarse base meshes the icosphere is grown from.
//!
//! All base meshes are closed, have their vertices on the unit sphere and use
//! counter-clockwise winding when seen from outside.
use crate::{Error, Point, Result};
use std::f32::consts::SQRT_2;

/// Unit length tolerance for caller supplied base mesh vertices.
const UNIT_EPSILON: f32 = 1.0e-5;

/// Face indices of [`BaseMesh::tetrahedron()`].
pub const TETRAHEDRON_INDICES: [u32; 12] = [
    0, 1, 2, // front
    0, 3, 1, // right
    1, 3, 2, // left
    0, 2, 3, // bottom
];

#[rustfmt::skip]
const OCTAHEDRON_INDICES: [u32; 24] = [
    4, 0, 2,  4, 2, 1,  4, 1, 3,  4, 3, 0,
    5, 2, 0,  5, 1, 2,  5, 3, 1,  5, 0, 3,
];

#[rustfmt::skip]
const ICOSAHEDRON_INDICES: [u32; 60] = [
    0, 11, 5,   0, 5, 1,    0, 1, 7,    0, 7, 10,   0, 10, 11,
    1, 5, 9,    5, 11, 4,   11, 10, 2,  10, 7, 6,   7, 1, 8,
    3, 9, 4,    3, 4, 2,    3, 2, 6,    3, 6, 8,    3, 8, 9,
    4, 9, 5,    2, 4, 11,   6, 2, 10,   8, 6, 7,    9, 8, 1,
];

/// The level 0 mesh an [`IcoSphere`](crate::IcoSphere) starts from.
///
/// # Examples
///
/// ```
/// use icosphere_lod::BaseMesh;
///
/// let base = BaseMesh::tetrahedron();
/// assert_eq!(base.vertex_count(), 4);
/// assert_eq!(base.triangle_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BaseMesh {
    positions: Vec<Point>,
    indices: Vec<u32>,
}

impl BaseMesh {
    /// Create a base mesh from caller supplied data.
    ///
    /// Fails if the mesh has no triangles, if any index is out of bounds or if
    /// any vertex is not of unit length.
    pub fn new(positions: Vec<Point>, indices: Vec<u32>) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::InvalidTopology("base mesh has no triangles".into()));
        }
        crate::subdivide::validate_indices(&indices, positions.len())?;

        if let Some(vertex) = positions
            .iter()
            .position(|p| (p.mag() - 1.0).abs() > UNIT_EPSILON)
        {
            return Err(Error::InvalidTopology(format!(
                "base mesh vertex {vertex} is not on the unit sphere"
            )));
        }

        Ok(Self { positions, indices })
    }

    /// The regular tetrahedron inscribed in the unit sphere.
    ///
    /// Vertex count equals triangle count for this mesh and every subdivision
    /// level grown from it, which makes the midpoint index of triangle `i`
    /// exactly `triangle_count + 3 * i`.
    pub fn tetrahedron() -> Self {
        let sqrt_6 = 6.0f32.sqrt();
        Self {
            positions: vec![
                Point::new(0.0, 0.0, 1.0),
                Point::new(0.0, 2.0 * SQRT_2 / 3.0, -1.0 / 3.0),
                Point::new(-sqrt_6 / 3.0, -SQRT_2 / 3.0, -1.0 / 3.0),
                Point::new(sqrt_6 / 3.0, -SQRT_2 / 3.0, -1.0 / 3.0),
            ],
            indices: TETRAHEDRON_INDICES.to_vec(),
        }
    }

    /// The regular octahedron with its vertices on the coordinate axes.
    pub fn octahedron() -> Self {
        Self {
            positions: vec![
                Point::unit_x(),
                -Point::unit_x(),
                Point::unit_y(),
                -Point::unit_y(),
                Point::unit_z(),
                -Point::unit_z(),
            ],
            indices: OCTAHEDRON_INDICES.to_vec(),
        }
    }

    /// The regular icosahedron.
    pub fn icosahedron() -> Self {
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;
        let positions = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ]
        .into_iter()
        .map(|p| Point::from(p).normalized())
        .collect();

        Self {
            positions,
            indices: ICOSAHEDRON_INDICES.to_vec(),
        }
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Returns the flat triangle index list.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub(crate) fn into_parts(self) -> (Vec<Point>, Vec<u32>) {
        (self.positions, self.indices)
    }
}

impl Default for BaseMesh {
    /// The [`tetrahedron()`](BaseMesh::tetrahedron()).
    fn default() -> Self {
        Self::tetrahedron()
    }
}
