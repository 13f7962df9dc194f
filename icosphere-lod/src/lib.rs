//! # Icosphere Level-of-Detail Engine
//!
//! Builds a sphere by recursively subdividing the triangles of a coarse base
//! mesh and projecting every new vertex onto the unit sphere. The displayed
//! level of detail can be stepped up and down at interactive rates.
//!
//! The crate only computes CPU-side geometry. Position and index buffers are
//! handed to the caller as flat slices to be uploaded to whatever graphics API
//! is in use.
//!
//! ## Usage
//!
//! ```
//! use icosphere_lod::{IcoSphere, IcoSphereOptions};
//!
//! let mut sphere = IcoSphere::new(IcoSphereOptions {
//!     max_level: 8,
//!     initial_level: 2,
//! })?;
//!
//! // Allocate GPU buffers once, large enough for every level.
//! let position_buffer_size = sphere.capacity().position_buffer_size();
//! let index_buffer_size = sphere.capacity().index_buffer_size();
//! # let _ = (position_buffer_size, index_buffer_size);
//!
//! // On user input step the level and re-upload.
//! sphere.increase()?;
//! let (positions, indices) = (sphere.position_bytes(), sphere.index_bytes());
//! # let _ = (positions, indices);
//! # Ok::<(), icosphere_lod::Error>(())
//! ```
//!
//! ## Levels
//!
//! Two counters are tracked. The *display level* is what the index sequence
//! currently describes. The *calculated level* is the highest level vertices
//! were ever computed for. Stepping up to a level at or below the calculated
//! level never touches a float; it only rebuilds the index sequence.
//!
//! Vertices are not shared between adjacent triangles. Every triangle gets
//! its own three edge midpoints, which keeps the index arithmetic closed-form
//! and matches the buffer [`Capacity`](capacity::Capacity) of `4^(L + 1)`
//! vertices for a tetrahedron grown to level `L`.
//!
//! ## Cargo Features
#![doc = document_features::document_features!()]

pub mod base_mesh;
pub mod capacity;
pub mod error;
pub mod lod;
pub mod obj_export;
pub mod subdivide;

#[cfg(feature = "tri_mesh_buffers")]
pub mod tri_mesh_buffers;

pub use base_mesh::BaseMesh;
pub use error::{Error, Result};
pub use lod::{IcoSphere, IcoSphereOptions, LevelChange};
pub use subdivide::{coarsen, resubdivide_indices, resubdivide_indices_from, subdivide};

/// A vertex position on the unit sphere.
pub type Point = ultraviolet::vec::Vec3;
