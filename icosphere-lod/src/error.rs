//! Error types for the icosphere-lod crate.

use thiserror::Error;

/// Main error type for icosphere-lod operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An index does not refer to an existing entry in the position sequence.
    #[error("Index {index} out of bounds (vertex count: {vertex_count})")]
    InvalidIndexReference { index: usize, vertex_count: usize },

    /// Growth would exceed the pre-sized buffer capacity.
    #[error("Capacity exceeded: {required} required, {capacity} available")]
    CapacityExceeded { required: usize, capacity: usize },

    /// The midpoint of two vertices has (close to) zero length and can not be
    /// projected onto the unit sphere.
    #[error("Degenerate edge between vertices {a} and {b}")]
    DegenerateGeometry { a: u32, b: u32 },

    /// An index sequence length is not a multiple of the required group size.
    #[error("Invalid index count: {len} is not a multiple of {multiple}")]
    InvalidIndexCount { len: usize, multiple: usize },

    /// Invalid topology, e.g. index groups not produced by subdivision.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// A level outside of `[0, max]` was requested.
    #[error("Level {level} out of range (max: {max})")]
    LevelOutOfRange { level: usize, max: usize },

    /// IO error for file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
