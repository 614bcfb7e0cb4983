//! MSC - Reader for multi-scale descriptor files
//!
//! MSC files hold, for every point of a cloud, a fixed set of parameters
//! followed by a pair of dimensionality descriptors per scale. This crate
//! reads them by index or sequentially, checks files against each other, and
//! writes new ones.
//!
//! ## Architecture
//!
//! - **msc-core**: Format definitions, validation and traits (no I/O)
//! - **msc**: Stream and memory-mapped readers, writer, batch helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use msc::{MscFileReader, Transform};
//!
//! fn example() -> msc::Result<()> {
//!     let mut reader = MscFileReader::open("scene.msc")?;
//!     let (points, scales, params) = reader.get_header();
//!     println!("{points} points, {} scales, {params} params", scales.len());
//!
//!     // Ten points from the cursor, projected onto the triangle plane
//!     for point in reader.read_points(10, None, Transform::Planar)? {
//!         println!("{:?} {:?}", point.params, point.descriptors);
//!     }
//!
//!     // Random access does not need the cursor
//!     let last = reader.read_point(Some(points - 1), Transform::Raw)?;
//!     println!("{:?}", last.descriptors);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap**: [`MappedFile`] backend for `&self` random access and parallel scans
//! - **serde**: JSON configuration and serializable headers, records and matrices
//! - **cli**: the `msc` command line tool

pub use msc_core::{
    // Format definitions
    DescriptorPair, MscHeader, PointRecord, RecordLayout, DEFAULT_MAX_SCALES, FIELD_SIZE,
    // Traits
    PointSource, StorageBackend,
    // Errors
    ErrorCategory, FormatViolation, MscError, ScaleMismatch,
    // Transform and validation
    barycentric_to_planar, validate_scales, ScaleTolerance, Transform,
};

pub mod bulk;
pub mod config;
pub mod error;
pub mod mapped;
pub mod matrix;
pub mod scale_set;
pub mod stream;
pub mod writer;

pub use bulk::{read_msc_data, read_msc_data_with, read_msc_header, read_msc_header_with};
pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use mapped::MappedMscFile;
pub use matrix::{read_matrix, DescriptorMatrix, MatrixRequest};
pub use scale_set::ScaleSet;
pub use stream::{MscFileReader, Points};
pub use writer::MscWriter;

#[cfg(feature = "mmap")]
pub use mapped::MappedFile;
