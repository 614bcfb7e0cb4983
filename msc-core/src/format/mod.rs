//! Binary format definitions for MSC descriptor files
//!
//! This module contains the wire layout of the header and of point records.
//! No I/O operations, only byte-level codecs over slices.

pub mod constants;
pub mod header;
pub mod record;

pub use header::MscHeader;
pub use record::{DescriptorPair, PointRecord, RecordLayout};
