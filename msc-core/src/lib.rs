#![no_std]

//! MSC Core - Multi-Scale descriptor format definitions
//!
//! This crate provides the format definitions, validation rules and
//! traits for MSC files, the per-point multi-scale dimensionality
//! descriptors written by point cloud classification pipelines. It performs
//! no I/O; see the `msc` crate for readers over files and memory maps.

extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod transform;
pub mod validation;

pub use error::*;
pub use format::constants::{DEFAULT_MAX_SCALES, FIELD_SIZE};
pub use format::{DescriptorPair, MscHeader, PointRecord, RecordLayout};
pub use traits::*;
pub use transform::{barycentric_to_planar, Transform};
pub use validation::{validate_scales, ScaleTolerance};
