//! Validation for MSC headers, scale lists and point indices
//!
//! Pure functions with no I/O; both the stream reader and the in-memory
//! backends run the same checks.

pub mod bounds;
pub mod header;
pub mod scales;

pub use bounds::{check_batch, check_scale_selection, record_offset};
pub use header::{validate_param_count, validate_point_count, validate_scale_count};
pub use scales::{validate_scales, ScaleTolerance};
