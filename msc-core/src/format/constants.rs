//! Format constants for the MSC descriptor file

/// Width in bytes of every integer and float field in the file
pub const FIELD_SIZE: usize = 4;

/// Default ceiling on the number of scales a header may declare
///
/// Anything above this is almost certainly a foreign or corrupt file being
/// misread as a huge scale list.
pub const DEFAULT_MAX_SCALES: usize = 1_000_000;

/// Bytes taken by the fixed integer fields of the header
/// (point count, scale count, parameter count)
pub const HEADER_FIXED_SIZE: usize = 3 * FIELD_SIZE;

/// Values stored per scale in the descriptor section of a record (d1, d2)
pub const DESCRIPTOR_VALUES_PER_SCALE: usize = 2;

/// Auxiliary values stored per scale after the descriptors, skipped on read
pub const AUXILIARY_VALUES_PER_SCALE: usize = 1;

/// Height of the unit equilateral triangle, `sqrt(3) / 2`
pub const SQRT_3_OVER_2: f32 = 0.866_025_403_784_438_6;
