//! MSC file header
//!
//! The header is variable length: three little-endian `i32` counts with the
//! scale list in between.
//!
//! ```text
//! [i32] point_count
//! [i32] scale_count
//! [f32 * scale_count] scales
//! [i32] param_count
//! ```
//!
//! Point records start immediately after `param_count`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use alloc::vec::Vec;

use super::constants::{FIELD_SIZE, HEADER_FIXED_SIZE};
use super::record::RecordLayout;
use crate::error::{FormatViolation, MscError, Result};
use crate::validation::{
    record_offset, validate_param_count, validate_point_count, validate_scale_count,
};

/// Parsed header of an MSC file plus the derived record geometry
///
/// Immutable once built; `data_start_offset` and `record_byte_length`
/// locate every point record in O(1).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "UncheckedHeader")
)]
pub struct MscHeader {
    point_count: usize,
    scales: Vec<f32>,
    param_count: usize,
    data_start_offset: u64,
    record_byte_length: u64,
}

impl MscHeader {
    /// Build a header for a file whose first byte is the header
    ///
    /// Runs the same sanity checks a reader would, so a header built here
    /// always reads back.
    pub fn new(point_count: usize, scales: Vec<f32>, param_count: usize) -> Result<Self> {
        check_counts(point_count, scales.len(), param_count)?;

        let layout = RecordLayout::new(param_count, scales.len());
        let record_byte_length = layout.byte_len()? as u64;
        let data_start_offset = Self::encoded_len(scales.len())? as u64;

        Ok(Self {
            point_count,
            scales,
            param_count,
            data_start_offset,
            record_byte_length,
        })
    }

    /// Assemble a header from values already read and validated from a stream
    ///
    /// Performs no checks; run [`MscHeader::validate`] before trusting the
    /// result anywhere else.
    #[doc(hidden)]
    pub fn from_parts(
        point_count: usize,
        scales: Vec<f32>,
        param_count: usize,
        data_start_offset: u64,
        record_byte_length: u64,
    ) -> Self {
        Self {
            point_count,
            scales,
            param_count,
            data_start_offset,
            record_byte_length,
        }
    }

    /// Re-run the header checks on an already built header
    ///
    /// Counts must be positive (parameters may be zero) and fit the on-disk
    /// `i32` fields, the record length must match the layout, and the data
    /// must not start inside the header.
    pub fn validate(&self) -> Result<()> {
        check_counts(self.point_count, self.scales.len(), self.param_count)?;

        let record_byte_length = self.layout().byte_len()?;
        if self.record_byte_length != record_byte_length as u64 {
            return Err(geometry_violation(
                "record_byte_length",
                record_byte_length,
                self.record_byte_length,
            ));
        }

        let header_len = Self::encoded_len(self.scales.len())?;
        if self.data_start_offset < header_len as u64 {
            return Err(geometry_violation(
                "data_start_offset",
                header_len,
                self.data_start_offset,
            ));
        }
        Ok(())
    }

    /// Parse a header from the start of `bytes`
    ///
    /// `max_scales` caps the declared scale count before any allocation.
    /// The record length comes from the layout rather than a probe read since
    /// the whole buffer is already addressable.
    pub fn from_bytes(bytes: &[u8], max_scales: usize) -> Result<Self> {
        let point_count = validate_point_count(read_i32(bytes, 0)?)?;
        let scale_count = validate_scale_count(read_i32(bytes, FIELD_SIZE)?, max_scales)?;

        let scales_start = 2 * FIELD_SIZE;
        let mut scales = Vec::with_capacity(scale_count);
        for i in 0..scale_count {
            scales.push(read_f32(bytes, scales_start + i * FIELD_SIZE)?);
        }

        let param_pos = scales_start + scale_count * FIELD_SIZE;
        let param_count = validate_param_count(read_i32(bytes, param_pos)?)?;

        let layout = RecordLayout::new(param_count, scale_count);
        Ok(Self {
            point_count,
            scales,
            param_count,
            data_start_offset: (param_pos + FIELD_SIZE) as u64,
            record_byte_length: layout.byte_len()? as u64,
        })
    }

    /// Serialize the header fields in file order
    ///
    /// Counts are narrowed to the on-disk `i32` fields; headers from
    /// [`MscHeader::new`] or a reader always fit, others should pass
    /// [`MscHeader::validate`] first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_FIXED_SIZE + self.scales.len() * FIELD_SIZE);
        bytes.extend_from_slice(&(self.point_count as i32).to_le_bytes());
        bytes.extend_from_slice(&(self.scales.len() as i32).to_le_bytes());
        for scale in &self.scales {
            bytes.extend_from_slice(&scale.to_le_bytes());
        }
        bytes.extend_from_slice(&(self.param_count as i32).to_le_bytes());
        bytes
    }

    /// Size in bytes of a header declaring `scale_count` scales
    pub fn encoded_len(scale_count: usize) -> Result<usize> {
        scale_count
            .checked_mul(FIELD_SIZE)
            .and_then(|n| n.checked_add(HEADER_FIXED_SIZE))
            .ok_or(MscError::InvalidFormat(FormatViolation::SizeOverflow))
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn scale_count(&self) -> usize {
        self.scales.len()
    }

    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Offset of the first point record
    pub fn data_start_offset(&self) -> u64 {
        self.data_start_offset
    }

    /// Bytes occupied by every point record
    pub fn record_byte_length(&self) -> u64 {
        self.record_byte_length
    }

    /// Record shape implied by the counts
    pub fn layout(&self) -> RecordLayout {
        RecordLayout::new(self.param_count, self.scales.len())
    }

    /// `(point_count, scales, param_count)`
    pub fn summary(&self) -> (usize, &[f32], usize) {
        (self.point_count, &self.scales, self.param_count)
    }

    /// File offset of point `index`; does not check `index` against the count
    pub fn record_offset(&self, index: usize) -> Result<u64> {
        record_offset(self.data_start_offset, self.record_byte_length, index)
    }

    /// Offset one past the last record the header declares
    pub fn expected_file_len(&self) -> Result<u64> {
        self.record_offset(self.point_count)
    }
}

fn check_counts(point_count: usize, scale_count: usize, param_count: usize) -> Result<()> {
    let as_i32 = |n: usize| {
        i32::try_from(n).map_err(|_| MscError::InvalidFormat(FormatViolation::SizeOverflow))
    };
    validate_point_count(as_i32(point_count)?)?;
    validate_scale_count(as_i32(scale_count)?, usize::MAX)?;
    validate_param_count(as_i32(param_count)?)?;
    Ok(())
}

fn geometry_violation(field: &'static str, expected: usize, found: u64) -> MscError {
    MscError::InvalidFormat(FormatViolation::RecordShape {
        field,
        expected,
        found: usize::try_from(found).unwrap_or(usize::MAX),
    })
}

/// Wire form of a serialized header; checked on the way in
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct UncheckedHeader {
    point_count: usize,
    scales: Vec<f32>,
    param_count: usize,
    data_start_offset: u64,
    record_byte_length: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedHeader> for MscHeader {
    type Error = MscError;

    fn try_from(raw: UncheckedHeader) -> Result<Self> {
        let header = MscHeader::from_parts(
            raw.point_count,
            raw.scales,
            raw.param_count,
            raw.data_start_offset,
            raw.record_byte_length,
        );
        header.validate()?;
        Ok(header)
    }
}

fn field(bytes: &[u8], pos: usize) -> Result<[u8; FIELD_SIZE]> {
    bytes
        .get(pos..pos + FIELD_SIZE)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(MscError::TruncatedFile { offset: pos as u64 })
}

fn read_i32(bytes: &[u8], pos: usize) -> Result<i32> {
    field(bytes, pos).map(i32::from_le_bytes)
}

fn read_f32(bytes: &[u8], pos: usize) -> Result<f32> {
    field(bytes, pos).map(f32::from_le_bytes)
}
