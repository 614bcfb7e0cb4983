//! Point record layout and byte codec

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use alloc::vec::Vec;

use super::constants::{AUXILIARY_VALUES_PER_SCALE, DESCRIPTOR_VALUES_PER_SCALE, FIELD_SIZE};
use crate::error::{FormatViolation, MscError, Result};
use crate::transform::Transform;

/// One `(d1, d2)` descriptor pair, or `(x, y)` after the planar transform
pub type DescriptorPair = (f32, f32);

/// Descriptor data for a single point
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointRecord {
    /// Per-point parameters, `param_count` values
    pub params: Vec<f32>,
    /// One pair per scale, in header scale order
    pub descriptors: Vec<DescriptorPair>,
}

impl PointRecord {
    /// Build a record from its parts
    pub fn new(params: Vec<f32>, descriptors: Vec<DescriptorPair>) -> Self {
        Self {
            params,
            descriptors,
        }
    }
}

/// Shape of one point record on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub param_count: usize,
    pub scale_count: usize,
}

impl RecordLayout {
    pub const fn new(param_count: usize, scale_count: usize) -> Self {
        Self {
            param_count,
            scale_count,
        }
    }

    /// Number of 4-byte fields in one record
    pub fn field_count(&self) -> Result<usize> {
        let per_scale = DESCRIPTOR_VALUES_PER_SCALE + AUXILIARY_VALUES_PER_SCALE;
        self.scale_count
            .checked_mul(per_scale)
            .and_then(|n| n.checked_add(self.param_count))
            .ok_or(MscError::InvalidFormat(FormatViolation::SizeOverflow))
    }

    /// Size of one record in bytes
    pub fn byte_len(&self) -> Result<usize> {
        self.field_count()?
            .checked_mul(FIELD_SIZE)
            .ok_or(MscError::InvalidFormat(FormatViolation::SizeOverflow))
    }

    /// Decode one record from the start of `bytes`
    ///
    /// `base_offset` is the file offset of `bytes[0]`; a short buffer is
    /// reported at the first field it cannot hold in full.
    pub fn decode(
        &self,
        bytes: &[u8],
        base_offset: u64,
        transform: Transform,
    ) -> Result<PointRecord> {
        let needed = self.byte_len()?;
        if bytes.len() < needed {
            return Err(MscError::TruncatedFile {
                offset: base_offset + (bytes.len() / FIELD_SIZE * FIELD_SIZE) as u64,
            });
        }

        let mut fields = bytes[..needed].chunks_exact(FIELD_SIZE).map(|chunk| {
            f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        });

        let params: Vec<f32> = fields.by_ref().take(self.param_count).collect();
        let mut descriptors = Vec::with_capacity(self.scale_count);
        for _ in 0..self.scale_count {
            // chunks_exact over a length-checked slice cannot run dry here
            let d1 = fields.next().unwrap_or_default();
            let d2 = fields.next().unwrap_or_default();
            descriptors.push(transform.apply(d1, d2));
        }
        // the remaining scale_count fields are auxiliary and dropped

        Ok(PointRecord {
            params,
            descriptors,
        })
    }

    /// Append the on-disk form of `record` to `out`
    ///
    /// `auxiliary` supplies the per-scale trailing field; `None` writes zeros.
    pub fn encode_into(
        &self,
        record: &PointRecord,
        auxiliary: Option<&[f32]>,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        self.check_shape("params", self.param_count, record.params.len())?;
        self.check_shape("descriptors", self.scale_count, record.descriptors.len())?;
        if let Some(aux) = auxiliary {
            self.check_shape("auxiliary", self.scale_count, aux.len())?;
        }

        out.reserve(self.byte_len()?);
        for value in &record.params {
            out.extend_from_slice(&value.to_le_bytes());
        }
        for (d1, d2) in &record.descriptors {
            out.extend_from_slice(&d1.to_le_bytes());
            out.extend_from_slice(&d2.to_le_bytes());
        }
        match auxiliary {
            Some(aux) => {
                for value in aux {
                    out.extend_from_slice(&value.to_le_bytes());
                }
            }
            None => {
                for _ in 0..self.scale_count {
                    out.extend_from_slice(&0f32.to_le_bytes());
                }
            }
        }
        Ok(())
    }

    fn check_shape(&self, field: &'static str, expected: usize, found: usize) -> Result<()> {
        if expected != found {
            return Err(MscError::InvalidFormat(FormatViolation::RecordShape {
                field,
                expected,
                found,
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_byte_len() {
        assert_eq!(RecordLayout::new(0, 1).byte_len(), Ok(12));
        assert_eq!(RecordLayout::new(4, 3).byte_len(), Ok(52));
        assert_eq!(
            RecordLayout::new(usize::MAX, 1).byte_len(),
            Err(MscError::InvalidFormat(FormatViolation::SizeOverflow))
        );
    }

    #[test]
    fn test_decode_skips_auxiliary() {
        let layout = RecordLayout::new(1, 2);
        let record = PointRecord::new(vec![7.5], vec![(0.1, 0.2), (0.3, 0.4)]);
        let mut bytes = Vec::new();
        layout
            .encode_into(&record, Some(&[99.0, 98.0]), &mut bytes)
            .unwrap();
        assert_eq!(bytes.len(), layout.byte_len().unwrap());

        let decoded = layout.decode(&bytes, 0, Transform::Raw).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_short_buffer() {
        let layout = RecordLayout::new(2, 1);
        let bytes = [0u8; 17];
        assert_eq!(
            layout.decode(&bytes, 100, Transform::Raw),
            Err(MscError::TruncatedFile { offset: 116 })
        );
    }

    #[test]
    fn test_encode_rejects_wrong_shape() {
        let layout = RecordLayout::new(2, 1);
        let record = PointRecord::new(vec![1.0], vec![(0.0, 0.0)]);
        let mut out = Vec::new();
        assert_eq!(
            layout.encode_into(&record, None, &mut out),
            Err(MscError::InvalidFormat(FormatViolation::RecordShape {
                field: "params",
                expected: 2,
                found: 1,
            }))
        );
        assert!(out.is_empty());
    }
}
