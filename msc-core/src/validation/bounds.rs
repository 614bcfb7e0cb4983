//! Point index and offset arithmetic

use crate::error::{FormatViolation, MscError, Result};

/// Check that `count` points starting at `start` all exist
///
/// A start past the end reports `start`; a batch running off the end
/// reports the first missing index.
pub const fn check_batch(start: usize, count: usize, point_count: usize) -> Result<()> {
    if start >= point_count {
        return Err(MscError::IndexOutOfRange {
            index: start,
            point_count,
        });
    }
    if count > point_count - start {
        return Err(MscError::IndexOutOfRange {
            index: point_count,
            point_count,
        });
    }
    Ok(())
}

/// Check every entry of a scale selection
pub fn check_scale_selection(selection: &[usize], scale_count: usize) -> Result<()> {
    match selection.iter().find(|&&index| index >= scale_count) {
        Some(&index) => Err(MscError::ScaleIndexOutOfRange { index, scale_count }),
        None => Ok(()),
    }
}

/// File offset of record `index`
pub fn record_offset(data_start: u64, record_len: u64, index: usize) -> Result<u64> {
    record_len
        .checked_mul(index as u64)
        .and_then(|delta| delta.checked_add(data_start))
        .ok_or(MscError::InvalidFormat(FormatViolation::SizeOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_batch() {
        assert_eq!(check_batch(0, 1, 5), Ok(()));
        assert_eq!(check_batch(2, 3, 5), Ok(()));
        assert_eq!(check_batch(4, 0, 5), Ok(()));
        assert_eq!(
            check_batch(5, 1, 5),
            Err(MscError::IndexOutOfRange {
                index: 5,
                point_count: 5
            })
        );
        assert_eq!(
            check_batch(3, 3, 5),
            Err(MscError::IndexOutOfRange {
                index: 5,
                point_count: 5
            })
        );
    }

    #[test]
    fn test_scale_selection() {
        assert_eq!(check_scale_selection(&[0, 2], 3), Ok(()));
        assert_eq!(check_scale_selection(&[], 3), Ok(()));
        assert_eq!(
            check_scale_selection(&[1, 3, 4], 3),
            Err(MscError::ScaleIndexOutOfRange {
                index: 3,
                scale_count: 3
            })
        );
    }

    #[test]
    fn test_record_offset() {
        assert_eq!(record_offset(24, 40, 0), Ok(24));
        assert_eq!(record_offset(24, 40, 3), Ok(144));
        assert_eq!(
            record_offset(1, u64::MAX, 2),
            Err(MscError::InvalidFormat(FormatViolation::SizeOverflow))
        );
    }
}
