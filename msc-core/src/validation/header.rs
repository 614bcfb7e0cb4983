//! Sanity checks on the integer fields of a header

use crate::error::{FormatViolation, MscError, Result};

/// Point count must be strictly positive
pub const fn validate_point_count(raw: i32) -> Result<usize> {
    if raw <= 0 {
        return Err(MscError::InvalidFormat(
            FormatViolation::NonPositivePointCount(raw),
        ));
    }
    Ok(raw as usize)
}

/// Scale count must be strictly positive and no larger than `max_scales`
pub const fn validate_scale_count(raw: i32, max_scales: usize) -> Result<usize> {
    if raw <= 0 {
        return Err(MscError::InvalidFormat(
            FormatViolation::NonPositiveScaleCount(raw),
        ));
    }
    let count = raw as usize;
    if count > max_scales {
        return Err(MscError::InvalidFormat(FormatViolation::TooManyScales {
            count,
            limit: max_scales,
        }));
    }
    Ok(count)
}

/// Parameter count may be zero but not negative
pub const fn validate_param_count(raw: i32) -> Result<usize> {
    if raw < 0 {
        return Err(MscError::InvalidFormat(
            FormatViolation::NegativeParamCount(raw),
        ));
    }
    Ok(raw as usize)
}
