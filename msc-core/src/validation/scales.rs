//! Cross-file scale list consistency

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MscError, Result, ScaleMismatch};

/// How closely two scale values must agree to count as the same scale
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScaleTolerance {
    /// IEEE `==` equality; `0.0` matches `-0.0` and NaN never matches
    #[default]
    Exact,
    /// `|expected - found| <= epsilon`
    Absolute(f32),
}

impl ScaleTolerance {
    /// Whether `found` is acceptable where `expected` was established
    pub fn matches(self, expected: f32, found: f32) -> bool {
        match self {
            ScaleTolerance::Exact => expected == found,
            ScaleTolerance::Absolute(epsilon) => {
                let diff = if expected > found {
                    expected - found
                } else {
                    found - expected
                };
                diff <= epsilon
            }
        }
    }
}

/// Check a file's scale list against an established reference list
pub fn validate_scales(
    reference: &[f32],
    found: &[f32],
    tolerance: ScaleTolerance,
) -> Result<()> {
    if reference.len() != found.len() {
        return Err(MscError::FileMismatch(ScaleMismatch::Count {
            expected: reference.len(),
            found: found.len(),
        }));
    }

    for (index, (&expected, &value)) in reference.iter().zip(found).enumerate() {
        if !tolerance.matches(expected, value) {
            return Err(MscError::FileMismatch(ScaleMismatch::Value {
                index,
                expected,
                found: value,
            }));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_scales_pass() {
        let scales = [0.1, 0.25, 0.5, 1.0];
        assert_eq!(validate_scales(&scales, &scales, ScaleTolerance::Exact), Ok(()));
    }

    #[test]
    fn test_count_mismatch() {
        assert_eq!(
            validate_scales(&[0.1, 0.2], &[0.1], ScaleTolerance::Exact),
            Err(MscError::FileMismatch(ScaleMismatch::Count {
                expected: 2,
                found: 1
            }))
        );
    }

    #[test]
    fn test_value_mismatch_reports_first_index() {
        assert_eq!(
            validate_scales(&[0.1, 0.2, 0.3], &[0.1, 0.25, 0.35], ScaleTolerance::Exact),
            Err(MscError::FileMismatch(ScaleMismatch::Value {
                index: 1,
                expected: 0.2,
                found: 0.25
            }))
        );
    }

    #[test]
    fn test_absolute_tolerance() {
        let tol = ScaleTolerance::Absolute(1e-3);
        assert_eq!(validate_scales(&[0.5], &[0.5005], tol), Ok(()));
        assert!(validate_scales(&[0.5], &[0.502], tol).is_err());
        assert!(!ScaleTolerance::Exact.matches(f32::NAN, f32::NAN));
    }

    #[test]
    fn test_exact_is_ieee_equality() {
        assert!(ScaleTolerance::Exact.matches(0.0, -0.0));
        assert_eq!(validate_scales(&[0.0, 1.0], &[-0.0, 1.0], ScaleTolerance::Exact), Ok(()));
        assert!(!ScaleTolerance::Exact.matches(1.0, 1.0 + f32::EPSILON));
    }
}
