//! Error types for MSC operations

/// Header fields that violate basic sanity checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatViolation {
    /// Point count is zero or negative
    NonPositivePointCount(i32),
    /// Scale count is zero or negative
    NonPositiveScaleCount(i32),
    /// Scale count exceeds the configured ceiling
    TooManyScales { count: usize, limit: usize },
    /// Parameter count is negative
    NegativeParamCount(i32),
    /// Record or offset arithmetic does not fit in the address space
    SizeOverflow,
    /// A record handed to the encoder has the wrong number of values
    RecordShape {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Ways two files can disagree on their scale list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleMismatch {
    /// Different number of scales
    Count { expected: usize, found: usize },
    /// Scale at `index` differs beyond tolerance
    Value {
        index: usize,
        expected: f32,
        found: f32,
    },
}

/// Broad classification of an error, separating caller mistakes from bad data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller asked for something the file does not have
    CallerMisuse,
    /// The file is corrupt, foreign or inconsistent with its peers
    DataCorruption,
    /// The underlying stream failed
    Io,
}

/// Errors that can occur during MSC operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MscError {
    /// Header fields violate basic sanity
    InvalidFormat(FormatViolation),
    /// Scale list disagrees with the reference list
    FileMismatch(ScaleMismatch),
    /// Requested point index is past the last point
    IndexOutOfRange { index: usize, point_count: usize },
    /// Requested scale index is past the last scale
    ScaleIndexOutOfRange { index: usize, scale_count: usize },
    /// Data ended in the middle of a header or record; `offset` is the
    /// first field that could not be read in full
    TruncatedFile { offset: u64 },
}

impl MscError {
    /// Classify this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            MscError::IndexOutOfRange { .. } | MscError::ScaleIndexOutOfRange { .. } => {
                ErrorCategory::CallerMisuse
            }
            MscError::InvalidFormat(_)
            | MscError::FileMismatch(_)
            | MscError::TruncatedFile { .. } => ErrorCategory::DataCorruption,
        }
    }

    /// Whether a caller can reasonably recover by asking for something else
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.category(), ErrorCategory::CallerMisuse)
    }
}

impl core::fmt::Display for FormatViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatViolation::NonPositivePointCount(n) => {
                write!(f, "negative or null number of points ({n})")
            }
            FormatViolation::NonPositiveScaleCount(n) => {
                write!(f, "negative or null number of scales ({n})")
            }
            FormatViolation::TooManyScales { count, limit } => write!(
                f,
                "file claims {count} scales, more than the limit of {limit}"
            ),
            FormatViolation::NegativeParamCount(n) => {
                write!(f, "negative number of point parameters ({n})")
            }
            FormatViolation::SizeOverflow => write!(f, "record layout overflows"),
            FormatViolation::RecordShape {
                field,
                expected,
                found,
            } => write!(f, "record {field} has {found} values, expected {expected}"),
        }
    }
}

impl core::fmt::Display for ScaleMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScaleMismatch::Count { expected, found } => {
                write!(f, "expected {expected} scales, found {found}")
            }
            ScaleMismatch::Value {
                index,
                expected,
                found,
            } => write!(f, "scale {index} is {found}, expected {expected}"),
        }
    }
}

impl core::fmt::Display for MscError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MscError::InvalidFormat(v) => write!(f, "Invalid MSC file: {v}"),
            MscError::FileMismatch(m) => write!(f, "Input file mismatch: {m}"),
            MscError::IndexOutOfRange { index, point_count } => write!(
                f,
                "Point index {index} is out of range (number of points = {point_count})"
            ),
            MscError::ScaleIndexOutOfRange { index, scale_count } => write!(
                f,
                "Scale index {index} is out of range (number of scales = {scale_count})"
            ),
            MscError::TruncatedFile { offset } => {
                write!(f, "MSC data truncated at byte offset {offset}")
            }
        }
    }
}

impl core::error::Error for MscError {}

impl From<FormatViolation> for MscError {
    fn from(v: FormatViolation) -> Self {
        MscError::InvalidFormat(v)
    }
}

impl From<ScaleMismatch> for MscError {
    fn from(m: ScaleMismatch) -> Self {
        MscError::FileMismatch(m)
    }
}

/// Result type for MSC operations
pub type Result<T> = core::result::Result<T, MscError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let oob = MscError::IndexOutOfRange {
            index: 4,
            point_count: 4,
        };
        assert_eq!(oob.category(), ErrorCategory::CallerMisuse);
        assert!(oob.is_recoverable());

        let truncated = MscError::TruncatedFile { offset: 12 };
        assert_eq!(truncated.category(), ErrorCategory::DataCorruption);
        assert!(!truncated.is_recoverable());

        let mismatch: MscError = ScaleMismatch::Count {
            expected: 3,
            found: 2,
        }
        .into();
        assert_eq!(mismatch.category(), ErrorCategory::DataCorruption);
    }
}
