//! Reader configuration

use msc_core::{ScaleTolerance, DEFAULT_MAX_SCALES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how MSC headers are validated
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ReaderConfig {
    /// Largest scale count a header may declare
    pub max_scales: usize,
    /// Tolerance used when comparing against `reference_scales`
    pub scale_tolerance: ScaleTolerance,
    /// Scale list every opened file must match, if any
    pub reference_scales: Option<Vec<f32>>,
}

impl ReaderConfig {
    /// Set the scale count ceiling
    pub fn with_max_scales(mut self, max_scales: usize) -> Self {
        self.max_scales = max_scales;
        self
    }

    /// Set the scale comparison tolerance
    pub fn with_scale_tolerance(mut self, tolerance: ScaleTolerance) -> Self {
        self.scale_tolerance = tolerance;
        self
    }

    /// Require files to carry exactly this scale list
    pub fn with_reference_scales(mut self, scales: Vec<f32>) -> Self {
        self.reference_scales = Some(scales);
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    #[cfg(feature = "serde")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_scales: DEFAULT_MAX_SCALES,
            scale_tolerance: ScaleTolerance::Exact,
            reference_scales: None,
        }
    }
}
