//! Consistency checks across several MSC files
//!
//! Descriptors from different files are only comparable when the files were
//! computed at the same scales. A [`ScaleSet`] remembers the scale list of
//! the first file it sees, or one given up front, and rejects any later file
//! whose scales differ.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use msc_core::validation::validate_scales;
use msc_core::MscHeader;

use crate::config::ReaderConfig;
use crate::error::Result;
use crate::stream::MscFileReader;

/// Shared scale reference for a group of MSC files
#[derive(Debug, Clone, Default)]
pub struct ScaleSet {
    config: ReaderConfig,
}

impl ScaleSet {
    /// Start a set; `config.reference_scales`, if present, is the reference
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// The reference scales, once known
    pub fn reference(&self) -> Option<&[f32]> {
        self.config.reference_scales.as_deref()
    }

    /// Open a file, checking its scales against the reference
    ///
    /// The first file opened without a reference establishes one.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<MscFileReader<BufReader<File>>> {
        let reader = MscFileReader::open_with(path, &self.config)?;
        self.adopt(reader.header());
        Ok(reader)
    }

    /// Check a header parsed elsewhere against the reference
    ///
    /// Adopts its scales when no reference is set yet.
    pub fn check(&mut self, header: &MscHeader) -> Result<()> {
        if let Some(reference) = &self.config.reference_scales {
            validate_scales(reference, header.scales(), self.config.scale_tolerance)?;
        }
        self.adopt(header);
        Ok(())
    }

    /// Open every file in order, stopping at the first failure
    pub fn open_all<I, P>(&mut self, paths: I) -> Result<Vec<MscFileReader<BufReader<File>>>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let readers = paths
            .into_iter()
            .map(|path| self.open(path))
            .collect::<Result<Vec<_>>>()?;
        info!(
            "opened {} MSC files sharing {} scales",
            readers.len(),
            self.reference().map_or(0, <[f32]>::len)
        );
        Ok(readers)
    }

    fn adopt(&mut self, header: &MscHeader) {
        if self.config.reference_scales.is_none() {
            debug!("adopting reference scales {:?}", header.scales());
            self.config.reference_scales = Some(header.scales().to_vec());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use msc_core::{MscError, ScaleMismatch, ScaleTolerance};

    #[test]
    fn test_first_header_becomes_reference() {
        let mut set = ScaleSet::default();
        assert!(set.reference().is_none());

        let first = MscHeader::new(4, vec![0.5, 1.0], 0).unwrap();
        set.check(&first).unwrap();
        assert_eq!(set.reference(), Some(&[0.5f32, 1.0][..]));

        let same = MscHeader::new(9, vec![0.5, 1.0], 3).unwrap();
        set.check(&same).unwrap();

        let fewer = MscHeader::new(4, vec![0.5], 0).unwrap();
        assert!(matches!(
            set.check(&fewer),
            Err(Error::Msc(MscError::FileMismatch(ScaleMismatch::Count {
                expected: 2,
                found: 1
            })))
        ));
    }

    #[test]
    fn test_tolerance_applies() {
        let config = ReaderConfig::default()
            .with_reference_scales(vec![0.5, 1.0])
            .with_scale_tolerance(ScaleTolerance::Absolute(1e-3));
        let mut set = ScaleSet::new(config);
        set.check(&MscHeader::new(1, vec![0.5004, 0.9999], 0).unwrap())
            .unwrap();
        assert!(set
            .check(&MscHeader::new(1, vec![0.51, 1.0], 0).unwrap())
            .is_err());
        assert_eq!(set.reference(), Some(&[0.5f32, 1.0][..]));
    }
}
