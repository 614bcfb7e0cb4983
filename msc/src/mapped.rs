//! Random access over MSC files held entirely in addressable memory
//!
//! [`MappedMscFile`] decodes records straight out of a byte slice, so
//! single-point access needs only `&self` and a scan can be split across
//! threads without any shared cursor. Use [`MappedFile`] for a read-only
//! memory map, or any other [`StorageBackend`] such as a `Vec<u8>`.

use std::ops::Range;

use log::debug;
use msc_core::validation::{check_batch, validate_scales};
use msc_core::{MscError, MscHeader, PointRecord, PointSource, StorageBackend, Transform};
use rayon::prelude::*;

use crate::config::ReaderConfig;
use crate::error::{Error, Result};

#[cfg(feature = "mmap")]
pub use self::mmap::MappedFile;

#[cfg(feature = "mmap")]
mod mmap {
    use std::fs::File;
    use std::path::Path;

    use memmap2::{Mmap, MmapOptions};
    use msc_core::StorageBackend;

    use super::MappedMscFile;
    use crate::config::ReaderConfig;
    use crate::error::Result;

    /// Read-only memory map of a whole file
    #[derive(Debug)]
    pub struct MappedFile {
        mmap: Mmap,
    }

    impl MappedFile {
        /// Map `path` read-only
        pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            let file = File::open(path)?;
            // SAFETY: The map is read-only. Callers must not truncate or
            // rewrite the file while it is mapped.
            let mmap = unsafe { MmapOptions::new().map(&file)? };
            Ok(Self { mmap })
        }
    }

    impl StorageBackend for MappedFile {
        fn as_slice(&self) -> &[u8] {
            &self.mmap
        }
    }

    impl MappedMscFile<MappedFile> {
        /// Memory-map an MSC file with the default configuration
        pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            Self::open_with(path, &ReaderConfig::default())
        }

        /// Memory-map an MSC file with an explicit configuration
        pub fn open_with<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<Self> {
            let path = path.as_ref();
            log::info!("Mapping MSC file: {}", path.display());
            Self::from_backend(MappedFile::open(path)?, config)
        }
    }
}

/// MSC reader over a fully addressable backend
#[derive(Debug)]
pub struct MappedMscFile<B> {
    backend: B,
    header: MscHeader,
    next_point_index: usize,
}

impl<B: StorageBackend> MappedMscFile<B> {
    /// Parse the header at the start of `backend`
    ///
    /// The body is not checked up front; a record missing from a short file
    /// surfaces as `TruncatedFile` when it is read.
    pub fn from_backend(backend: B, config: &ReaderConfig) -> Result<Self> {
        let header = MscHeader::from_bytes(backend.as_slice(), config.max_scales)?;
        if let Some(reference) = &config.reference_scales {
            validate_scales(reference, header.scales(), config.scale_tolerance)?;
        }
        debug!(
            "mapped MSC header: {} points, {} scales, {} params, record length {}",
            header.point_count(),
            header.scale_count(),
            header.param_count(),
            header.record_byte_length()
        );
        Ok(Self {
            backend,
            header,
            next_point_index: 0,
        })
    }

    pub fn header(&self) -> &MscHeader {
        &self.header
    }

    /// Whether the backend holds every record the header declares
    pub fn is_complete(&self) -> bool {
        match self.header.expected_file_len() {
            Ok(len) => self.backend.size() as u64 >= len,
            Err(_) => false,
        }
    }

    /// Decode the point at `index`
    pub fn point(&self, index: usize, transform: Transform) -> Result<PointRecord> {
        check_batch(index, 1, self.header.point_count())?;
        self.decode_at(index, transform)
    }

    /// Decode the points in `range`, in order
    pub fn points(&self, range: Range<usize>, transform: Transform) -> Result<Vec<PointRecord>> {
        self.check_range(&range)?;
        range.map(|i| self.decode_at(i, transform)).collect()
    }

    /// Decode the points in `range` across the rayon pool, in order
    pub fn par_points(&self, range: Range<usize>, transform: Transform) -> Result<Vec<PointRecord>>
    where
        B: Sync,
    {
        self.check_range(&range)?;
        range
            .into_par_iter()
            .map(|i| self.decode_at(i, transform))
            .collect()
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.is_empty() {
            return Ok(());
        }
        check_batch(range.start, range.len(), self.header.point_count())?;
        Ok(())
    }

    fn decode_at(&self, index: usize, transform: Transform) -> Result<PointRecord> {
        let bytes = self.backend.as_slice();
        let offset = self.header.record_offset(index)?;
        let start = usize::try_from(offset)
            .ok()
            .filter(|&start| start <= bytes.len())
            .ok_or(MscError::TruncatedFile { offset })?;
        Ok(self.header.layout().decode(&bytes[start..], offset, transform)?)
    }
}

impl<B: StorageBackend> PointSource for MappedMscFile<B> {
    type Error = Error;

    fn header(&self) -> &MscHeader {
        &self.header
    }

    fn next_point_index(&self) -> usize {
        self.next_point_index
    }

    fn read_points(
        &mut self,
        count: usize,
        index: Option<usize>,
        transform: Transform,
    ) -> Result<Vec<PointRecord>> {
        let start = index.unwrap_or(self.next_point_index);
        check_batch(start, count, self.header.point_count())?;
        let points = self.points(start..start + count, transform)?;
        self.next_point_index = start + count;
        Ok(points)
    }

    fn reset(&mut self) -> Result<()> {
        self.next_point_index = 0;
        Ok(())
    }
}
