//! MSC file writer
//!
//! Produces files the readers in this crate accept: the header first, then
//! exactly `point_count` records in index order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use msc_core::{FormatViolation, MscError, MscHeader, PointRecord, RecordLayout};

use crate::error::Result;

/// Sequential writer for one MSC file
#[derive(Debug)]
pub struct MscWriter<W: Write> {
    out: W,
    header: MscHeader,
    layout: RecordLayout,
    written: usize,
    buf: Vec<u8>,
}

impl MscWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write `header` to it
    pub fn create<P: AsRef<Path>>(path: P, header: MscHeader) -> Result<Self> {
        let path = path.as_ref();
        debug!("creating MSC file: {}", path.display());
        Self::new(BufWriter::new(File::create(path)?), header)
    }
}

impl<W: Write> MscWriter<W> {
    /// Write `header` to `out` and prepare for records
    ///
    /// The header is validated first; nothing is written if it fails.
    pub fn new(mut out: W, header: MscHeader) -> Result<Self> {
        header.validate()?;
        out.write_all(&header.to_bytes())?;
        let layout = header.layout();
        Ok(Self {
            out,
            header,
            layout,
            written: 0,
            buf: Vec::new(),
        })
    }

    pub fn header(&self) -> &MscHeader {
        &self.header
    }

    /// Records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Append one record with zeroed auxiliary fields
    pub fn write_point(&mut self, record: &PointRecord) -> Result<()> {
        self.write_record(record, None)
    }

    /// Append one record with explicit per-scale auxiliary values
    pub fn write_point_with_auxiliary(
        &mut self,
        record: &PointRecord,
        auxiliary: &[f32],
    ) -> Result<()> {
        self.write_record(record, Some(auxiliary))
    }

    /// Flush and return the sink
    ///
    /// Fails if fewer or more records were written than the header declares.
    pub fn finish(mut self) -> Result<W> {
        self.check_count(self.written)?;
        self.out.flush()?;
        debug!("finished MSC file with {} points", self.written);
        Ok(self.out)
    }

    fn write_record(&mut self, record: &PointRecord, auxiliary: Option<&[f32]>) -> Result<()> {
        if self.written >= self.header.point_count() {
            self.check_count(self.written + 1)?;
        }
        self.buf.clear();
        self.layout.encode_into(record, auxiliary, &mut self.buf)?;
        self.out.write_all(&self.buf)?;
        self.written += 1;
        Ok(())
    }

    fn check_count(&self, found: usize) -> Result<()> {
        let expected = self.header.point_count();
        if found != expected {
            return Err(MscError::InvalidFormat(FormatViolation::RecordShape {
                field: "points",
                expected,
                found,
            })
            .into());
        }
        Ok(())
    }
}
