//! Stream-backed MSC reader
//!
//! [`MscFileReader`] owns a seekable stream exclusively. The header is parsed
//! eagerly on construction, one record is read to measure the record length,
//! and the stream is rewound to the first point. Every later access seeks to
//! `data_start_offset + record_byte_length * index`.

mod fields;
pub(crate) mod header;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, info};
use msc_core::validation::check_batch;
use msc_core::{MscHeader, PointRecord, PointSource, RecordLayout, Transform};

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use fields::FieldReader;
use header::{parse_header, probe_record_length};

/// Upper bound on records preallocated for one batch
const MAX_PREALLOCATED_RECORDS: usize = 4096;

/// Read one full record at the current position
///
/// Reads the parameters, one `(d1, d2)` pair per scale, then skips the
/// per-scale auxiliary field.
pub(crate) fn read_record<R: Read + Seek>(
    fields: &mut FieldReader<R>,
    layout: RecordLayout,
    transform: Transform,
) -> Result<PointRecord> {
    let mut params = Vec::with_capacity(layout.param_count);
    for _ in 0..layout.param_count {
        params.push(fields.read_f32()?);
    }

    let mut descriptors = Vec::with_capacity(layout.scale_count);
    for _ in 0..layout.scale_count {
        let d1 = fields.read_f32()?;
        let d2 = fields.read_f32()?;
        descriptors.push(transform.apply(d1, d2));
    }

    // neighbor count / mean distance, never exposed
    for _ in 0..layout.scale_count {
        fields.skip_field()?;
    }

    Ok(PointRecord::new(params, descriptors))
}

/// Parse only the header, taking the record length from the layout
///
/// Used where the body is not needed; no probe read takes place.
pub(crate) fn read_header_only<R: Read + Seek>(
    reader: R,
    config: &ReaderConfig,
) -> Result<MscHeader> {
    let mut fields = FieldReader::new(reader)?;
    let parsed = parse_header(&mut fields, config)?;
    let record_byte_length = parsed.layout().byte_len()? as u64;
    Ok(parsed.into_header(record_byte_length))
}

/// Reader for MSC files over any seekable stream
///
/// Not shareable between threads while reading; open one reader per worker
/// for parallel scans of the same file.
#[derive(Debug)]
pub struct MscFileReader<R = BufReader<File>> {
    fields: FieldReader<R>,
    header: MscHeader,
    next_point_index: usize,
}

impl MscFileReader<BufReader<File>> {
    /// Open an MSC file with the default configuration
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &ReaderConfig::default())
    }

    /// Open an MSC file with an explicit configuration
    pub fn open_with<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening MSC file: {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }
}

impl<R: Read + Seek> MscFileReader<R> {
    /// Build a reader over `reader`, parsing the header at its current position
    pub fn from_reader(reader: R, config: &ReaderConfig) -> Result<Self> {
        let mut fields = FieldReader::new(reader)?;
        let parsed = parse_header(&mut fields, config)?;
        debug!(
            "parsed MSC header: {} points, {} scales, {} params, data at {}",
            parsed.point_count,
            parsed.scales.len(),
            parsed.param_count,
            parsed.data_start_offset
        );

        let record_byte_length = probe_record_length(&mut fields, &parsed)?;
        Ok(Self {
            fields,
            header: parsed.into_header(record_byte_length),
            next_point_index: 0,
        })
    }

    /// The parsed header
    pub fn header(&self) -> &MscHeader {
        &self.header
    }

    /// `(point_count, scales, param_count)`
    pub fn get_header(&self) -> (usize, &[f32], usize) {
        self.header.summary()
    }

    /// Index the next cursor read starts at
    pub fn next_point_index(&self) -> usize {
        self.next_point_index
    }

    /// Read `count` consecutive points
    ///
    /// Starts at `index`, or at the cursor when `index` is `None`. The whole
    /// batch is range-checked before the stream is touched; an out-of-range
    /// request returns `IndexOutOfRange` and leaves the cursor where it was.
    /// On success the cursor moves to just past the last point read.
    pub fn read_points(
        &mut self,
        count: usize,
        index: Option<usize>,
        transform: Transform,
    ) -> Result<Vec<PointRecord>> {
        let start = index.unwrap_or(self.next_point_index);
        check_batch(start, count, self.header.point_count())?;

        self.fields.seek(self.header.record_offset(start)?)?;
        let layout = self.header.layout();
        let mut points = Vec::with_capacity(count.min(MAX_PREALLOCATED_RECORDS));
        for _ in 0..count {
            points.push(read_record(&mut self.fields, layout, transform)?);
        }

        self.next_point_index = start + count;
        Ok(points)
    }

    /// Read a single point at `index`, or at the cursor
    pub fn read_point(
        &mut self,
        index: Option<usize>,
        transform: Transform,
    ) -> Result<PointRecord> {
        PointSource::read_point(self, index, transform)
    }

    /// Rewind to the first point
    pub fn reset(&mut self) -> Result<()> {
        self.next_point_index = 0;
        self.fields.seek(self.header.data_start_offset())
    }

    /// Iterate over the points from the cursor to the end of the file
    pub fn points(&mut self, transform: Transform) -> Points<'_, R> {
        Points {
            reader: self,
            transform,
            done: false,
        }
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> R {
        self.fields.into_inner()
    }
}

impl<R: Read + Seek> PointSource for MscFileReader<R> {
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
        MscFileReader::read_points(self, count, index, transform)
    }

    fn reset(&mut self) -> Result<()> {
        MscFileReader::reset(self)
    }
}

/// Sequential iterator over a reader's remaining points
///
/// Stops after the last point or after the first error.
pub struct Points<'a, R> {
    reader: &'a mut MscFileReader<R>,
    transform: Transform,
    done: bool,
}

impl<R: Read + Seek> Iterator for Points<'_, R> {
    type Item = Result<PointRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.reader.next_point_index >= self.reader.header.point_count() {
            return None;
        }
        let result = self.reader.read_point(None, self.transform);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let left = PointSource::remaining(&*self.reader);
        (0, Some(left))
    }
}
