//! Header parsing and record-length derivation over a stream

use std::io::{Read, Seek};

use log::debug;
use msc_core::validation::{
    validate_param_count, validate_point_count, validate_scale_count, validate_scales,
};
use msc_core::{MscHeader, RecordLayout, Transform};

use super::fields::FieldReader;
use super::read_record;
use crate::config::ReaderConfig;
use crate::error::Result;

/// Header fields as read, before the record length is known
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeaderFields {
    pub(crate) point_count: usize,
    pub(crate) scales: Vec<f32>,
    pub(crate) param_count: usize,
    pub(crate) data_start_offset: u64,
}

impl HeaderFields {
    pub(crate) fn layout(&self) -> RecordLayout {
        RecordLayout::new(self.param_count, self.scales.len())
    }

    pub(crate) fn into_header(self, record_byte_length: u64) -> MscHeader {
        MscHeader::from_parts(
            self.point_count,
            self.scales,
            self.param_count,
            self.data_start_offset,
            record_byte_length,
        )
    }
}

/// Read and validate the header from the stream's current position
///
/// When the configuration carries reference scales, the file's scales must
/// match them. Leaves the stream at the first point record.
pub(crate) fn parse_header<R: Read + Seek>(
    fields: &mut FieldReader<R>,
    config: &ReaderConfig,
) -> Result<HeaderFields> {
    let point_count = validate_point_count(fields.read_i32()?)?;
    let scale_count = validate_scale_count(fields.read_i32()?, config.max_scales)?;

    let mut scales = Vec::with_capacity(scale_count);
    for _ in 0..scale_count {
        scales.push(fields.read_f32()?);
    }

    if let Some(reference) = &config.reference_scales {
        validate_scales(reference, &scales, config.scale_tolerance)?;
    }

    let param_count = validate_param_count(fields.read_i32()?)?;

    Ok(HeaderFields {
        point_count,
        scales,
        param_count,
        data_start_offset: fields.offset(),
    })
}

/// Measure one record by reading it, then rewind to the first record
///
/// The probe goes through the same per-point logic as a real read, so the
/// measured length is exactly what every later seek assumes.
pub(crate) fn probe_record_length<R: Read + Seek>(
    fields: &mut FieldReader<R>,
    header: &HeaderFields,
) -> Result<u64> {
    fields.seek(header.data_start_offset)?;
    read_record(fields, header.layout(), Transform::Raw)?;
    let record_byte_length = fields.offset() - header.data_start_offset;
    fields.seek(header.data_start_offset)?;

    debug!(
        "derived record length {} bytes ({} params, {} scales)",
        record_byte_length,
        header.param_count,
        header.scales.len()
    );
    debug_assert_eq!(
        header.layout().byte_len().ok().map(|n| n as u64),
        Some(record_byte_length)
    );
    Ok(record_byte_length)
}
