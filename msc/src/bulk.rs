//! One-call helpers for whole-file access

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use msc_core::{FormatViolation, MscError, MscHeader, Transform};

use crate::config::ReaderConfig;
use crate::error::Result;
use crate::stream::{read_header_only, MscFileReader};

/// Read only the header of an MSC file
pub fn read_msc_header<P: AsRef<Path>>(path: P) -> Result<MscHeader> {
    read_msc_header_with(path, &ReaderConfig::default())
}

/// Read only the header of an MSC file with an explicit configuration
pub fn read_msc_header_with<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<MscHeader> {
    let file = File::open(path)?;
    read_header_only(BufReader::new(file), config)
}

/// Read every descriptor of an MSC file into one flat buffer
///
/// The buffer holds `point_count * scale_count * 2` values ordered by point,
/// then scale, then `(d1, d2)`. Parameters are not included.
pub fn read_msc_data<P: AsRef<Path>>(
    path: P,
    transform: Transform,
) -> Result<(MscHeader, Vec<f32>)> {
    read_msc_data_with(path, transform, &ReaderConfig::default())
}

/// [`read_msc_data`] with an explicit configuration
pub fn read_msc_data_with<P: AsRef<Path>>(
    path: P,
    transform: Transform,
    config: &ReaderConfig,
) -> Result<(MscHeader, Vec<f32>)> {
    let mut reader = MscFileReader::open_with(path, config)?;
    let len = reader
        .header()
        .point_count()
        .checked_mul(reader.header().scale_count())
        .and_then(|n| n.checked_mul(2))
        .ok_or(MscError::InvalidFormat(FormatViolation::SizeOverflow))?;

    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| MscError::InvalidFormat(FormatViolation::SizeOverflow))?;
    for point in reader.points(transform) {
        for (d1, d2) in point?.descriptors {
            data.push(d1);
            data.push(d2);
        }
    }

    let header = reader.header().clone();
    Ok((header, data))
}
