//! Typed field access over a seekable byte stream

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use log::trace;

use crate::error::{Error, Result};

/// Reads little-endian 4-byte fields and keeps track of the stream offset
///
/// The offset is maintained locally so that position queries and no-op
/// seeks never reach the underlying stream. After a failed read the offset
/// is no longer trusted and the next seek always goes through.
#[derive(Debug)]
pub(crate) struct FieldReader<R> {
    inner: R,
    offset: u64,
    offset_known: bool,
}

impl<R: Read + Seek> FieldReader<R> {
    /// Wrap `inner`, starting from its current position
    pub(crate) fn new(mut inner: R) -> Result<Self> {
        let offset = inner.stream_position()?;
        Ok(Self {
            inner,
            offset,
            offset_known: true,
        })
    }

    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        match self.inner.read_i32::<LittleEndian>() {
            Ok(value) => {
                self.offset += 4;
                Ok(value)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub(crate) fn read_f32(&mut self) -> Result<f32> {
        match self.inner.read_f32::<LittleEndian>() {
            Ok(value) => {
                self.offset += 4;
                Ok(value)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Read one field and throw it away
    pub(crate) fn skip_field(&mut self) -> Result<()> {
        self.read_f32().map(|_| ())
    }

    /// Move to an absolute offset
    pub(crate) fn seek(&mut self, pos: u64) -> Result<()> {
        if self.offset_known && pos == self.offset {
            return Ok(());
        }
        trace!("seeking from {} to {}", self.offset, pos);
        self.inner.seek(SeekFrom::Start(pos))?;
        self.offset = pos;
        self.offset_known = true;
        Ok(())
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }

    fn fail(&mut self, err: std::io::Error) -> Error {
        self.offset_known = false;
        Error::from_io_at(err, self.offset)
    }
}
