//! Cursor-based point retrieval

use alloc::vec::Vec;

use crate::error::MscError;
use crate::format::{MscHeader, PointRecord};
use crate::transform::Transform;

/// Trait for readers that hand out point records by index or by cursor
///
/// Every implementation keeps a `next_point_index` cursor: reads without an
/// explicit index start there, and every successful read moves it to the
/// index just past the last point returned. Failed reads leave it alone.
pub trait PointSource {
    /// Error type for read operations
    type Error: From<MscError>;

    /// The parsed header
    fn header(&self) -> &MscHeader;

    /// Index the next cursor read starts at
    fn next_point_index(&self) -> usize;

    /// Read `count` consecutive points starting at `index`, or at the cursor
    /// when `index` is `None`
    fn read_points(
        &mut self,
        count: usize,
        index: Option<usize>,
        transform: Transform,
    ) -> Result<Vec<PointRecord>, Self::Error>;

    /// Rewind the cursor to the first point
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// `(point_count, scales, param_count)`
    fn get_header(&self) -> (usize, &[f32], usize) {
        self.header().summary()
    }

    /// Points left between the cursor and the end of the file
    fn remaining(&self) -> usize {
        self.header()
            .point_count()
            .saturating_sub(self.next_point_index())
    }

    /// Read a single point
    fn read_point(
        &mut self,
        index: Option<usize>,
        transform: Transform,
    ) -> Result<PointRecord, Self::Error> {
        let start = index.unwrap_or_else(|| self.next_point_index());
        let point_count = self.header().point_count();
        self.read_points(1, Some(start), transform)?
            .pop()
            .ok_or_else(|| {
                MscError::IndexOutOfRange {
                    index: start,
                    point_count,
                }
                .into()
            })
    }
}
