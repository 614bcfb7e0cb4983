//! Descriptor matrices for downstream classifiers
//!
//! A matrix row holds one point's selected descriptors followed by its
//! parameters:
//!
//! ```text
//! [d1 of selected scales..., d2 of selected scales..., params...]
//! ```

use msc_core::validation::{check_batch, check_scale_selection};
use msc_core::{PointSource, Transform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row-major matrix of point descriptors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DescriptorMatrix {
    rows: usize,
    cols: usize,
    scale_indices: Vec<usize>,
    param_count: usize,
    data: Vec<f32>,
}

impl DescriptorMatrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Scale indices the descriptor columns were taken from, in column order
    pub fn scale_indices(&self) -> &[usize] {
        &self.scale_indices
    }

    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// One point's columns
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Iterate over rows in point order
    ///
    /// Yields exactly `rows()` slices, empty ones when there are no columns.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.rows).filter_map(move |index| self.row(index))
    }

    /// The flat row-major buffer
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// What [`read_matrix`] should read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixRequest {
    /// Maximum number of points; `None` reads everything remaining
    pub count: Option<usize>,
    /// First point; `None` starts at the source's cursor
    pub start: Option<usize>,
    /// Scale indices to keep, in column order; `None` keeps all
    pub scales: Option<Vec<usize>>,
    pub transform: Transform,
}

impl MatrixRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_scales(mut self, scales: Vec<usize>) -> Self {
        self.scales = Some(scales);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Read a block of points into a [`DescriptorMatrix`]
///
/// The count is clamped to the points remaining after the start index, so
/// asking for more than exist is not an error. A start index at or past the
/// end is `IndexOutOfRange`; a selected scale index that does not exist is
/// `ScaleIndexOutOfRange`. Both are reported before anything is read.
pub fn read_matrix<S: PointSource>(
    source: &mut S,
    request: &MatrixRequest,
) -> Result<DescriptorMatrix, S::Error> {
    let header = source.header();
    let point_count = header.point_count();
    let scale_count = header.scale_count();
    let param_count = header.param_count();

    let start = request.start.unwrap_or_else(|| source.next_point_index());
    check_batch(start, 0, point_count)?;
    let available = point_count - start;
    let rows = request.count.map_or(available, |n| n.min(available));

    let scale_indices = match &request.scales {
        Some(selection) => {
            check_scale_selection(selection, scale_count)?;
            selection.clone()
        }
        None => (0..scale_count).collect(),
    };

    let selected = scale_indices.len();
    let cols = 2 * selected + param_count;
    let points = source.read_points(rows, Some(start), request.transform)?;

    let mut data = Vec::with_capacity(rows * cols);
    for point in &points {
        data.extend(scale_indices.iter().map(|&s| point.descriptors[s].0));
        data.extend(scale_indices.iter().map(|&s| point.descriptors[s].1));
        data.extend_from_slice(&point.params);
    }

    Ok(DescriptorMatrix {
        rows,
        cols,
        scale_indices,
        param_count,
        data,
    })
}
