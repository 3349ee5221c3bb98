//! The structural half of a render: one intensity per pixel.

use crate::error::{RenderError, RenderResult};

/// Row-major intensities in [0, 1]. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl IntensityField {
    /// Wraps a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SizeMismatch`] if the buffer length is not
    /// `width * height`.
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> RenderResult<Self> {
        if values.len() != width * height {
            return Err(RenderError::SizeMismatch {
                expected: width * height,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Scatters per-column results into row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SizeMismatch`] if a column is not `height`
    /// long or the column count is not `width`.
    pub fn from_columns(width: usize, height: usize, columns: Vec<Vec<f64>>) -> RenderResult<Self> {
        let actual: usize = columns.iter().map(Vec::len).sum();
        if columns.len() != width || columns.iter().any(|c| c.len() != height) {
            return Err(RenderError::SizeMismatch {
                expected: width * height,
                actual,
            });
        }
        let mut values = vec![0.0; width * height];
        for (x, column) in columns.into_iter().enumerate() {
            for (y, v) in column.into_iter().enumerate() {
                values[y * width + x] = v;
            }
        }
        Self::from_values(width, height, values)
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Intensity at a pixel.
    #[inline]
    #[must_use]
    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// Row-major values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Approximate heap footprint in bytes.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.values.len() * std::mem::size_of::<f64>()
    }
}
