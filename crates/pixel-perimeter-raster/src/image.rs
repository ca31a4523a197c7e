/// Errors raised when wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("invalid image buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

fn checked_len(width: usize, height: usize) -> Result<usize, RasterError> {
    width
        .checked_mul(height)
        .ok_or(RasterError::InvalidDimensions { width, height })
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> GrayImageView<'a> {
    /// Wrap a row-major buffer, checking that its length is `width * height`.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, RasterError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(RasterError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Foreground/background mask; any nonzero byte is foreground.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl BinaryImage {
    /// Build a mask from row-major foreground flags.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(if f(x, y) { 255 } else { 0 });
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Parse an ASCII drawing: `#` (or any non-`.`/space char) is foreground.
    ///
    /// Rows are padded with background to the longest row. Handy for tests
    /// and small fixtures.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let cells: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c != '.' && c != ' ').collect())
            .collect();
        Self::from_fn(width, rows.len(), |x, y| {
            cells[y].get(x).copied().unwrap_or(false)
        })
    }

    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] != 0
    }

    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Copy into an `image::GrayImage`; `None` if a side does not fit in `u32`.
    pub fn to_luma(&self) -> Option<::image::GrayImage> {
        let width = u32::try_from(self.width).ok()?;
        let height = u32::try_from(self.height).ok()?;
        ::image::GrayImage::from_raw(width, height, self.data.clone())
    }
}
