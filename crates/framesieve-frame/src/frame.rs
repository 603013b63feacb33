use crate::error::FrameError;

/// Frame size in pixels
///
/// The width and height are fixed for the lifetime of every filter that
/// is built for a given size.
///
/// # Examples
///
/// ```
/// use framesieve_frame::FrameSize;
///
/// let frame_size = FrameSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(frame_size.width, 10);
/// assert_eq!(frame_size.height, 20);
/// assert_eq!(frame_size.area(), 200);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSize {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
}

impl FrameSize {
    /// Number of pixels in a frame of this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "FrameSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for FrameSize {
    fn from(size: [usize; 2]) -> Self {
        FrameSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A single-channel frame stored row-major in a flat buffer.
///
/// Depth and thermal sensors deliver one sample per pixel, so the frame
/// carries no channel dimension. The buffer is allocated once and only
/// ever mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<T> {
    size: FrameSize,
    data: Vec<T>,
}

/// Per-pixel validity flags (`true` = valid sample, `false` = hole).
pub type ValidityMask = Frame<bool>;

impl<T> Frame<T> {
    /// Create a new frame from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the frame in pixels.
    /// * `data` - The pixel data, row-major.
    ///
    /// # Errors
    ///
    /// If the size is empty or the length of the pixel data does not match
    /// the frame size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use framesieve_frame::{Frame, FrameSize};
    ///
    /// let frame = Frame::new(
    ///     FrameSize {
    ///         width: 3,
    ///         height: 2,
    ///     },
    ///     vec![0f32; 6],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(frame.width(), 3);
    /// assert_eq!(frame.height(), 2);
    /// ```
    pub fn new(size: FrameSize, data: Vec<T>) -> Result<Self, FrameError> {
        if size.width == 0 || size.height == 0 {
            return Err(FrameError::EmptyFrame(size.width, size.height));
        }

        if data.len() != size.area() {
            return Err(FrameError::InvalidDataLength(data.len(), size.area()));
        }

        Ok(Self { size, data })
    }

    /// Create a new frame with every pixel set to `val`.
    ///
    /// # Errors
    ///
    /// If the size is empty, an error is returned.
    pub fn from_size_val(size: FrameSize, val: T) -> Result<Self, FrameError>
    where
        T: Clone,
    {
        Self::new(size, vec![val; size.area()])
    }

    /// Get the size of the frame in pixels.
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Get the width of the frame in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the frame in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of pixels of the frame.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable flat slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the pixel row `y` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a valid row.
    pub fn row(&self, y: usize) -> &[T] {
        let w = self.size.width;
        &self.data[y * w..(y + 1) * w]
    }

    /// Get the pixel value at column `x` and row `y`.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<T, FrameError>
    where
        T: Copy,
    {
        self.check_bounds(x, y)?;
        Ok(self.data[y * self.size.width + x])
    }

    /// Set the pixel value at column `x` and row `y`.
    pub fn set_pixel(&mut self, x: usize, y: usize, val: T) -> Result<(), FrameError> {
        self.check_bounds(x, y)?;
        self.data[y * self.size.width + x] = val;
        Ok(())
    }

    /// Overwrite the pixel data with the contents of `other`.
    ///
    /// # Errors
    ///
    /// If the frames differ in size, an error is returned.
    pub fn copy_from(&mut self, other: &Frame<T>) -> Result<(), FrameError>
    where
        T: Copy,
    {
        self.check_same_size(other)?;
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Check that `other` has the same size as this frame.
    pub fn check_same_size<U>(&self, other: &Frame<U>) -> Result<(), FrameError> {
        if self.size != other.size() {
            return Err(FrameError::InvalidFrameSize(
                other.width(),
                other.height(),
                self.width(),
                self.height(),
            ));
        }
        Ok(())
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), FrameError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(FrameError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        Ok(())
    }
}

impl Frame<bool> {
    /// Count the pixels flagged as valid.
    pub fn count_valid(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}
