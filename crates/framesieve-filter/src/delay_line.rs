use crate::error::FilterError;

/// A fixed-capacity circular FIFO.
///
/// Every call to [`DelayLine::io`] stores one value and hands back the value
/// stored `capacity` calls earlier. The in-place stencil passes push each
/// computed pixel through the line so that the write into the shared buffer
/// trails the stencil reads by `capacity` samples.
///
/// The storage is allocated once; the cursor survives across passes and the
/// line is never reset. Values returned during the first `capacity` calls of
/// a pass are leftovers and must be discarded by the caller.
///
/// # Examples
///
/// ```
/// use framesieve_filter::DelayLine;
///
/// let mut line = DelayLine::new(2).unwrap();
/// assert_eq!(line.io(1.0), 0.0);
/// assert_eq!(line.io(2.0), 0.0);
/// assert_eq!(line.io(3.0), 1.0);
/// assert_eq!(line.io(4.0), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct DelayLine<T> {
    buf: Vec<T>,
    cursor: usize,
}

impl<T> DelayLine<T>
where
    T: Copy + Default,
{
    /// Create a delay line holding `capacity` samples, all set to the default value.
    ///
    /// # Errors
    ///
    /// If `capacity` is zero, an error is returned.
    pub fn new(capacity: usize) -> Result<Self, FilterError> {
        if capacity == 0 {
            return Err(FilterError::ZeroCapacity);
        }

        log::debug!("allocating delay line of {} samples", capacity);

        Ok(Self {
            buf: vec![T::default(); capacity],
            cursor: 0,
        })
    }

    /// Create a delay line that lags `rows` full frame rows behind.
    ///
    /// # Arguments
    ///
    /// * `width` - The frame width in pixels.
    /// * `rows` - The number of rows the writes trail the reads.
    pub fn with_row_lag(width: usize, rows: usize) -> Result<Self, FilterError> {
        Self::new(width * rows)
    }

    /// Number of samples held by the line.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Push `value` and return the value pushed `capacity` calls earlier.
    #[inline]
    pub fn io(&mut self, value: T) -> T {
        let evicted = std::mem::replace(&mut self.buf[self.cursor], value);
        self.cursor += 1;
        if self.cursor == self.buf.len() {
            self.cursor = 0;
        }
        evicted
    }
}
