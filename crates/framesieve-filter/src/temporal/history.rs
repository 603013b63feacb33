use framesieve_frame::{Frame, FrameSize};

use crate::error::FilterError;

/// A circular buffer of the `N` most recent frames of a stream.
///
/// The slots are overwritten in turn: the rotation index names the slot that
/// holds the oldest frame, which is the one replaced by the next
/// [`FrameHistory::push`]. A filter over a window of `K` frames keeps
/// `K - 1` frames here and receives the newest one as its input.
///
/// # Examples
///
/// ```
/// use framesieve_frame::Frame;
/// use framesieve_filter::temporal::FrameHistory;
///
/// let mut history = FrameHistory::<2>::new([2, 2].into()).unwrap();
/// history.push(&Frame::from_size_val([2, 2].into(), 1.0).unwrap()).unwrap();
/// history.push(&Frame::from_size_val([2, 2].into(), 2.0).unwrap()).unwrap();
///
/// let [older, newer] = history.oldest_first();
/// assert_eq!(older.as_slice(), &[1.0; 4]);
/// assert_eq!(newer.as_slice(), &[2.0; 4]);
/// ```
#[derive(Clone, Debug)]
pub struct FrameHistory<const N: usize> {
    frames: [Frame<f32>; N],
    oldest: usize,
}

impl<const N: usize> FrameHistory<N> {
    /// Create a history of `N` frames, all set to zero.
    ///
    /// # Errors
    ///
    /// If `N` is zero or the size is empty, an error is returned.
    pub fn new(size: FrameSize) -> Result<Self, FilterError> {
        if N == 0 {
            return Err(FilterError::ZeroCapacity);
        }

        let zeros = Frame::from_size_val(size, 0.0)?;
        log::debug!("allocating frame history of {} frames of {}", N, size);

        Ok(Self {
            frames: std::array::from_fn(|_| zeros.clone()),
            oldest: 0,
        })
    }

    /// The size of the stored frames.
    pub fn size(&self) -> FrameSize {
        self.frames[0].size()
    }

    /// Number of frames kept.
    pub fn depth(&self) -> usize {
        N
    }

    /// Slot that holds the oldest frame.
    pub fn rotation_index(&self) -> usize {
        self.oldest
    }

    /// The stored frames from the oldest to the newest.
    pub fn oldest_first(&self) -> [&Frame<f32>; N] {
        std::array::from_fn(|k| &self.frames[(self.oldest + k) % N])
    }

    /// The most recently pushed frame.
    pub fn newest(&self) -> &Frame<f32> {
        &self.frames[(self.oldest + N - 1) % N]
    }

    /// Replace the oldest frame with a copy of `frame`, which becomes the newest.
    pub fn push(&mut self, frame: &Frame<f32>) -> Result<(), FilterError> {
        self.frames[self.oldest].copy_from(frame)?;
        self.oldest = (self.oldest + 1) % N;
        Ok(())
    }

    /// Set every stored frame to a copy of `frame`.
    ///
    /// Useful to prime a filter with the first frame of a stream instead of
    /// zeros. The rotation index is left unchanged.
    pub fn fill(&mut self, frame: &Frame<f32>) -> Result<(), FilterError> {
        for slot in self.frames.iter_mut() {
            slot.copy_from(frame)?;
        }
        Ok(())
    }
}
