use framesieve_frame::FrameSize;

use crate::{delay_line::DelayLine, error::FilterError};

/// Values of a 3x3 neighbourhood in row-major order.
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
pub type Neighborhood = [f32; 9];

/// Iterates the interior pixels of a frame with their 3x3 neighbourhoods.
///
/// The neighbour positions come from an offset table computed once for the
/// frame width. The outermost 1-pixel ring of the destination is never
/// written.
#[derive(Clone, Debug)]
pub struct Stencil3 {
    size: FrameSize,
    offsets: [usize; 9],
}

impl Stencil3 {
    /// Build the offset table for frames of the given size.
    ///
    /// # Errors
    ///
    /// If the frame is smaller than 3x3, an error is returned.
    pub fn new(size: FrameSize) -> Result<Self, FilterError> {
        if size.width < 3 || size.height < 3 {
            return Err(FilterError::FrameTooSmall(size.width, size.height));
        }

        let w = size.width;
        let offsets = [0, 1, 2, w, w + 1, w + 2, 2 * w, 2 * w + 1, 2 * w + 2];

        Ok(Self { size, offsets })
    }

    /// The frame size the offsets were built for.
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Offsets of the nine neighbours relative to the top-left neighbour.
    pub fn offsets(&self) -> &[usize; 9] {
        &self.offsets
    }

    /// Smallest delay (in samples) that keeps an in-place pass from reading
    /// a pixel it has already overwritten.
    pub fn min_delay(&self) -> usize {
        self.size.width + 1
    }

    /// Gather the neighbourhood centred on flat index `center`.
    #[inline]
    pub fn gather(&self, data: &[f32], center: usize) -> Neighborhood {
        let top_left = center - self.size.width - 1;
        self.offsets.map(|o| data[top_left + o])
    }

    /// Evaluate `f` on every interior pixel of `src` and store the result in `dst`.
    ///
    /// `f` receives the flat index of the centre pixel and its neighbourhood.
    pub fn apply(
        &self,
        src: &[f32],
        dst: &mut [f32],
        mut f: impl FnMut(usize, &Neighborhood) -> f32,
    ) {
        let (w, h) = (self.size.width, self.size.height);
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let i = y * w + x;
                dst[i] = f(i, &self.gather(src, i));
            }
        }
    }

    /// Evaluate `f` on every interior pixel of `buf` and write the results back into `buf`.
    ///
    /// The pixels are visited as one flat stream from `(1, 1)` to
    /// `(W - 2, H - 2)`, including the wrap-around border columns in
    /// between. Every value goes through `delay` before being committed,
    /// so the writes trail the reads by `delay.capacity()` samples and the
    /// result is identical to [`Stencil3::apply`] on a copy of the input.
    /// The line is drained with zeros at the end of the pass. Values that
    /// land on a border column are dropped.
    ///
    /// # Errors
    ///
    /// If the delay line is shorter than [`Stencil3::min_delay`], an error
    /// is returned before any pixel is touched.
    pub fn apply_inplace(
        &self,
        buf: &mut [f32],
        delay: &mut DelayLine<f32>,
        mut f: impl FnMut(usize, &Neighborhood) -> f32,
    ) -> Result<(), FilterError> {
        let lag = delay.capacity();
        if lag < self.min_delay() {
            return Err(FilterError::DelayLineTooShort(lag, self.min_delay()));
        }

        let (w, h) = (self.size.width, self.size.height);
        let start = w + 1;
        let end = w * (h - 1) - 1;

        let mut produced = 0;
        for i in start..end {
            let value = f(i, &self.gather(buf, i));
            let evicted = delay.io(value);
            if produced >= lag {
                self.commit(buf, start + produced - lag, evicted);
            }
            produced += 1;
        }

        for _ in 0..lag {
            let evicted = delay.io(0.0);
            if produced >= lag {
                self.commit(buf, start + produced - lag, evicted);
            }
            produced += 1;
        }

        Ok(())
    }

    #[inline]
    fn commit(&self, buf: &mut [f32], i: usize, value: f32) {
        let x = i % self.size.width;
        if x != 0 && x != self.size.width - 1 {
            buf[i] = value;
        }
    }
}
