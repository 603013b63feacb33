use framesieve_frame::{Frame, FrameSize};

use crate::error::FilterError;

fn check_alpha(alpha: f32) -> Result<f32, FilterError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(FilterError::InvalidAlpha(alpha));
    }
    Ok(alpha)
}

/// First-order recursive smoothing of a frame stream.
///
/// Every pixel follows `state = state * alpha + (1 - alpha) * input`. The
/// state frame is both the filter memory and its output. An `alpha` close
/// to zero forgets quickly, an `alpha` of one freezes the state.
///
/// # Examples
///
/// ```
/// use framesieve_frame::Frame;
/// use framesieve_filter::temporal::Iir1;
///
/// let mut iir = Iir1::new([2, 1].into(), 0.5).unwrap();
/// let src = Frame::new([2, 1].into(), vec![2.0, 4.0]).unwrap();
///
/// assert_eq!(iir.process(&src).unwrap().as_slice(), &[1.0, 2.0]);
/// assert_eq!(iir.process(&src).unwrap().as_slice(), &[1.5, 3.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Iir1 {
    alpha: f32,
    state: Frame<f32>,
}

impl Iir1 {
    /// Create the filter with a zero initial state.
    ///
    /// # Errors
    ///
    /// If `alpha` is outside of `[0, 1]`, an error is returned.
    pub fn new(size: FrameSize, alpha: f32) -> Result<Self, FilterError> {
        Self::with_state(Frame::from_size_val(size, 0.0)?, alpha)
    }

    /// Create the filter starting from the given state, usually the first frame.
    pub fn with_state(state: Frame<f32>, alpha: f32) -> Result<Self, FilterError> {
        let alpha = check_alpha(alpha)?;
        log::debug!("iir1 filter on {} frames, alpha {}", state.size(), alpha);
        Ok(Self { alpha, state })
    }

    /// Blend `src` into the state and return the state.
    pub fn process(&mut self, src: &Frame<f32>) -> Result<&Frame<f32>, FilterError> {
        self.state.check_same_size(src)?;

        let alpha = self.alpha;
        let gain = 1.0 - alpha;
        self.state
            .as_slice_mut()
            .iter_mut()
            .zip(src.as_slice())
            .for_each(|(s, &x)| *s = *s * alpha + gain * x);

        Ok(&self.state)
    }

    /// The current state.
    pub fn state(&self) -> &Frame<f32> {
        &self.state
    }

    /// The forgetting factor.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// Coefficients of a second-order section.
///
/// The section computes `y = b1 * x + st1`, then updates
/// `st1 = b2 * x + st2 - a2 * y` and `st2 = b3 * x - a3 * y`, and outputs
/// `scale * y`. The leading denominator coefficient is normalized to one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SosCoefficients {
    /// Numerator coefficient of the current input.
    pub b1: f32,
    /// Numerator coefficient of the previous input.
    pub b2: f32,
    /// Numerator coefficient of the input two frames back.
    pub b3: f32,
    /// Denominator coefficient of the previous output.
    pub a2: f32,
    /// Denominator coefficient of the output two frames back.
    pub a3: f32,
    /// Output gain.
    pub scale: f32,
}

impl From<[f32; 6]> for SosCoefficients {
    /// Coefficients in `[b1, b2, b3, a2, a3, scale]` order.
    fn from(c: [f32; 6]) -> Self {
        Self {
            b1: c[0],
            b2: c[1],
            b3: c[2],
            a2: c[3],
            a3: c[4],
            scale: c[5],
        }
    }
}

/// Second-order recursive filter applied to every pixel of a frame stream.
///
/// Implemented in transposed direct form II with two state frames.
#[derive(Clone, Debug)]
pub struct IirSos {
    coeffs: SosCoefficients,
    st1: Frame<f32>,
    st2: Frame<f32>,
}

impl IirSos {
    /// Create the filter with zeroed state frames.
    pub fn new(size: FrameSize, coeffs: SosCoefficients) -> Result<Self, FilterError> {
        let st1 = Frame::from_size_val(size, 0.0)?;
        let st2 = st1.clone();
        log::debug!("sos filter on {} frames, {:?}", size, coeffs);
        Ok(Self { coeffs, st1, st2 })
    }

    /// The section coefficients.
    pub fn coefficients(&self) -> &SosCoefficients {
        &self.coeffs
    }

    /// Feed `src` through the section and write the response into `dst`.
    pub fn process<'a>(
        &mut self,
        src: &Frame<f32>,
        dst: &'a mut Frame<f32>,
    ) -> Result<&'a mut Frame<f32>, FilterError> {
        self.st1.check_same_size(src)?;
        self.st1.check_same_size(dst)?;

        let SosCoefficients {
            b1,
            b2,
            b3,
            a2,
            a3,
            scale,
        } = self.coeffs;

        src.as_slice()
            .iter()
            .zip(dst.as_slice_mut())
            .zip(self.st1.as_slice_mut().iter_mut().zip(self.st2.as_slice_mut()))
            .for_each(|((&x, out), (st1, st2))| {
                let mut y = b1 * x;
                y += *st1;

                *st1 = b2 * x;
                *st1 += *st2;
                *st1 += y * -a2;

                *st2 = b3 * x;
                *st2 += y * -a3;

                *out = y * scale;
            });

        Ok(dst)
    }
}

/// Confidence-weighted running average of a frame stream.
///
/// Keeps exponentially weighted sums of `weight` and `weight * input` and
/// outputs their ratio. Pixels whose accumulated weight is zero output zero.
#[derive(Clone, Debug)]
pub struct WeightedAverage {
    alpha: f32,
    numer: Frame<f32>,
    denom: Frame<f32>,
}

impl WeightedAverage {
    /// Create the filter with zeroed sums.
    ///
    /// # Errors
    ///
    /// If `alpha` is outside of `[0, 1]`, an error is returned.
    pub fn new(size: FrameSize, alpha: f32) -> Result<Self, FilterError> {
        let alpha = check_alpha(alpha)?;
        let numer = Frame::from_size_val(size, 0.0)?;
        let denom = numer.clone();
        log::debug!("weighted average on {} frames, alpha {}", size, alpha);
        Ok(Self {
            alpha,
            numer,
            denom,
        })
    }

    /// Accumulated weight per pixel.
    pub fn weight_sum(&self) -> &Frame<f32> {
        &self.denom
    }

    /// Accumulate `src` with per-pixel `weight` and write the average into `dst`.
    pub fn process<'a>(
        &mut self,
        src: &Frame<f32>,
        weight: &Frame<f32>,
        dst: &'a mut Frame<f32>,
    ) -> Result<&'a mut Frame<f32>, FilterError> {
        self.numer.check_same_size(src)?;
        self.numer.check_same_size(weight)?;
        self.numer.check_same_size(dst)?;

        let alpha = self.alpha;
        let gain = 1.0 - alpha;

        self.numer
            .as_slice_mut()
            .iter_mut()
            .zip(self.denom.as_slice_mut())
            .zip(src.as_slice().iter().zip(weight.as_slice()))
            .zip(dst.as_slice_mut())
            .for_each(|(((n, d), (&x, &w)), out)| {
                *d = *d * alpha + gain * w;
                *n = *n * alpha + gain * w * x;
                *out = if *d != 0.0 { *n / *d } else { 0.0 };
            });

        Ok(dst)
    }
}
