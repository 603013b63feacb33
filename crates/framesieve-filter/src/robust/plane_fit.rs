use framesieve_frame::Frame;

use crate::{
    delay_line::DelayLine,
    error::FilterError,
    stencil::{Neighborhood, Stencil3},
};

/// A candidate plane through 6 of the 9 samples of a 3x3 neighbourhood.
///
/// `residual` holds the rows of the scaled least-squares residual operator:
/// the fit error is the sum of the squared row products divided by
/// `residual_div`. `estimate` gives the fitted centre value, scaled by
/// `estimate_div`.
struct PlaneModel {
    residual: [[f32; 9]; 6],
    residual_div: f32,
    estimate: [f32; 9],
    estimate_div: f32,
}

#[rustfmt::skip]
const PLANE_MODELS: [PlaneModel; 8] = [
    // top: z0 z1 z2 z3 z4 z5
    PlaneModel {
        residual: [
            [-5.0,  4.0,  1.0,  3.0,  0.0, -3.0,  0.0,  0.0,  0.0],
            [ 4.0, -8.0,  4.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0],
            [ 1.0,  4.0, -5.0, -3.0,  0.0,  3.0,  0.0,  0.0,  0.0],
            [ 3.0,  0.0, -3.0, -5.0,  4.0,  1.0,  0.0,  0.0,  0.0],
            [ 0.0,  0.0,  0.0,  4.0, -8.0,  4.0,  0.0,  0.0,  0.0],
            [-3.0,  0.0,  3.0,  1.0,  4.0, -5.0,  0.0,  0.0,  0.0],
        ],
        residual_div: 144.0,
        estimate: [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        estimate_div: 3.0,
    },
    // top-right: z0 z1 z2 z4 z5 z8
    PlaneModel {
        residual: [
            [-3.0,  3.0, -1.0,  0.0,  3.0, -1.0,  0.0,  0.0, -1.0],
            [ 3.0, -7.0,  3.0,  0.0,  1.0,  1.0,  0.0,  0.0, -1.0],
            [-1.0,  3.0, -3.0,  0.0, -1.0,  3.0,  0.0,  0.0, -1.0],
            [ 3.0,  1.0, -1.0,  0.0, -7.0,  1.0,  0.0,  0.0,  3.0],
            [-1.0,  1.0,  3.0,  0.0,  1.0, -7.0,  0.0,  0.0,  3.0],
            [-1.0, -1.0, -1.0,  0.0,  3.0,  3.0,  0.0,  0.0, -3.0],
        ],
        residual_div: 100.0,
        estimate: [3.0, 1.0, -1.0, 0.0, 3.0, 1.0, 0.0, 0.0, 3.0],
        estimate_div: 10.0,
    },
    // right: z1 z2 z4 z5 z7 z8
    PlaneModel {
        residual: [
            [ 0.0, -5.0,  3.0,  0.0,  4.0,  0.0,  0.0,  1.0, -3.0],
            [ 0.0,  3.0, -5.0,  0.0,  0.0,  4.0,  0.0, -3.0,  1.0],
            [ 0.0,  4.0,  0.0,  0.0, -8.0,  0.0,  0.0,  4.0,  0.0],
            [ 0.0,  0.0,  4.0,  0.0,  0.0, -8.0,  0.0,  0.0,  4.0],
            [ 0.0,  1.0, -3.0,  0.0,  4.0,  0.0,  0.0, -5.0,  3.0],
            [ 0.0, -3.0,  1.0,  0.0,  0.0,  4.0,  0.0,  3.0, -5.0],
        ],
        residual_div: 144.0,
        estimate: [0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
        estimate_div: 3.0,
    },
    // bottom-right: z2 z4 z5 z6 z7 z8
    PlaneModel {
        residual: [
            [ 0.0,  0.0, -3.0,  0.0,  3.0,  3.0, -1.0, -1.0, -1.0],
            [ 0.0,  0.0,  3.0,  0.0, -7.0,  1.0,  3.0,  1.0, -1.0],
            [ 0.0,  0.0,  3.0,  0.0,  1.0, -7.0, -1.0,  1.0,  3.0],
            [ 0.0,  0.0, -1.0,  0.0,  3.0, -1.0, -3.0,  3.0, -1.0],
            [ 0.0,  0.0, -1.0,  0.0,  1.0,  1.0,  3.0, -7.0,  3.0],
            [ 0.0,  0.0, -1.0,  0.0, -1.0,  3.0, -1.0,  3.0, -3.0],
        ],
        residual_div: 100.0,
        estimate: [0.0, 0.0, 3.0, 0.0, 3.0, 1.0, 3.0, 1.0, -1.0],
        estimate_div: 10.0,
    },
    // bottom: z3 z4 z5 z6 z7 z8
    PlaneModel {
        residual: [
            [ 0.0,  0.0,  0.0, -5.0,  4.0,  1.0,  3.0,  0.0, -3.0],
            [ 0.0,  0.0,  0.0,  4.0, -8.0,  4.0,  0.0,  0.0,  0.0],
            [ 0.0,  0.0,  0.0,  1.0,  4.0, -5.0, -3.0,  0.0,  3.0],
            [ 0.0,  0.0,  0.0,  3.0,  0.0, -3.0, -5.0,  4.0,  1.0],
            [ 0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  4.0, -8.0,  4.0],
            [ 0.0,  0.0,  0.0, -3.0,  0.0,  3.0,  1.0,  4.0, -5.0],
        ],
        residual_div: 144.0,
        estimate: [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        estimate_div: 3.0,
    },
    // bottom-left: z0 z3 z4 z6 z7 z8
    PlaneModel {
        residual: [
            [-3.0,  0.0,  0.0,  3.0,  3.0,  0.0, -1.0, -1.0, -1.0],
            [ 3.0,  0.0,  0.0, -7.0,  1.0,  0.0,  3.0,  1.0, -1.0],
            [ 3.0,  0.0,  0.0,  1.0, -7.0,  0.0, -1.0,  1.0,  3.0],
            [-1.0,  0.0,  0.0,  3.0, -1.0,  0.0, -3.0,  3.0, -1.0],
            [-1.0,  0.0,  0.0,  1.0,  1.0,  0.0,  3.0, -7.0,  3.0],
            [-1.0,  0.0,  0.0, -1.0,  3.0,  0.0, -1.0,  3.0, -3.0],
        ],
        residual_div: 100.0,
        estimate: [3.0, 0.0, 0.0, 1.0, 3.0, 0.0, -1.0, 1.0, 3.0],
        estimate_div: 10.0,
    },
    // left: z0 z1 z3 z4 z6 z7
    PlaneModel {
        residual: [
            [-5.0,  3.0,  0.0,  4.0,  0.0,  0.0,  1.0, -3.0,  0.0],
            [ 3.0, -5.0,  0.0,  0.0,  4.0,  0.0, -3.0,  1.0,  0.0],
            [ 4.0,  0.0,  0.0, -8.0,  0.0,  0.0,  4.0,  0.0,  0.0],
            [ 0.0,  4.0,  0.0,  0.0, -8.0,  0.0,  0.0,  4.0,  0.0],
            [ 1.0, -3.0,  0.0,  4.0,  0.0,  0.0, -5.0,  3.0,  0.0],
            [-3.0,  1.0,  0.0,  0.0,  4.0,  0.0,  3.0, -5.0,  0.0],
        ],
        residual_div: 144.0,
        estimate: [0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
        estimate_div: 3.0,
    },
    // top-left: z0 z1 z2 z3 z4 z6
    PlaneModel {
        residual: [
            [-3.0,  3.0, -1.0,  3.0, -1.0,  0.0, -1.0,  0.0,  0.0],
            [ 3.0, -7.0,  3.0,  1.0,  1.0,  0.0, -1.0,  0.0,  0.0],
            [-1.0,  3.0, -3.0, -1.0,  3.0,  0.0, -1.0,  0.0,  0.0],
            [ 3.0,  1.0, -1.0, -7.0,  1.0,  0.0,  3.0,  0.0,  0.0],
            [-1.0,  1.0,  3.0,  1.0, -7.0,  0.0,  3.0,  0.0,  0.0],
            [-1.0, -1.0, -1.0,  3.0,  3.0,  0.0, -3.0,  0.0,  0.0],
        ],
        residual_div: 100.0,
        estimate: [-1.0, 1.0, 3.0, 1.0, 3.0, 0.0, 3.0, 0.0, 0.0],
        estimate_div: 10.0,
    },
];

/// Dot product over the non-zero coefficients, accumulated in index order.
#[inline]
fn sparse_dot(coeffs: &[f32; 9], z: &Neighborhood) -> f32 {
    let mut acc: Option<f32> = None;
    for (&c, &v) in coeffs.iter().zip(z.iter()) {
        if c != 0.0 {
            let term = c * v;
            acc = Some(match acc {
                Some(s) => s + term,
                None => term,
            });
        }
    }
    acc.unwrap_or(0.0)
}

impl PlaneModel {
    #[inline]
    fn fit_error(&self, z: &Neighborhood) -> f32 {
        let mut sum = sqr(sparse_dot(&self.residual[0], z));
        for row in &self.residual[1..] {
            sum += sqr(sparse_dot(row, z));
        }
        sum / self.residual_div
    }

    #[inline]
    fn center(&self, z: &Neighborhood) -> f32 {
        sparse_dot(&self.estimate, z) / self.estimate_div
    }
}

#[inline]
fn sqr(x: f32) -> f32 {
    x * x
}

/// Fit errors of the 8 candidate planes of a 3x3 neighbourhood.
///
/// The candidates are, in order: top, top-right, right, bottom-right,
/// bottom, bottom-left, left and top-left half-neighbourhoods of 6 samples.
/// Each error is the sum of squared least-squares residuals of its samples.
pub fn plane_fit_errors(z: &Neighborhood) -> [f32; 8] {
    std::array::from_fn(|m| PLANE_MODELS[m].fit_error(z))
}

/// Index of the candidate plane with the smallest fit error.
///
/// Ties go to the lowest index.
pub fn best_plane(z: &Neighborhood) -> usize {
    let errors = plane_fit_errors(z);
    let mut best = 0;
    for (m, &e) in errors.iter().enumerate().skip(1) {
        if e < errors[best] {
            best = m;
        }
    }
    best
}

/// Corrected centre value of a 3x3 neighbourhood.
///
/// The centre is replaced by the value of the best fitting candidate plane
/// at the centre position.
///
/// # Examples
///
/// ```
/// use framesieve_filter::robust::plane_fit_pixel;
///
/// // a step edge below the centre row
/// let z = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 50.0, 50.0, 50.0];
/// assert_eq!(plane_fit_pixel(&z), 10.0);
/// ```
pub fn plane_fit_pixel(z: &Neighborhood) -> f32 {
    PLANE_MODELS[best_plane(z)].center(z)
}

/// Plane-fit depth correction filter.
///
/// Every interior pixel is replaced by [`plane_fit_pixel`] of its 3x3
/// neighbourhood. Depth discontinuities are preserved because the winning
/// plane only uses samples from one side of the edge.
///
/// # Arguments
///
/// * `src` - The source depth frame.
/// * `dst` - The destination frame. Its 1-pixel border is left untouched.
pub fn plane_fit<'a>(
    src: &Frame<f32>,
    dst: &'a mut Frame<f32>,
) -> Result<&'a mut Frame<f32>, FilterError> {
    src.check_same_size(dst)?;
    let stencil = Stencil3::new(src.size())?;
    stencil.apply(src.as_slice(), dst.as_slice_mut(), |_, z| plane_fit_pixel(z));
    Ok(dst)
}

/// Plane-fit depth correction filter computed in place.
///
/// See [`plane_fit`].
pub fn plane_fit_inplace<'a>(
    buf: &'a mut Frame<f32>,
    delay: &mut DelayLine<f32>,
) -> Result<&'a mut Frame<f32>, FilterError> {
    let stencil = Stencil3::new(buf.size())?;
    stencil.apply_inplace(buf.as_slice_mut(), delay, |_, z| plane_fit_pixel(z))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    const MODEL_SAMPLES: [[usize; 6]; 8] = [
        [0, 1, 2, 3, 4, 5],
        [0, 1, 2, 4, 5, 8],
        [1, 2, 4, 5, 7, 8],
        [2, 4, 5, 6, 7, 8],
        [3, 4, 5, 6, 7, 8],
        [0, 3, 4, 6, 7, 8],
        [0, 1, 3, 4, 6, 7],
        [0, 1, 2, 3, 4, 6],
    ];

    fn det3(m: [[f64; 3]; 3]) -> f64 {
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Least-squares plane through the given samples: (sum of squared residuals, centre value).
    fn lstsq_plane(z: &Neighborhood, samples: &[usize; 6]) -> (f64, f64) {
        let mut ata = [[0f64; 3]; 3];
        let mut atz = [0f64; 3];
        for &k in samples {
            let row = [1.0, (k % 3) as f64, (k / 3) as f64];
            for i in 0..3 {
                for j in 0..3 {
                    ata[i][j] += row[i] * row[j];
                }
                atz[i] += row[i] * z[k] as f64;
            }
        }

        // cramer's rule
        let d = det3(ata);
        let mut coef = [0f64; 3];
        for (c, coef_c) in coef.iter_mut().enumerate() {
            let mut m = ata;
            for r in 0..3 {
                m[r][c] = atz[r];
            }
            *coef_c = det3(m) / d;
        }

        let ssr = samples
            .iter()
            .map(|&k| {
                let fit = coef[0] + coef[1] * (k % 3) as f64 + coef[2] * (k / 3) as f64;
                (z[k] as f64 - fit).powi(2)
            })
            .sum();

        (ssr, coef[0] + coef[1] + coef[2])
    }

    #[test]
    fn test_models_match_least_squares() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let z: Neighborhood = std::array::from_fn(|_| rng.random_range(0.0..10.0));
            let errors = plane_fit_errors(&z);
            for (m, samples) in MODEL_SAMPLES.iter().enumerate() {
                let (ssr, center) = lstsq_plane(&z, samples);
                assert_relative_eq!(errors[m] as f64, ssr, epsilon = 1e-3, max_relative = 1e-4);
                assert_relative_eq!(PLANE_MODELS[m].center(&z) as f64, center, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_planar_patch_returns_center() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let a: f32 = rng.random_range(100.0..2000.0);
            let b: f32 = rng.random_range(-20.0..20.0);
            let c: f32 = rng.random_range(-20.0..20.0);
            let z: Neighborhood =
                std::array::from_fn(|k| a + b * (k % 3) as f32 + c * (k / 3) as f32);

            let e = plane_fit_errors(&z);
            assert!(e.iter().all(|&e| e < 1e-2 * a));
            assert_relative_eq!(plane_fit_pixel(&z), z[4], max_relative = 1e-5);
        }
    }

    #[test]
    fn test_unique_diagonal_plane() {
        // only the top-right half lies on the plane z = x
        let z = [0.0, 1.0, 2.0, 100.0, 1.0, 2.0, 100.0, 100.0, 2.0];
        let errors = plane_fit_errors(&z);
        assert_eq!(errors[1], 0.0);
        assert!(errors.iter().enumerate().all(|(m, &e)| m == 1 || e > 0.0));
        assert_eq!(best_plane(&z), 1);
        assert_eq!(plane_fit_pixel(&z), 1.0);
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        let z = [4.0; 9];
        assert_eq!(plane_fit_errors(&z), [0.0; 8]);
        assert_eq!(best_plane(&z), 0);
        assert_eq!(plane_fit_pixel(&z), 4.0);
    }

    #[test]
    fn test_plane_fit_frame() -> Result<(), FilterError> {
        #[rustfmt::skip]
        let src = Frame::new(
            [5, 5].into(),
            vec![
                10.0, 10.0, 10.0, 10.0, 10.0,
                10.0, 10.0, 10.0, 10.0, 10.0,
                10.0, 10.0, 10.0, 10.0, 10.0,
                50.0, 50.0, 50.0, 50.0, 50.0,
                50.0, 50.0, 50.0, 50.0, 50.0,
            ],
        )?;
        let mut dst = src.clone();
        plane_fit(&src, &mut dst)?;

        // the edge stays sharp
        for x in 1..4 {
            assert_eq!(dst.get_pixel(x, 1)?, 10.0);
            assert_eq!(dst.get_pixel(x, 2)?, 10.0);
            assert_eq!(dst.get_pixel(x, 3)?, 50.0);
        }

        let mut buf = src.clone();
        let mut delay = DelayLine::with_row_lag(5, 3)?;
        plane_fit_inplace(&mut buf, &mut delay)?;
        assert_eq!(buf, dst);

        Ok(())
    }
}
