/// Create a cross-5 averaging kernel.
///
/// # Returns
///
/// The taps in north, west, centre, east, south order.
pub fn box_cross() -> [f32; 5] {
    [1.0 / 5.0; 5]
}

/// Create a 3x3 averaging kernel.
///
/// # Returns
///
/// The taps in row-major order.
pub fn box_square3() -> [f32; 9] {
    [1.0 / 9.0; 9]
}

/// Create a 3x3 gaussian kernel.
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// The normalized taps in row-major order.
pub fn gaussian_square3(sigma: f32) -> [f32; 9] {
    let sigma_sq = sigma * sigma;
    let weight = |d: f32| (-(d * d) / (2.0 * sigma_sq)).exp();
    let kernel_1d = [weight(-1.0), weight(0.0), weight(1.0)];

    let mut kernel = [0.0; 9];
    for (i, k) in kernel.iter_mut().enumerate() {
        *k = kernel_1d[i / 3] * kernel_1d[i % 3];
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Create a cross-5 laplacian kernel.
pub fn laplacian_cross() -> [f32; 5] {
    [1.0, 1.0, -4.0, 1.0, 1.0]
}
