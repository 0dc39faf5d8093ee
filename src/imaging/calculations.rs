//! Pure numeric helpers behind the transforms.
//!
//! Nothing in here touches pixel buffers directly, only the per-sample and
//! per-kernel arithmetic, so it can be unit tested exhaustively without
//! constructing images.

/// Luma weights (ITU-R BT.601) applied to R, G, B.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Convert one RGB sample triple to luma, rounded to the nearest integer.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_WEIGHTS[0] * r as f32 + LUMA_WEIGHTS[1] * g as f32 + LUMA_WEIGHTS[2] * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Apply `sample * alpha + beta`, rounded and saturated to `0..=255`.
pub fn scale_sample(sample: u8, alpha: f32, beta: f32) -> u8 {
    (sample as f32 * alpha + beta).round().clamp(0.0, 255.0) as u8
}

/// Largest blur window accepted; bigger sizes are rejected as invalid.
pub const MAX_KSIZE: u32 = 1_000_001;

/// Round an even kernel size up to the next odd one.
///
/// Callers validate `ksize > 1` first; this only fixes parity.
pub fn normalize_ksize(ksize: u32) -> u32 {
    if ksize % 2 == 0 { ksize + 1 } else { ksize }
}

/// Standard deviation used for a Gaussian of the given (odd) size.
///
/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`, the usual rule for deriving sigma
/// from the window size when none is given.
pub fn sigma_for_ksize(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian weights of length `ksize` (odd).
pub fn gaussian_kernel(ksize: u32) -> Vec<f32> {
    let sigma = sigma_for_ksize(ksize);
    let radius = (ksize / 2) as i64;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut weights: Vec<f32> = (-radius..=radius)
        .map(|d| {
            let d = d as f32;
            (-(d * d) / two_sigma_sq).exp()
        })
        .collect();
    let sum: f64 = weights.iter().map(|&w| f64::from(w)).sum();
    for w in &mut weights {
        *w = (f64::from(*w) / sum) as f32;
    }
    weights
}

/// Mirror an out-of-range index back into `0..len` without repeating the
/// edge sample (`gfedcb|abcdefgh|gfedcba`).
pub fn reflect_101(index: i64, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as i64;
    let period = 2 * (len - 1);
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as usize
}
