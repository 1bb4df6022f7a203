//! Small math helpers shared by the DSP building blocks.

/// Flush values that are about to become subnormal to zero.
///
/// Feedback paths that decay towards silence eventually produce IEEE 754
/// subnormals, which are extremely slow on most CPUs. Anything below
/// `1e-20` is inaudible, so it is replaced by an exact zero.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Convert a linear amplitude to decibels.
///
/// Returns `-120.0` for silence so meters and stats never see `-inf`.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * libm::log10f(linear)
    }
}
