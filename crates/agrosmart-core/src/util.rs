//! Numeric helpers shared across the crate.

/// Round `value` to `decimals` places, half away from zero.
///
/// ```
/// use agrosmart_core::util::round_to;
///
/// assert_eq!(round_to(65.0251, 2), 65.03);
/// assert_eq!(round_to(6.449, 1), 6.4);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Arithmetic mean, or `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
