//! Integer clamping for scroll offsets

/// Clamp `value` into `[min, max]`, then floor it
///
/// The caller guarantees `min <= max`. Scroll offsets pass
/// `[0, scroll_extent - client_extent]` so the container never lands on a
/// fractional or out-of-range position.
///
/// ```
/// use scrollzone::clamp_int;
///
/// assert_eq!(clamp_int(0.0, 2.0, 0.5), 0);
/// assert_eq!(clamp_int(0.0, 1.5, 2.0), 1);
/// ```
pub fn clamp_int(min: f32, max: f32, value: f32) -> i32 {
    value.max(min).min(max).floor() as i32
}
