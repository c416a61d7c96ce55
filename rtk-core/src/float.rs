/// Floating-point tolerance shared by every approximate comparison in the crate
///
/// Absolute tolerance used for matrix, tuple and color equality and for
/// detecting zero determinants and zero divisors.
pub const EPSILON: f64 = 1e-5;

/// Whether `a` and `b` differ by less than [`EPSILON`].
pub fn float_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Whether `value` is within [`EPSILON`] of zero.
pub fn is_zero(value: f64) -> bool {
    float_eq(value, 0.0)
}
