//! Numeric helpers for keeping floating-point noise out of the model.
//!
//! The resolver and integrator feed their own output back into the next
//! evaluation, so tiny residues would otherwise keep producing tiny forces.
//! These helpers snap such residues to exact zero.

/// Returns `0.0` when `value` is within `epsilon` of zero, `value` otherwise.
///
/// Non-finite inputs collapse to `0.0` as well so that they never reach the
/// integrator.
///
/// # Examples
/// ```
/// use faraday::numeric::snap_to_zero;
/// assert_eq!(snap_to_zero(1e-6, 1e-3), 0.0);
/// assert_eq!(snap_to_zero(-0.5, 1e-3), -0.5);
/// ```
#[must_use]
pub fn snap_to_zero(value: f64, epsilon: f64) -> f64 {
    if !value.is_finite() || value.abs() <= epsilon {
        0.0
    } else {
        value
    }
}

/// Direction of `value` as `-1.0`, `0.0` or `1.0`.
///
/// Unlike [`f64::signum`], zero (of either sign) maps to `0.0`.
#[must_use]
pub fn direction(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Returns `true` when `value` is finite and not negative.
#[must_use]
pub fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Returns `true` when `value` is finite and strictly positive.
#[must_use]
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::inside_band(5e-4, 0.0)]
    #[case::on_band_edge(1e-3, 0.0)]
    #[case::negative_inside_band(-9e-4, 0.0)]
    #[case::outside_band(2e-3, 2e-3)]
    #[case::negative_outside_band(-0.25, -0.25)]
    #[case::not_a_number(f64::NAN, 0.0)]
    #[case::infinite(f64::INFINITY, 0.0)]
    fn snapping(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(snap_to_zero(input, 1e-3).to_bits(), expected.to_bits());
    }

    #[rstest]
    #[case(3.0, 1.0)]
    #[case(-0.1, -1.0)]
    #[case(0.0, 0.0)]
    #[case(-0.0, 0.0)]
    fn direction_cases(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(direction(input), expected);
    }
}
