use crate::constants::{PI, TWO_PI};

/// Arccosine with the argument clamped to [-1, 1] to absorb round-off.
pub fn safe_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

/// Wraps an angle into [0, 2π).
pub fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TWO_PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= TWO_PI {
        0.0
    } else {
        wrapped
    }
}

/// Wraps an angle into [-π, π).
pub fn wrap_pi(angle: f64) -> f64 {
    wrap_two_pi(angle + PI) - PI
}

/// Mean direction of a set of angles, in [0, 2π). Returns `None` for an empty set.
pub fn circular_mean<I: IntoIterator<Item = f64>>(angles: I) -> Option<f64> {
    let (mut sin_sum, mut cos_sum, mut count) = (0.0, 0.0, 0usize);
    for angle in angles {
        sin_sum += angle.sin();
        cos_sum += angle.cos();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(wrap_two_pi(sin_sum.atan2(cos_sum)))
}

/// Arithmetic mean. Returns `None` for an empty set.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(1.0 + 1e-12, 0.0; "round-off above one")]
    #[test_case(-1.0 - 1e-12, PI; "round-off below minus one")]
    #[test_case(0.0, PI / 2.0; "zero")]
    fn test_safe_acos(x: f64, expected: f64) {
        assert_abs_diff_eq!(safe_acos(x), expected, epsilon = 1e-12);
    }

    #[test_case(-PI / 2.0, 1.5 * PI; "negative quarter turn")]
    #[test_case(TWO_PI, 0.0; "full turn")]
    #[test_case(5.0 * PI, PI; "several turns")]
    #[test_case(-1e-18, 0.0; "tiny negative")]
    fn test_wrap_two_pi(angle: f64, expected: f64) {
        let wrapped = wrap_two_pi(angle);
        assert!((0.0..TWO_PI).contains(&wrapped));
        assert_abs_diff_eq!(wrapped, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_pi() {
        assert_abs_diff_eq!(wrap_pi(1.5 * PI), -0.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_pi(0.25), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn circular_mean_across_the_wrap() {
        let mean = circular_mean([TWO_PI - 0.1, 0.1]).unwrap();
        assert!(mean < 1e-12 || TWO_PI - mean < 1e-12);

        let mean = circular_mean([1.0, 1.2]).unwrap();
        assert_abs_diff_eq!(mean, 1.1, epsilon = 1e-12);

        assert!(circular_mean(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn arithmetic_mean() {
        assert_abs_diff_eq!(mean([1.0, 2.0, 6.0]).unwrap(), 3.0, epsilon = 1e-15);
        assert!(mean(std::iter::empty()).is_none());
    }
}
