use crate::errors::SimErrors;
use hifitime::Epoch;

/// Parses a calendar string (e.g. `2024-03-15T00:00:00 UTC`) into ephemeris
/// time, in seconds past J2000.
pub fn parse_epoch(s: &str) -> Result<f64, SimErrors> {
    let epoch = Epoch::from_gregorian_str(s.trim())
        .map_err(|e| SimErrors::InvalidEpoch(format!("{}: {}", s, e)))?;
    Ok(epoch.to_et_seconds())
}

/// Gregorian representation of an ephemeris time, in the ET scale.
pub fn format_epoch(et: f64) -> Result<String, SimErrors> {
    if !et.is_finite() {
        return Err(SimErrors::InvalidEpoch(et.to_string()));
    }
    Ok(format!("{}", Epoch::from_et_seconds(et)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test]
    fn j2000_is_the_origin() {
        let et = parse_epoch("2000-01-01T12:00:00 TT").unwrap();
        // TT and ET differ by the periodic TDB terms only
        assert_abs_diff_eq!(et, 0.0, epsilon = 1e-2);
    }

    #[test]
    fn days_are_86400_seconds_apart() {
        let a = parse_epoch("2024-03-15T00:00:00 UTC").unwrap();
        let b = parse_epoch("2024-03-16T00:00:00 UTC").unwrap();
        assert_abs_diff_eq!(b - a, 86400.0, epsilon = 1e-3);
    }

    #[test]
    fn format_then_parse() {
        let et = parse_epoch("2024-03-15T06:30:00 UTC").unwrap();
        let text = format_epoch(et).unwrap();
        assert_abs_diff_eq!(parse_epoch(&text).unwrap(), et, epsilon = 1e-3);
    }

    #[test_case("not a date"; "garbage")]
    #[test_case("2024-02-30T00:00:00 UTC"; "no such day")]
    fn bad_strings_are_rejected(s: &str) {
        assert!(matches!(parse_epoch(s), Err(SimErrors::InvalidEpoch(_))));
    }

    #[test]
    fn non_finite_et_cannot_be_formatted() {
        assert!(format_epoch(f64::NAN).is_err());
    }
}
