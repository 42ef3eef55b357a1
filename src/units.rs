//! Length attributes with unit suffixes.
//!
//! Units resolve against a 90 DPI user unit, so `1in` is 90 and `1pt` is 1.25.

use crate::error::PathError;
use crate::path::read_float;
use num_traits::Float;
use std::str::FromStr;

/// Scale factor to user units for each recognized suffix. `%` is handled
/// separately since it depends on the reference size.
const UNIT_FACTORS: &[(&str, f64)] = &[
    ("", 1.0),
    ("px", 1.0),
    ("in", 90.0),
    ("mm", 90.0 / 25.4),
    ("cm", 90.0 / 2.54),
    ("pt", 1.25),
    ("pc", 15.0),
    ("em", 1.0),
    ("ex", 1.0),
];

/// Returns the user-unit factor for `unit`, if known.
pub fn unit_factor(unit: &str) -> Option<f64> {
    UNIT_FACTORS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| *factor)
}

/// Parses a length such as `"12"`, `"1.5cm"` or `"50%"` into user units.
///
/// `%` resolves to `reference_size / 100 * value`. An unknown suffix is
/// treated as factor 1 and text with no leading number yields 0; both cases
/// are logged at debug level rather than reported.
///
/// # Example
///
/// ```
/// use svgspline::parse_coord;
///
/// assert_eq!(parse_coord::<f64>("12", 100.0), 12.0);
/// assert_eq!(parse_coord::<f64>("1in", 100.0), 90.0);
/// assert_eq!(parse_coord::<f64>("50%", 200.0), 100.0);
/// ```
pub fn parse_coord<F: Float + FromStr>(text: &str, reference_size: F) -> F {
    match try_parse_coord(text, reference_size) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("unreadable coordinate {:?}: {}", text, err);
            F::zero()
        }
    }
}

/// Like [`parse_coord`] but reports text without a leading number.
///
/// # Errors
///
/// [`PathError::MalformedNumber`] if no number starts the text.
pub fn try_parse_coord<F: Float + FromStr>(text: &str, reference_size: F) -> Result<F, PathError> {
    let (token, end) = read_float(text, 0)?;
    let at = end - token.len();
    let value: F = token
        .parse()
        .map_err(|_| PathError::MalformedNumber { at })?;

    let unit = text[end..].trim();
    if unit == "%" {
        return Ok(reference_size / F::from(100.0).unwrap() * value);
    }

    let factor = unit_factor(unit).unwrap_or_else(|| {
        log::debug!("unknown unit {:?} in {:?}, using user units", unit, text);
        1.0
    });
    Ok(value * F::from(factor).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plain_number() {
        assert_eq!(parse_coord::<f64>("12", 0.0), 12.0);
        assert_eq!(parse_coord::<f64>(" -3.5 ", 0.0), -3.5);
        assert_eq!(parse_coord::<f64>("10px", 0.0), 10.0);
    }

    #[test]
    fn test_physical_units() {
        assert_relative_eq!(parse_coord::<f64>("1cm", 0.0), 90.0 / 2.54);
        assert_relative_eq!(parse_coord::<f64>("1cm", 0.0), 35.43307086614173, epsilon = 1e-9);
        assert_relative_eq!(parse_coord::<f64>("25.4mm", 0.0), 90.0, epsilon = 1e-9);
        assert_relative_eq!(parse_coord::<f64>("2in", 0.0), 180.0);
        assert_relative_eq!(parse_coord::<f64>("8pt", 0.0), 10.0);
        assert_relative_eq!(parse_coord::<f64>("1pc", 0.0), 15.0);
    }

    #[test]
    fn test_font_relative_units_are_unscaled() {
        assert_eq!(parse_coord::<f64>("2em", 0.0), 2.0);
        assert_eq!(parse_coord::<f64>("3ex", 0.0), 3.0);
    }

    #[test]
    fn test_percent() {
        assert_eq!(parse_coord::<f64>("50%", 200.0), 100.0);
        assert_eq!(parse_coord::<f64>("100 %", 30.0), 30.0);
    }

    #[test]
    fn test_unknown_unit_falls_back_to_one() {
        assert_eq!(parse_coord::<f64>("5zz", 0.0), 5.0);
    }

    #[test]
    fn test_no_number() {
        assert_eq!(parse_coord::<f64>("auto", 100.0), 0.0);
        assert_eq!(parse_coord::<f64>("", 100.0), 0.0);
        assert_eq!(
            try_parse_coord::<f64>("auto", 100.0),
            Err(PathError::MalformedNumber { at: 0 })
        );
    }

    #[test]
    fn test_f32() {
        assert_relative_eq!(parse_coord::<f32>("1in", 0.0), 90.0);
    }
}
