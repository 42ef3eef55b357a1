//! `transform` attribute parsing.

use crate::error::PathError;
use crate::path::read_float;
use crate::primitives::{Affine2, Point2};
use num_traits::Float;
use std::str::FromStr;

/// Parses a transform list such as `"translate(10 20) rotate(45)"`.
///
/// Functions compose left to right: the rightmost one is applied to points
/// first. Angles are in degrees. An empty list is the identity.
///
/// # Errors
///
/// [`PathError::MalformedNumber`] at the offset of the first unreadable
/// function name, argument or argument count.
///
/// # Example
///
/// ```
/// use svgspline::{parse_transform, Point2};
///
/// let t = parse_transform::<f64>("translate(10, 0) scale(2)").unwrap();
/// assert_eq!(t.apply_point(Point2::new(1.0, 1.0)), Point2::new(12.0, 2.0));
/// ```
pub fn parse_transform<F: Float + FromStr>(text: &str) -> Result<Affine2<F>, PathError> {
    let bytes = text.as_bytes();
    let mut result = Affine2::identity();
    let mut pos = skip_list_separators(bytes, 0);

    while pos < bytes.len() {
        let name_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        let name = &text[name_start..pos];
        pos = skip_whitespace(bytes, pos);
        if name.is_empty() || bytes.get(pos) != Some(&b'(') {
            return Err(PathError::MalformedNumber { at: pos });
        }
        pos += 1;

        let mut args: Vec<F> = Vec::with_capacity(6);
        loop {
            pos = skip_list_separators(bytes, pos);
            match bytes.get(pos) {
                Some(b')') => {
                    pos += 1;
                    break;
                }
                Some(_) => {
                    let (token, end) = read_float(text, pos)?;
                    let value = token
                        .parse()
                        .map_err(|_| PathError::MalformedNumber { at: pos })?;
                    args.push(value);
                    pos = end;
                }
                None => return Err(PathError::MalformedNumber { at: pos }),
            }
        }

        let function = transform_function(name, &args)
            .ok_or(PathError::MalformedNumber { at: name_start })?;
        result = result.compose(&function);
        pos = skip_list_separators(bytes, pos);
    }

    Ok(result)
}

fn transform_function<F: Float>(name: &str, args: &[F]) -> Option<Affine2<F>> {
    let zero = F::zero();
    let t = match (name, args) {
        ("matrix", &[a, b, c, d, e, f]) => Affine2::from_svg_matrix(a, b, c, d, e, f),
        ("translate", &[tx]) => Affine2::translate(tx, zero),
        ("translate", &[tx, ty]) => Affine2::translate(tx, ty),
        ("scale", &[s]) => Affine2::scale_xy(s, s),
        ("scale", &[sx, sy]) => Affine2::scale_xy(sx, sy),
        ("rotate", &[angle]) => Affine2::rotation(angle.to_radians()),
        ("rotate", &[angle, cx, cy]) => {
            Affine2::rotation_around(angle.to_radians(), Point2::new(cx, cy))
        }
        ("skewX", &[angle]) => Affine2::skew_x(angle.to_radians()),
        ("skewY", &[angle]) => Affine2::skew_y(angle.to_radians()),
        _ => return None,
    };
    Some(t)
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn skip_list_separators(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos] == b',' || bytes[pos].is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}
