//! Path command interpreter.
//!
//! Walks the token stream of one `d` attribute and drives a
//! [`SplineAssembler`]. All state lives in [`ParserState`], created per path
//! and dropped once the splines are returned.

use super::arc::convert_arc;
use super::tokenizer::{tokenize_spanned, Spanned, Token};
use crate::error::PathError;
use crate::options::{PathOptions, QuadraticMode};
use crate::primitives::Point2;
use crate::spline::{Spline, SplineAssembler, SplinePoint};
use num_traits::Float;
use std::str::FromStr;

/// Parses path data into splines.
///
/// # Errors
///
/// Any [`PathError`] aborts the whole path; no partial result is returned.
///
/// # Example
///
/// ```
/// use svgspline::path::parse_path;
/// use svgspline::PathOptions;
///
/// let splines = parse_path::<f64>("M 0,0 L 10,0 L 10,10 Z", &PathOptions::new()).unwrap();
/// assert_eq!(splines.len(), 1);
/// assert_eq!(splines[0].len(), 3);
/// assert!(splines[0].closed);
/// ```
pub fn parse_path<F: Float + FromStr>(
    data: &str,
    options: &PathOptions<F>,
) -> Result<Vec<Spline<F>>, PathError> {
    let tokens = tokenize_spanned(data)?;
    let mut interpreter = Interpreter {
        tokens,
        cursor: 0,
        input_len: data.len(),
        state: ParserState::new(*options),
    };
    interpreter.run()?;
    Ok(interpreter.state.assembler.finish(options.use_fill))
}

/// Mutable state of one path parse.
#[derive(Debug)]
struct ParserState<F> {
    current_point: Option<Point2<F>>,
    /// Second control point of the previous `C`/`S`, for `S` reflection.
    last_cubic_handle: Option<Point2<F>>,
    /// Control point of the previous `Q`/`T`, for `T` reflection.
    last_quad_handle: Option<Point2<F>>,
    assembler: SplineAssembler<F>,
    options: PathOptions<F>,
}

impl<F: Float> ParserState<F> {
    fn new(options: PathOptions<F>) -> Self {
        Self {
            current_point: None,
            last_cubic_handle: None,
            last_quad_handle: None,
            assembler: SplineAssembler::new(options.coincidence_tolerance),
            options,
        }
    }

    fn current(&self) -> Point2<F> {
        self.current_point.unwrap_or_else(Point2::origin)
    }

    fn reset_handles(&mut self) {
        self.last_cubic_handle = None;
        self.last_quad_handle = None;
    }
}

struct Interpreter<'a, F> {
    tokens: Vec<Spanned<'a>>,
    cursor: usize,
    input_len: usize,
    state: ParserState<F>,
}

impl<'a, F: Float + FromStr> Interpreter<'a, F> {
    fn run(&mut self) -> Result<(), PathError> {
        while let Some(spanned) = self.tokens.get(self.cursor).copied() {
            self.cursor += 1;
            match spanned.token {
                Token::Command(letter) => self.command(letter)?,
                Token::Number(_) => return Err(PathError::MissingCommand { at: spanned.at }),
            }
        }
        Ok(())
    }

    fn command(&mut self, letter: char) -> Result<(), PathError> {
        let relative = letter.is_ascii_lowercase();
        match letter.to_ascii_uppercase() {
            'M' => {
                let to = self.read_point(letter, relative)?;
                self.move_to(to);
                // Further pairs are implicit line-tos.
                while self.has_number() {
                    let to = self.read_point(letter, relative)?;
                    self.line_to(to);
                }
            }
            'L' => loop {
                let to = self.read_point(letter, relative)?;
                self.line_to(to);
                if !self.has_number() {
                    break;
                }
            },
            'H' => loop {
                let x = self.read_number(letter)?;
                let current = self.state.current();
                let x = if relative { current.x + x } else { x };
                self.line_to(Point2::new(x, current.y));
                if !self.has_number() {
                    break;
                }
            },
            'V' => loop {
                let y = self.read_number(letter)?;
                let current = self.state.current();
                let y = if relative { current.y + y } else { y };
                self.line_to(Point2::new(current.x, y));
                if !self.has_number() {
                    break;
                }
            },
            'C' => loop {
                let control1 = self.read_point(letter, relative)?;
                let control2 = self.read_point(letter, relative)?;
                let to = self.read_point(letter, relative)?;
                self.cubic_to(control1, control2, to);
                if !self.has_number() {
                    break;
                }
            },
            'S' => loop {
                let control2 = self.read_point(letter, relative)?;
                let to = self.read_point(letter, relative)?;
                let current = self.state.current();
                let control1 = self
                    .state
                    .last_cubic_handle
                    .map_or(current, |h| h.reflect_through(current));
                self.cubic_to(control1, control2, to);
                if !self.has_number() {
                    break;
                }
            },
            'Q' => loop {
                let control = self.read_point(letter, relative)?;
                let to = self.read_point(letter, relative)?;
                self.quad_to(control, to);
                if !self.has_number() {
                    break;
                }
            },
            'T' => loop {
                let to = self.read_point(letter, relative)?;
                let current = self.state.current();
                let control = self
                    .state
                    .last_quad_handle
                    .map_or(current, |h| h.reflect_through(current));
                self.quad_to(control, to);
                if !self.has_number() {
                    break;
                }
            },
            'A' => loop {
                let rx = self.read_number(letter)?;
                let ry = self.read_number(letter)?;
                let rotation = self.read_number(letter)?;
                let large_arc = self.read_number(letter)? != F::zero();
                let sweep = self.read_number(letter)? != F::zero();
                let to = self.read_point(letter, relative)?;
                self.arc_to(rx, ry, rotation, large_arc, sweep, to);
                if !self.has_number() {
                    break;
                }
            },
            'Z' => self.close_path(),
            _ => return Err(PathError::UnknownPathCommand { letter }),
        }
        Ok(())
    }

    fn has_number(&self) -> bool {
        matches!(
            self.tokens.get(self.cursor),
            Some(Spanned {
                token: Token::Number(_),
                ..
            })
        )
    }

    fn read_number(&mut self, command: char) -> Result<F, PathError> {
        match self.tokens.get(self.cursor).copied() {
            Some(Spanned {
                token: Token::Number(text),
                at,
            }) => {
                self.cursor += 1;
                text.parse::<F>()
                    .map_err(|_| PathError::MalformedNumber { at })
            }
            Some(spanned) => Err(PathError::MissingArguments {
                command,
                at: spanned.at,
            }),
            None => Err(PathError::MissingArguments {
                command,
                at: self.input_len,
            }),
        }
    }

    /// Reads a coordinate pair; relative pairs are offsets from the current
    /// point as it was when the segment started.
    fn read_point(&mut self, command: char, relative: bool) -> Result<Point2<F>, PathError> {
        let x = self.read_number(command)?;
        let y = self.read_number(command)?;
        if relative {
            let base = self.state.current();
            Ok(Point2::new(base.x + x, base.y + y))
        } else {
            Ok(Point2::new(x, y))
        }
    }

    /// Returns true when a return to the start closes the spline by itself:
    /// the stream is exhausted or the next command is a move.
    fn closes_on_return(&self) -> bool {
        matches!(
            self.tokens.get(self.cursor).map(|s| s.token),
            None | Some(Token::Command('M')) | Some(Token::Command('m'))
        )
    }

    /// Starts a spline at the current point if none is active, e.g. when
    /// drawing continues after `Z` without a new `M`.
    fn ensure_started(&mut self) {
        if !self.state.assembler.has_active() {
            let start = self.state.current();
            if self.state.current_point.is_none() {
                log::debug!("path data does not start with a move; starting at the origin");
            }
            self.state.assembler.start_new(SplinePoint::corner(start));
        }
    }

    fn push_anchor(&mut self, point: SplinePoint<F>, segment_end: bool) {
        self.ensure_started();
        let closes = segment_end && self.closes_on_return();
        self.state.assembler.append_or_fold(point, closes);
    }

    fn set_previous_right(&mut self, handle: Point2<F>) {
        self.ensure_started();
        if let Some(previous) = self.state.assembler.last_point_mut() {
            previous.set_right_free(handle);
        }
    }

    fn move_to(&mut self, to: Point2<F>) {
        self.state.assembler.start_new(SplinePoint::corner(to));
        self.state.current_point = Some(to);
        self.state.reset_handles();
    }

    fn line_to(&mut self, to: Point2<F>) {
        self.push_anchor(SplinePoint::corner(to), true);
        self.state.current_point = Some(to);
        self.state.reset_handles();
    }

    fn cubic_to(&mut self, control1: Point2<F>, control2: Point2<F>, to: Point2<F>) {
        self.set_previous_right(control1);
        let point = SplinePoint::corner(to).with_left(control2).with_right(to);
        self.push_anchor(point, true);
        self.state.current_point = Some(to);
        self.state.last_cubic_handle = Some(control2);
        self.state.last_quad_handle = None;
    }

    fn quad_to(&mut self, control: Point2<F>, to: Point2<F>) {
        let from = self.state.current();
        self.state.last_quad_handle = Some(control);
        self.state.last_cubic_handle = None;

        // A zero-length quadratic has no defined tangent.
        if to.coincides(from, self.state.options.coincidence_tolerance) {
            return;
        }

        let (handle1, handle2) = match self.state.options.quadratic {
            QuadraticMode::Verbatim => (control, control),
            QuadraticMode::DegreeElevated => {
                let two_thirds = F::from(2.0 / 3.0).unwrap();
                (
                    from + (control - from) * two_thirds,
                    to + (control - to) * two_thirds,
                )
            }
        };

        self.set_previous_right(handle1);
        let point = SplinePoint::corner(to).with_left(handle2).with_right(to);
        self.push_anchor(point, true);
        self.state.current_point = Some(to);
    }

    fn arc_to(&mut self, rx: F, ry: F, rotation: F, large_arc: bool, sweep: bool, to: Point2<F>) {
        let from = self.state.current();
        self.state.reset_handles();

        let arc = convert_arc(rx, ry, rotation, large_arc, sweep, from, to);
        let tolerance = self.state.options.coincidence_tolerance;
        let degenerate = arc.start_handle.is_none()
            && arc.points.len() == 1
            && arc.points[0].anchor.coincides(from, tolerance);
        if degenerate && self.state.assembler.has_active() {
            self.state.current_point = Some(to);
            return;
        }

        if let Some(handle) = arc.start_handle {
            self.set_previous_right(handle);
        }
        let count = arc.points.len();
        for (i, point) in arc.points.into_iter().enumerate() {
            self.push_anchor(point, i + 1 == count);
        }
        self.state.current_point = Some(to);
    }

    fn close_path(&mut self) {
        if let Some(start) = self.state.assembler.close() {
            self.state.current_point = Some(start);
        }
        self.state.reset_handles();
    }
}
