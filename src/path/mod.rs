//! SVG path data: tokenizing, number scanning, arc conversion and the
//! command interpreter that turns a `d` attribute into splines.

mod arc;
mod interpreter;
mod number;
mod tokenizer;

pub use arc::{convert_arc, ArcApproximation, CenterArc, EllipticalArc};
pub use interpreter::parse_path;
pub use number::{read_flag, read_float, read_float_list};
pub use tokenizer::{tokenize, Token, COMMAND_LETTERS};
