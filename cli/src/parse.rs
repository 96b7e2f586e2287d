//! A small text format for paths.
//!
//! Whitespace or comma separated tokens, absolute coordinates only:
//!
//! | token              | verb                                   |
//! |--------------------|----------------------------------------|
//! | `M x y`            | begin a sub-path                       |
//! | `L x y`            | line                                   |
//! | `Q cx cy x y`      | quadratic bézier curve                 |
//! | `K cx cy x y w`    | conic with weight `w`                  |
//! | `Z`                | close the sub-path                     |
//!
//! Sub-paths that are not closed are ended when the next `M` or the end of the input
//! is reached.

use conifer::math::{point, Point};
use conifer::path::{DegenerateInput, PathSlice, Verb};

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    UnknownVerb { token: String, position: usize },
    MissingArgument { verb: char, position: usize },
    InvalidNumber { token: String, position: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::UnknownVerb { token, position } => {
                write!(f, "unknown verb {:?} (token #{})", token, position)
            }
            ParseError::MissingArgument { verb, position } => {
                write!(f, "missing argument for verb {} (token #{})", verb, position)
            }
            ParseError::InvalidNumber { token, position } => {
                write!(f, "invalid number {:?} (token #{})", token, position)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// The buffers of a parsed path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedPath {
    pub verbs: Vec<Verb>,
    pub points: Vec<Point>,
    pub weights: Vec<f32>,
}

impl ParsedPath {
    /// Validates the buffers.
    pub fn as_slice(&self) -> Result<PathSlice, DegenerateInput> {
        PathSlice::new(&self.verbs, &self.points, &self.weights)
    }
}

struct Tokens<Iter> {
    iter: Iter,
}

impl<'l, Iter: Iterator<Item = (usize, &'l str)>> Tokens<Iter> {
    fn number(&mut self, verb: char, position: usize) -> Result<f32, ParseError> {
        let (idx, token) = self
            .iter
            .next()
            .ok_or(ParseError::MissingArgument { verb, position })?;

        token.parse().map_err(|_| ParseError::InvalidNumber {
            token: token.to_string(),
            position: idx,
        })
    }

    fn point(&mut self, verb: char, position: usize) -> Result<Point, ParseError> {
        let x = self.number(verb, position)?;
        let y = self.number(verb, position)?;

        Ok(point(x, y))
    }
}

pub fn parse_path(src: &str) -> Result<ParsedPath, ParseError> {
    let mut path = ParsedPath::default();
    let mut tokens = Tokens {
        iter: src
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .enumerate(),
    };
    let mut in_sub_path = false;

    while let Some((position, token)) = tokens.iter.next() {
        match token {
            "M" => {
                if in_sub_path {
                    path.verbs.push(Verb::End);
                }
                let at = tokens.point('M', position)?;
                path.verbs.push(Verb::Begin);
                path.points.push(at);
                in_sub_path = true;
            }
            "L" => {
                let to = tokens.point('L', position)?;
                path.verbs.push(Verb::LineTo);
                path.points.push(to);
            }
            "Q" => {
                let ctrl = tokens.point('Q', position)?;
                let to = tokens.point('Q', position)?;
                path.verbs.push(Verb::QuadraticTo);
                path.points.push(ctrl);
                path.points.push(to);
            }
            "K" => {
                let ctrl = tokens.point('K', position)?;
                let to = tokens.point('K', position)?;
                let weight = tokens.number('K', position)?;
                path.verbs.push(Verb::ConicTo);
                path.points.push(ctrl);
                path.points.push(to);
                path.weights.push(weight);
            }
            "Z" => {
                path.verbs.push(Verb::Close);
                in_sub_path = false;
            }
            _ => {
                return Err(ParseError::UnknownVerb {
                    token: token.to_string(),
                    position,
                });
            }
        }
    }

    if in_sub_path {
        path.verbs.push(Verb::End);
    }

    Ok(path)
}

#[test]
fn parse_conic_path() {
    let path = parse_path("M 0 100 K 0,200 100,200 0.7071 L 100 100 Z").unwrap();

    assert_eq!(
        path.verbs,
        vec![Verb::Begin, Verb::ConicTo, Verb::LineTo, Verb::Close]
    );
    assert_eq!(
        path.points,
        vec![
            point(0.0, 100.0),
            point(0.0, 200.0),
            point(100.0, 200.0),
            point(100.0, 100.0),
        ]
    );
    assert_eq!(path.weights, vec![0.7071]);
    assert!(path.as_slice().is_ok());
}

#[test]
fn parse_open_sub_paths() {
    let path = parse_path("M 0 0 L 1 0 M 5 5 Q 6 6 7 5").unwrap();

    assert_eq!(
        path.verbs,
        vec![
            Verb::Begin,
            Verb::LineTo,
            Verb::End,
            Verb::Begin,
            Verb::QuadraticTo,
            Verb::End,
        ]
    );
    assert!(path.as_slice().is_ok());
}

#[test]
fn parse_errors() {
    assert_eq!(
        parse_path("M 0 0 X 1 1"),
        Err(ParseError::UnknownVerb {
            token: "X".to_string(),
            position: 3
        })
    );
    assert_eq!(
        parse_path("M 0 0 K 1 1 2 0"),
        Err(ParseError::MissingArgument {
            verb: 'K',
            position: 3
        })
    );
    assert_eq!(
        parse_path("M 0 zero"),
        Err(ParseError::InvalidNumber {
            token: "zero".to_string(),
            position: 2
        })
    );

    // Well formed tokens but not a valid path.
    let path = parse_path("L 1 1").unwrap();
    assert_eq!(
        path.as_slice().err(),
        Some(DegenerateInput::MissingBegin { verb: 0 })
    );
}
