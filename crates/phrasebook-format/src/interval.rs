//! Mathematical interval expression parser using winnow.
//!
//! Accepted forms:
//! - `[0,2]` both bounds included
//! - `]0,3[` and `(0,3)` both bounds excluded
//! - `[1]` a single value
//! - `[20,]` and `[,20]` unbounded on one side
//!
//! Bounds may be signed, fractional, use an exponent, or be written as
//! `Infinity`. An empty bound parses to the matching infinity.

use thiserror::Error;
use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, opt, separated_pair};
use winnow::prelude::*;
use winnow::token::one_of;

/// One end of an interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// Bound value, `f64::NEG_INFINITY` or `f64::INFINITY` when unbounded.
    pub value: f64,
    /// Whether a count equal to `value` lies inside the interval.
    pub included: bool,
}

/// A parsed interval expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub from: Bound,
    pub to: Bound,
}

/// An interval expression that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// The expression does not follow interval syntax.
    #[error("malformed interval '{input}' at column {column}")]
    Syntax { input: String, column: usize },
}

/// Parse a complete interval expression such as `[1,3[`.
pub fn parse_interval(input: &str) -> Result<Interval, IntervalError> {
    let mut remaining = input;
    match interval(&mut remaining) {
        Ok(parsed) if remaining.is_empty() => Ok(parsed),
        _ => Err(IntervalError::Syntax {
            input: input.to_string(),
            column: input.len() - remaining.len() + 1,
        }),
    }
}

/// Split a phrase segment into a leading interval expression and its text.
///
/// Leading whitespace before the interval and whitespace between the
/// interval and the text are dropped. Returns `None` when the segment does
/// not start with a well-formed interval.
///
/// ```
/// use phrasebook_format::split_leading_interval;
///
/// assert_eq!(split_leading_interval(" [2,] many"), Some(("[2,]", "many")));
/// assert_eq!(split_leading_interval("plain text"), None);
/// ```
pub fn split_leading_interval(segment: &str) -> Option<(&str, &str)> {
    let mut remaining = segment.trim_start();
    let expression = interval.take().parse_next(&mut remaining).ok()?;
    Some((expression, remaining.trim_start()))
}

/// Parse `open bounds close`.
fn interval(input: &mut &str) -> ModalResult<Interval> {
    let open = one_of(['[', ']', '(']).parse_next(input)?;
    let (from, to) = alt((
        separated_pair(opt(bound_value), ',', opt(bound_value)).map(|(from, to)| {
            (
                from.unwrap_or(f64::NEG_INFINITY),
                to.unwrap_or(f64::INFINITY),
            )
        }),
        bound_value.map(|value| (value, value)),
    ))
    .parse_next(input)?;
    let close = one_of([']', '[', ')']).parse_next(input)?;

    Ok(Interval {
        from: Bound {
            value: from,
            included: open == '[',
        },
        to: Bound {
            value: to,
            included: close == ']',
        },
    })
}

/// Parse a signed bound value or `Infinity`.
fn bound_value(input: &mut &str) -> ModalResult<f64> {
    (
        opt(one_of(['+', '-'])),
        alt(("Infinity".value(f64::INFINITY), decimal)),
    )
        .map(|(sign, value)| if sign == Some('-') { -value } else { value })
        .parse_next(input)
}

/// Parse an unsigned decimal with optional fraction and exponent.
fn decimal(input: &mut &str) -> ModalResult<f64> {
    (
        digit0,
        opt(('.', digit1)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .verify(|text: &str| text.starts_with(|c: char| c.is_ascii_digit() || c == '.'))
        .try_map(str::parse::<f64>)
        .parse_next(input)
}
