//! C-style positional substitution.
//!
//! Placeholder syntax, in order: `%`, optional argument index `N$`, optional
//! `+` sign flag, optional pad (`0` or `'c` for any char), optional `-` for
//! left alignment, optional width, optional `.precision`, and a type:
//!
//! | type | output |
//! |------|--------|
//! | `s`, `v` | display form, truncated to precision |
//! | `d`, `i` | integer |
//! | `u` | integer wrapped to 32-bit unsigned |
//! | `f` | float, fixed to precision when given |
//! | `e` | float in exponent notation |
//! | `b`, `o`, `x`, `X` | unsigned binary, octal, hex |
//! | `c` | character from code point |
//! | `t` | `true` or `false` by truthiness |
//! | `j` | JSON |
//!
//! `%%` writes a literal percent sign. A placeholder without a matching
//! argument, or a `%` that does not start a placeholder, is copied through
//! unchanged.

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, preceded, terminated};
use winnow::prelude::*;
use winnow::token::{any, one_of};

use crate::value::Value;

/// A parsed `%` placeholder.
#[derive(Debug, Clone, PartialEq)]
struct Placeholder {
    index: Option<usize>,
    plus: bool,
    pad: char,
    left_align: bool,
    width: Option<usize>,
    precision: Option<usize>,
    kind: char,
}

/// Substitute `args` into the `%` placeholders of `format`.
///
/// Arguments without an explicit index are consumed left to right; an
/// explicit `N$` index (1-based) does not advance that cursor.
///
/// # Example
///
/// ```
/// use phrasebook_format::{sprintf, Value};
///
/// assert_eq!(sprintf("%s cats", &[Value::from(3)]), "3 cats");
/// assert_eq!(sprintf("%2$s %1$s", &["a".into(), "b".into()]), "b a");
/// assert_eq!(sprintf("%05.1f%%", &[Value::from(3.14159)]), "003.1%");
/// ```
pub fn sprintf(format: &str, args: &[Value]) -> String {
    let mut output = String::with_capacity(format.len());
    let mut cursor = 0;
    let mut rest = format;

    while let Some(position) = rest.find('%') {
        output.push_str(&rest[..position]);
        let after = &rest[position + 1..];

        if let Some(stripped) = after.strip_prefix('%') {
            output.push('%');
            rest = stripped;
            continue;
        }

        let mut remaining = after;
        let Ok(spec) = placeholder(&mut remaining) else {
            output.push('%');
            rest = after;
            continue;
        };

        let argument = match spec.index {
            Some(index) => args.get(index - 1),
            None => {
                cursor += 1;
                args.get(cursor - 1)
            }
        };
        match argument {
            Some(value) => output.push_str(&spec.format(value)),
            None => output.push_str(&rest[position..rest.len() - remaining.len()]),
        }
        rest = remaining;
    }

    output.push_str(rest);
    output
}

/// Parse everything after the `%` of a placeholder.
fn placeholder(input: &mut &str) -> ModalResult<Placeholder> {
    let index = opt(terminated(
        digit1
            .try_map(str::parse::<usize>)
            .verify(|index: &usize| *index > 0),
        '$',
    ))
    .parse_next(input)?;
    let plus = opt('+').parse_next(input)?.is_some();
    let pad = opt(alt(('0', preceded('\'', any))))
        .parse_next(input)?
        .unwrap_or(' ');
    let left_align = opt('-').parse_next(input)?.is_some();
    let width = opt(digit1.try_map(str::parse::<usize>)).parse_next(input)?;
    let precision = opt(preceded('.', digit1.try_map(str::parse::<usize>))).parse_next(input)?;
    let kind = one_of([
        'b', 'c', 'd', 'e', 'f', 'i', 'j', 'o', 's', 't', 'u', 'v', 'x', 'X',
    ])
    .parse_next(input)?;

    Ok(Placeholder {
        index,
        plus,
        pad,
        left_align,
        width,
        precision,
        kind,
    })
}

impl Placeholder {
    /// Render one argument according to this placeholder.
    fn format(&self, value: &Value) -> String {
        let mut body = match self.kind {
            'b' => self.unsigned(value, |n| format!("{n:b}")),
            'c' => value
                .to_integer()
                .and_then(|code| u32::try_from(code).ok())
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_default(),
            'd' | 'i' => value
                .to_integer()
                .map_or_else(|| "NaN".to_string(), |n| n.to_string()),
            'e' => value.to_float().map_or_else(
                || "NaN".to_string(),
                |n| exponent(n, self.precision),
            ),
            'f' => value.to_float().map_or_else(
                || "NaN".to_string(),
                |n| match self.precision {
                    Some(precision) => format!("{n:.precision$}"),
                    None => Value::Float(n).to_string(),
                },
            ),
            'j' => serde_json::to_string(value).unwrap_or_default(),
            'o' => self.unsigned(value, |n| format!("{n:o}")),
            't' => value.is_truthy().to_string(),
            'u' => self.unsigned(value, |n| n.to_string()),
            'x' => self.unsigned(value, |n| format!("{n:x}")),
            'X' => self.unsigned(value, |n| format!("{n:X}")),
            _ => value.to_string(),
        };

        if matches!(self.kind, 's' | 't' | 'v') {
            if let Some(precision) = self.precision {
                body = body.chars().take(precision).collect();
            }
        }

        let mut sign = "";
        if matches!(self.kind, 'd' | 'i' | 'e' | 'f') {
            if let Some(unsigned) = body.strip_prefix('-') {
                body = unsigned.to_string();
                sign = "-";
            } else if self.plus {
                sign = "+";
            }
        }

        self.pad(sign, &body)
    }

    /// Format the 32-bit unsigned wrap of an integer argument.
    fn unsigned(&self, value: &Value, render: impl Fn(u32) -> String) -> String {
        value
            .to_integer()
            .map_or_else(|| "NaN".to_string(), |n| render(n as u32))
    }

    /// Apply width, pad character and alignment.
    fn pad(&self, sign: &str, body: &str) -> String {
        let length = sign.chars().count() + body.chars().count();
        let fill = self.width.map_or(0, |width| width.saturating_sub(length));
        let padding: String = (0..fill).map(|_| self.pad).collect();

        if self.left_align {
            format!("{sign}{body}{padding}")
        } else if self.pad == '0' {
            format!("{sign}{padding}{body}")
        } else {
            format!("{padding}{sign}{body}")
        }
    }
}

/// Exponent notation with an explicit exponent sign, as in `1.5e+2`.
fn exponent(n: f64, precision: Option<usize>) -> String {
    let rendered = match precision {
        Some(precision) => format!("{n:.precision$e}"),
        None => format!("{n:e}"),
    };
    match rendered.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_parses_all_parts() {
        let spec = placeholder(&mut "2$+'*-8.3f").ok();
        assert_eq!(
            spec,
            Some(Placeholder {
                index: Some(2),
                plus: true,
                pad: '*',
                left_align: true,
                width: Some(8),
                precision: Some(3),
                kind: 'f',
            })
        );
    }

    #[test]
    fn width_is_not_mistaken_for_index() {
        let spec = placeholder(&mut "5d").ok();
        assert_eq!(spec.map(|s| (s.index, s.width)), Some((None, Some(5))));
    }

    #[test]
    fn exponent_uses_explicit_sign() {
        assert_eq!(exponent(150.0, Some(1)), "1.5e+2");
        assert_eq!(exponent(0.015, None), "1.5e-2");
    }
}
