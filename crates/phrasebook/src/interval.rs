//! Count-driven selection between `|`-separated phrase variants.

use phrasebook_format::{Interval, IntervalError, parse_interval, split_leading_interval};

/// Whether `count` lies inside the interval expression `expression`.
///
/// A count equal to a bound is inside exactly when that bound is inclusive;
/// otherwise it must lie strictly between the bounds. A malformed expression
/// or an absent count never matches.
///
/// ```
/// use phrasebook::interval::matches;
///
/// assert!(matches(Some(2), "[1,3]"));
/// assert!(!matches(Some(3), "]1,3["));
/// assert!(matches(Some(20), "[20,]"));
/// assert!(!matches(None, "[0,]"));
/// ```
pub fn matches(count: Option<i64>, expression: &str) -> bool {
    let Some(count) = count else {
        return false;
    };
    parse_interval(expression).is_ok_and(|interval| contains(&interval, count as f64))
}

fn contains(interval: &Interval, count: f64) -> bool {
    if count == interval.from.value {
        return interval.from.included;
    }
    if count == interval.to.value {
        return interval.to.included;
    }
    interval.from.value < count && count < interval.to.value
}

/// Pick the text of the variant of `phrase` that matches `count`.
///
/// Segments are tried left to right and the first whose leading interval
/// matches wins. A segment without an interval is a catch-all: it becomes
/// the answer unless a later interval matches. With no match and no
/// catch-all, the last segment's text is returned.
///
/// ```
/// use phrasebook::interval::select_segment;
///
/// let phrase = "[0] no cats|[1] one cat|[2,] %s cats";
/// assert_eq!(select_segment(phrase, Some(0)), "no cats");
/// assert_eq!(select_segment(phrase, Some(7)), "%s cats");
/// assert_eq!(select_segment("[0] none|some", Some(4)), "some");
/// ```
pub fn select_segment(phrase: &str, count: Option<i64>) -> String {
    let mut answer: Option<&str> = None;
    let mut last = phrase;
    for segment in phrase.split('|') {
        match split_leading_interval(segment) {
            Some((expression, text)) => {
                if matches(count, expression) {
                    return text.to_string();
                }
                last = text;
            }
            None => {
                answer = Some(segment);
                last = segment;
            }
        }
    }
    answer.unwrap_or(last).to_string()
}

/// Check a phrase segment that opens with a square bracket.
///
/// Such a segment is meant to start with an interval; if it does not, the
/// error for its first word is returned. Other segments always pass.
///
/// ```
/// use phrasebook::interval::validate_segment;
///
/// assert!(validate_segment("[1,3] a few").is_ok());
/// assert!(validate_segment("plain").is_ok());
/// assert!(validate_segment("[1,3 a few").is_err());
/// ```
pub fn validate_segment(segment: &str) -> Result<(), IntervalError> {
    let trimmed = segment.trim_start();
    if !trimmed.starts_with(['[', ']']) || split_leading_interval(trimmed).is_some() {
        return Ok(());
    }
    let token = trimmed.split_whitespace().next().unwrap_or(trimmed);
    parse_interval(token).map(|_| ())
}
