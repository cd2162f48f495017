//! Low-level string primitives used by the phrasebook render pipeline.
//!
//! This crate keeps the formatting collaborators separate from catalog
//! resolution so that both the runtime and the CLI share one implementation:
//! - [`parse_interval`] reads mathematical interval expressions such as `[1,3[`
//! - [`sprintf`] performs C-style `%s`/`%d` positional substitution
//! - [`Template`] renders `{{name}}` double-brace templates against named values

mod escape;
mod interval;
mod sprintf;
mod template;
mod value;

pub use escape::escape_html;
pub use interval::{Bound, Interval, IntervalError, parse_interval, split_leading_interval};
pub use sprintf::sprintf;
pub use template::{Template, TemplateError, render_template};
pub use value::{NamedValues, Value};
