//! Double-brace template rendering.
//!
//! Supported tags:
//! - `{{name}}` HTML-escaped value
//! - `{{{name}}}` and `{{& name}}` raw value
//! - `{{#name}}...{{/name}}` section: skipped when falsy, repeated for lists,
//!   rendered with the value pushed as context otherwise
//! - `{{^name}}...{{/name}}` inverted section: rendered when falsy or empty
//! - `{{! comment}}` ignored
//!
//! Names may be dotted (`user.name`) to reach into nested maps, and `.`
//! refers to the current context. Undefined names render as empty text.

use thiserror::Error;
use winnow::combinator::{alt, delimited};
use winnow::prelude::*;
use winnow::token::take_until;

use crate::escape::escape_html;
use crate::value::{NamedValues, Value};

/// Errors in template structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A section was opened but never closed.
    #[error("unclosed section '{name}'")]
    UnclosedSection { name: String },

    /// A closing tag does not match the innermost open section.
    #[error("unexpected closing tag '{found}', expected '{}'", .expected.as_deref().unwrap_or("<none>"))]
    MismatchedSection {
        expected: Option<String>,
        found: String,
    },
}

/// A parsed template, reusable across renders.
///
/// # Example
///
/// ```
/// use phrasebook_format::{NamedValues, Template, Value};
///
/// let template = Template::parse("Hi {{name}}{{#admin}} (admin){{/admin}}").unwrap();
/// let named = NamedValues::from([
///     ("name".to_string(), Value::from("<Ann>")),
///     ("admin".to_string(), Value::from(true)),
/// ]);
/// assert_eq!(template.render(&named), "Hi &lt;Ann&gt; (admin)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Variable { name: String, escape: bool },
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

/// A single `{{...}}` tag.
#[derive(Debug, Clone, PartialEq)]
enum Tag {
    Variable { name: String, escape: bool },
    Open { name: String, inverted: bool },
    Close(String),
    Comment,
}

/// An open section while building the node tree.
struct OpenSection {
    name: String,
    inverted: bool,
    nodes: Vec<Node>,
}

/// Render `template` against `named`, falling back to the unmodified
/// template text when its sections are unbalanced.
pub fn render_template(template: &str, named: &NamedValues) -> String {
    match Template::parse(template) {
        Ok(parsed) => parsed.render(named),
        Err(_) => template.to_string(),
    }
}

impl Template {
    /// Parse template text into a node tree.
    ///
    /// An opening `{{` without a matching `}}` is kept as literal text.
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut stack: Vec<OpenSection> = Vec::new();
        let mut nodes: Vec<Node> = Vec::new();
        let mut rest = input;

        while !rest.is_empty() {
            let Some(start) = rest.find("{{") else {
                push_text(current(&mut stack, &mut nodes), rest);
                break;
            };
            push_text(current(&mut stack, &mut nodes), &rest[..start]);

            let mut remaining = &rest[start..];
            let Ok(tag) = tag(&mut remaining) else {
                push_text(current(&mut stack, &mut nodes), &rest[start..]);
                break;
            };
            rest = remaining;

            match tag {
                Tag::Variable { name, escape } => {
                    current(&mut stack, &mut nodes).push(Node::Variable { name, escape });
                }
                Tag::Open { name, inverted } => stack.push(OpenSection {
                    name,
                    inverted,
                    nodes: Vec::new(),
                }),
                Tag::Close(found) => {
                    let Some(section) = stack.pop() else {
                        return Err(TemplateError::MismatchedSection {
                            expected: None,
                            found,
                        });
                    };
                    if section.name != found {
                        return Err(TemplateError::MismatchedSection {
                            expected: Some(section.name),
                            found,
                        });
                    }
                    current(&mut stack, &mut nodes).push(Node::Section {
                        name: section.name,
                        inverted: section.inverted,
                        children: section.nodes,
                    });
                }
                Tag::Comment => {}
            }
        }

        match stack.pop() {
            Some(section) => Err(TemplateError::UnclosedSection { name: section.name }),
            None => Ok(Template { nodes }),
        }
    }

    /// Render this template with `named` as the root context.
    pub fn render(&self, named: &NamedValues) -> String {
        let mut output = String::new();
        let mut frames = vec![Frame::Root(named)];
        render_nodes(&self.nodes, &mut frames, &mut output);
        output
    }
}

/// The node list currently receiving parsed nodes.
fn current<'s>(stack: &'s mut [OpenSection], root: &'s mut Vec<Node>) -> &'s mut Vec<Node> {
    match stack.last_mut() {
        Some(section) => &mut section.nodes,
        None => root,
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(previous)) = nodes.last_mut() {
        previous.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Parse one tag, triple-brace form first.
fn tag(input: &mut &str) -> ModalResult<Tag> {
    alt((
        delimited("{{{", take_until(0.., "}}}"), "}}}").map(|name: &str| Tag::Variable {
            name: name.trim().to_string(),
            escape: false,
        }),
        delimited("{{", take_until(0.., "}}"), "}}").map(classify),
    ))
    .parse_next(input)
}

/// Classify the body of a `{{...}}` tag by its sigil.
fn classify(body: &str) -> Tag {
    let body = body.trim();
    let mut chars = body.chars();
    let sigil = chars.next();
    let name = chars.as_str().trim().to_string();
    match sigil {
        Some('#') => Tag::Open {
            name,
            inverted: false,
        },
        Some('^') => Tag::Open {
            name,
            inverted: true,
        },
        Some('/') => Tag::Close(name),
        Some('&') => Tag::Variable {
            name,
            escape: false,
        },
        Some('!') => Tag::Comment,
        _ => Tag::Variable {
            name: body.to_string(),
            escape: true,
        },
    }
}

/// A context frame for name resolution.
#[derive(Clone, Copy)]
enum Frame<'a> {
    Root(&'a NamedValues),
    Value(&'a Value),
}

impl<'a> Frame<'a> {
    fn get(self, key: &str) -> Option<&'a Value> {
        match self {
            Frame::Root(named) => named.get(key),
            Frame::Value(value) => value.as_map().and_then(|map| map.get(key)),
        }
    }
}

/// Resolve a possibly dotted name against the frame stack, innermost first.
fn lookup<'a>(frames: &[Frame<'a>], name: &str) -> Option<&'a Value> {
    if name == "." {
        return match frames.last() {
            Some(Frame::Value(value)) => Some(*value),
            _ => None,
        };
    }
    let mut parts = name.split('.');
    let head = parts.next()?;
    let mut value = frames.iter().rev().find_map(|frame| frame.get(head))?;
    for part in parts {
        value = value.as_map()?.get(part)?;
    }
    Some(value)
}

fn render_nodes<'a>(nodes: &'a [Node], frames: &mut Vec<Frame<'a>>, output: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Variable { name, escape } => {
                if let Some(value) = lookup(frames, name) {
                    let text = value.to_string();
                    if *escape {
                        output.push_str(&escape_html(&text));
                    } else {
                        output.push_str(&text);
                    }
                }
            }
            Node::Section {
                name,
                inverted,
                children,
            } => {
                let value = lookup(frames, name);
                if *inverted {
                    let empty = match value {
                        None => true,
                        Some(Value::List(items)) => items.is_empty(),
                        Some(other) => !other.is_truthy(),
                    };
                    if empty {
                        render_nodes(children, frames, output);
                    }
                    continue;
                }
                match value {
                    Some(Value::List(items)) => {
                        for item in items {
                            frames.push(Frame::Value(item));
                            render_nodes(children, frames, output);
                            frames.pop();
                        }
                    }
                    Some(Value::Bool(true)) => render_nodes(children, frames, output),
                    Some(other) if other.is_truthy() => {
                        frames.push(Frame::Value(other));
                        render_nodes(children, frames, output);
                        frames.pop();
                    }
                    _ => {}
                }
            }
        }
    }
}
