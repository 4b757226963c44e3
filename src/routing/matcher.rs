//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Tokenize a pattern into literal, parameter and wildcard segments
//! - Match a pathname segment by segment, capturing parameter values
//! - Prefix test for link scoping and the ignore list
//!
//! # Design Decisions
//! - No regex: literals compare verbatim, so `.` or `+` need no escaping
//! - Trailing slashes are literal; `/about` and `/about/` are different paths
//! - Parameters match one or more characters excluding `/`
//! - The wildcard matches the remainder, separators included
//! - Compilation fails eagerly; matching a compiled pattern never fails

use std::collections::HashMap;
use std::fmt;

use crate::error::CompileError;

/// Maximum accepted pattern length in bytes.
pub const MAX_PATTERN_LENGTH: usize = 1024;

/// Name given to a wildcard written as a bare `*`.
pub const WILDCARD_PARAM: &str = "wildcard";

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Wildcard(String),
}

/// A compiled path pattern.
///
/// Parameter names are recorded in the order they appear in the pattern and
/// line up one-to-one with the values returned by [`CompiledMatcher::captures`].
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    pattern: String,
    segments: Vec<Segment>,
    param_names: Vec<String>,
}

impl CompiledMatcher {
    /// Compile `pattern` into a matcher.
    pub fn compile(pattern: &str) -> Result<Self, CompileError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(CompileError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        // The empty pattern is the root.
        let source = if pattern.is_empty() { "/" } else { pattern };
        let raw: Vec<&str> = source.split('/').collect();
        let last = raw.len() - 1;

        let mut segments = Vec::with_capacity(raw.len());
        let mut param_names: Vec<String> = Vec::new();

        for (index, piece) in raw.iter().enumerate() {
            let segment = if let Some(name) = piece.strip_prefix(':') {
                validate_name(pattern, index, name)?;
                Segment::Param(name.to_string())
            } else if let Some(name) = piece.strip_prefix('*') {
                if index != last {
                    return Err(CompileError::WildcardNotTrailing {
                        pattern: pattern.to_string(),
                    });
                }
                let name = if name.is_empty() {
                    WILDCARD_PARAM
                } else {
                    validate_name(pattern, index, name)?;
                    name
                };
                Segment::Wildcard(name.to_string())
            } else {
                if let Some(marker) = piece.chars().find(|c| *c == ':' || *c == '*') {
                    return Err(CompileError::StrayMarker {
                        pattern: pattern.to_string(),
                        segment: piece.to_string(),
                        marker,
                    });
                }
                Segment::Literal(piece.to_string())
            };

            if let Segment::Param(name) | Segment::Wildcard(name) = &segment {
                if param_names.contains(name) {
                    return Err(CompileError::DuplicateParameter {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    });
                }
                param_names.push(name.clone());
            }
            segments.push(segment);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
            param_names,
        })
    }

    /// The pattern string this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Match `path`, returning the raw captured values in parameter order.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let mut rest = Some(if path.is_empty() { "/" } else { path });
        let mut values = Vec::with_capacity(self.param_names.len());

        for segment in &self.segments {
            if let Segment::Wildcard(_) = segment {
                // Wildcard is always last; it takes whatever is left.
                values.push(rest?);
                return Some(values);
            }

            let current = rest?;
            let (head, tail) = match current.split_once('/') {
                Some((head, tail)) => (head, Some(tail)),
                None => (current, None),
            };

            match segment {
                Segment::Literal(text) if text == head => {}
                Segment::Param(_) if !head.is_empty() => values.push(head),
                _ => return None,
            }
            rest = tail;
        }

        // Unconsumed input means the path is longer than the pattern.
        match rest {
            None => Some(values),
            Some(_) => None,
        }
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }

    /// Match `path` and return decoded values keyed by parameter name.
    pub fn params(&self, path: &str) -> Option<HashMap<String, String>> {
        let values = self.captures(path)?;
        Some(
            self.param_names
                .iter()
                .cloned()
                .zip(values.into_iter().map(decode))
                .collect(),
        )
    }

    /// Build a path from this pattern, or `None` when a parameter is missing.
    pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
        let mut pieces = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => pieces.push(text.as_str()),
                Segment::Param(name) | Segment::Wildcard(name) => {
                    pieces.push(params.get(name)?.as_str())
                }
            }
        }
        Some(pieces.join("/"))
    }
}

impl fmt::Display for CompiledMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

fn validate_name(pattern: &str, index: usize, name: &str) -> Result<(), CompileError> {
    if name.is_empty() {
        return Err(CompileError::EmptyParameterName {
            pattern: pattern.to_string(),
            segment: index,
        });
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CompileError::InvalidParameterName {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Percent-decode a captured value, keeping it raw if it is not valid UTF-8.
fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Prefix test used to scope link interception and the ignore list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefix {
    prefix: String,
}

impl PathPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `pathname` falls under this prefix.
    pub fn routable(&self, pathname: &str) -> bool {
        pathname.starts_with(&self.prefix)
    }
}
