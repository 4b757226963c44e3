//! Error taxonomy for the router.
//!
//! - `CompileError`: malformed pattern, raised synchronously by `register`
//! - `HandlerError`: raised by a handler, aborts the rest of that dispatch
//! - `RouterError`: either of the above, for callers that mix both
//!
//! A path that matches nothing is not an error.

use thiserror::Error;

/// Errors produced while compiling a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Pattern exceeds the accepted length.
    #[error("pattern is {length} bytes, longer than the maximum of {max}")]
    TooLong { length: usize, max: usize },

    /// A `:` marker with nothing after it.
    #[error("empty parameter name in segment {segment} of `{pattern}`")]
    EmptyParameterName { pattern: String, segment: usize },

    /// Parameter names are limited to ASCII alphanumerics and `_`.
    #[error("invalid parameter name `{name}` in `{pattern}`")]
    InvalidParameterName { pattern: String, name: String },

    /// The same name captured twice.
    #[error("parameter `{name}` appears more than once in `{pattern}`")]
    DuplicateParameter { pattern: String, name: String },

    /// A wildcard followed by further segments.
    #[error("wildcard must be the final segment of `{pattern}`")]
    WildcardNotTrailing { pattern: String },

    /// A `:` or `*` inside a literal segment.
    #[error("stray `{marker}` marker in segment `{segment}` of `{pattern}`")]
    StrayMarker {
        pattern: String,
        segment: String,
        marker: char,
    },
}

/// Failure raised from inside a route handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("handler failed: {message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Either side of the router's error taxonomy.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_display() {
        let err = CompileError::WildcardNotTrailing {
            pattern: "/a/*/b".into(),
        };
        assert_eq!(err.to_string(), "wildcard must be the final segment of `/a/*/b`");
    }

    #[test]
    fn test_router_error_wraps_handler_error() {
        let err: RouterError = HandlerError::new("boom").into();
        assert_eq!(err.to_string(), "handler failed: boom");
        assert!(matches!(err, RouterError::Handler(_)));
    }

    #[test]
    fn test_router_error_wraps_compile_error() {
        fn register(pattern: &str) -> Result<(), RouterError> {
            crate::CompiledMatcher::compile(pattern)?;
            Ok(())
        }
        let err = register("/:").unwrap_err();
        assert!(matches!(
            err,
            RouterError::Compile(CompileError::EmptyParameterName { .. })
        ));
    }
}
