//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every route pattern
//! - Check prefixes, names and the base URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::error::CompileError;
use crate::routing::matcher::CompiledMatcher;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base_url `{url}` is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{field} `{prefix}` must start with `/`")]
    RelativePrefix { field: &'static str, prefix: String },

    #[error("route `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: CompileError,
    },

    #[error("route name `{0}` is used more than once")]
    DuplicateRouteName(String),

    #[error("unknown log level `{0}`")]
    UnknownLogLevel(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = url::Url::parse(&config.base_url) {
        errors.push(ValidationError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        });
    }

    if let Some(scope) = &config.scope {
        if !scope.starts_with('/') {
            errors.push(ValidationError::RelativePrefix {
                field: "scope",
                prefix: scope.clone(),
            });
        }
    }

    for prefix in config.ignored.iter().filter(|p| !p.starts_with('/')) {
        errors.push(ValidationError::RelativePrefix {
            field: "ignored",
            prefix: prefix.clone(),
        });
    }

    let mut names = HashSet::new();
    for route in &config.routes {
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }
        if let Err(source) = CompiledMatcher::compile(&route.pattern) {
            errors.push(ValidationError::InvalidPattern {
                name: route.name.clone(),
                source,
            });
        }
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(name: &str, pattern: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            pattern: pattern.into(),
            continue_chain: true,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.base_url = "not a url".into();
        config.scope = Some("app".into());
        config.ignored = vec!["/ok".into(), "static".into()];
        config.routes = vec![route("a", "/a"), route("a", "/files/*/x")];
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicateRouteName(n) if n == "a")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidPattern { .. })));
    }
}
