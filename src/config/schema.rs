//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base URL hrefs are resolved against (e.g., "http://localhost/").
    pub base_url: String,

    /// Only intercept links under this path prefix.
    pub scope: Option<String>,

    /// Dispatch the current location when listening starts.
    pub initial_dispatch: bool,

    /// Re-dispatch on back/forward navigation.
    pub listen_popstate: bool,

    /// Path prefixes left to the browser.
    pub ignored: Vec<String>,

    /// Route table, in dispatch order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/".to_string(),
            scope: None,
            initial_dispatch: true,
            listen_popstate: true,
            ignored: Vec::new(),
            routes: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A named route pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging and reports.
    pub name: String,

    /// Path pattern (e.g., "/users/:id").
    pub pattern: String,

    /// Whether the chain continues past this route once it matches.
    #[serde(default = "default_continue")]
    pub continue_chain: bool,
}

fn default_continue() -> bool {
    true
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "http://localhost/");
        assert!(config.initial_dispatch);
        assert!(config.routes.is_empty());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_routes_parse_in_order() {
        let config: RouterConfig = toml::from_str(
            r#"
            ignored = ["/static"]

            [[routes]]
            name = "home"
            pattern = "/"

            [[routes]]
            name = "user"
            pattern = "/users/:id"
            continue_chain = false
            "#,
        )
        .unwrap();

        assert_eq!(config.ignored, vec!["/static"]);
        assert_eq!(config.routes[0].name, "home");
        assert!(config.routes[0].continue_chain);
        assert_eq!(config.routes[1].pattern, "/users/:id");
        assert!(!config.routes[1].continue_chain);
    }
}
