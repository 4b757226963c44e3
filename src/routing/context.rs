//! Per-dispatch navigation context.

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde::Serialize;

/// Everything a handler knows about the navigation being dispatched.
///
/// Built once per dispatch. Only `params` is public and mutable: the dispatch
/// chain replaces it with the captures of each matching entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavigationContext {
    /// Path as dispatched, query string included.
    path: String,
    /// `path` without query string or fragment; this is what patterns match.
    pathname: String,
    /// Raw query string without the leading `?`.
    querystring: String,
    /// Decoded query values. On repeated keys the last occurrence wins.
    query: HashMap<String, String>,
    /// Parameters captured by the entry currently running.
    pub params: HashMap<String, String>,
    #[serde(skip)]
    previous: Weak<NavigationContext>,
}

impl NavigationContext {
    pub fn new(path: impl Into<String>, previous: Option<&Rc<NavigationContext>>) -> Self {
        let path = path.into();
        let without_fragment = path.split('#').next().unwrap_or_default();
        let (pathname, querystring) = match without_fragment.split_once('?') {
            Some((pathname, querystring)) => (pathname, querystring),
            None => (without_fragment, ""),
        };

        let query = url::form_urlencoded::parse(querystring.as_bytes())
            .into_owned()
            .collect();

        Self {
            pathname: pathname.to_string(),
            querystring: querystring.to_string(),
            query,
            params: HashMap::new(),
            previous: previous.map(Rc::downgrade).unwrap_or_default(),
            path,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn querystring(&self) -> &str {
        &self.querystring
    }

    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    /// The context this one replaced, while something still holds it.
    ///
    /// The router drops its reference to the old context once a dispatch
    /// returns, so this resolves inside handlers. Afterwards it is `None`
    /// unless the caller kept the old context alive, e.g. by holding the
    /// value of [`Router::current`](crate::Router::current) across the dispatch.
    pub fn previous(&self) -> Option<Rc<NavigationContext>> {
        self.previous.upgrade()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}
