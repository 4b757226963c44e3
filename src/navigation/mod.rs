//! Browser-facing collaborators.
//!
//! # Data Flow
//! ```text
//! Link click (LinkDelegate)  ─┐
//! Back/forward (PopState)    ─┼─▶ Router::navigate ─▶ History::push ─▶ dispatch
//! Startup (Location)         ─┘
//! ```
//!
//! # Design Decisions
//! - The router only sees these traits; a real browser binding and the
//!   in-memory fakes in `memory.rs` are interchangeable
//! - Everything here is single-threaded (`Rc`, no `Send` bounds)
//! - Callbacks are boxed closures owned by the event source

pub mod memory;
pub mod parser;

use std::rc::Rc;

pub use self::memory::{MemoryAnchor, MemoryClick, MemoryHistory, MemoryLinkDelegate, MemoryPopState};
pub use self::parser::StdUrlParser;

/// History stack mutation.
pub trait History {
    fn push(&self, path: &str);
    fn replace(&self, path: &str);
}

/// Where the document currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentLocation {
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Absolute href.
    pub href: String,
}

impl CurrentLocation {
    /// Pathname followed by the search string.
    pub fn path(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

/// Readable current location.
pub trait Location {
    fn current(&self) -> CurrentLocation;
}

/// Event side of an intercepted link activation.
pub trait LinkEvent {
    fn prevent_default(&mut self);
    fn stop_propagation(&mut self);
}

/// Anchor element side of an intercepted link activation.
pub trait Anchor {
    /// Resolved, absolute href.
    fn href(&self) -> String;
    fn has_href_attribute(&self) -> bool;
    fn base_uri(&self) -> String;
}

/// Callback fired for every in-page link activation.
pub type LinkCallback = Box<dyn Fn(&mut dyn LinkEvent, &dyn Anchor)>;

/// Delegated link-click registration.
pub trait LinkDelegate {
    fn bind(&self, callback: LinkCallback);
}

/// Back/forward navigation registration.
pub trait PopStateSource {
    fn bind(&self, callback: Box<dyn Fn()>);
}

/// Components of a parsed href.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

pub trait UrlParser {
    fn parse(&self, href: &str) -> ParsedUrl;
}

/// Returns true when `anchor` points at a fragment of the current document.
pub fn is_hash_link(anchor: &dyn Anchor) -> bool {
    let href = anchor.href();
    let base = anchor.base_uri();
    href.get(base.len()..)
        .map(|rest| rest.starts_with('#'))
        .unwrap_or(false)
}

/// The collaborators a router talks to.
#[derive(Clone)]
pub struct Environment {
    pub history: Rc<dyn History>,
    pub location: Rc<dyn Location>,
    pub links: Rc<dyn LinkDelegate>,
    pub pop_state: Rc<dyn PopStateSource>,
    pub url: Rc<dyn UrlParser>,
}

/// Handles to the fakes behind [`Environment::in_memory`].
#[derive(Clone)]
pub struct MemoryEnvironment {
    pub history: Rc<MemoryHistory>,
    pub links: Rc<MemoryLinkDelegate>,
    pub pop_state: Rc<MemoryPopState>,
}

impl Environment {
    /// Wire up in-memory fakes rooted at `base_url`.
    ///
    /// The returned handles drive the fakes (click links, go back) while the
    /// environment is handed to the router.
    pub fn in_memory(base_url: &str) -> Result<(Self, MemoryEnvironment), url::ParseError> {
        let parser = Rc::new(StdUrlParser::new(base_url)?);
        let history = Rc::new(MemoryHistory::new(parser.base().clone(), "/"));
        let links = Rc::new(MemoryLinkDelegate::default());
        let pop_state = Rc::new(MemoryPopState::default());

        let env = Self {
            history: history.clone(),
            location: history.clone(),
            links: links.clone(),
            pop_state: pop_state.clone(),
            url: parser,
        };
        Ok((
            env,
            MemoryEnvironment {
                history,
                links,
                pop_state,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_link_detection() {
        let base = "http://localhost/page";
        assert!(is_hash_link(&MemoryAnchor::new("http://localhost/page#top", base)));
        assert!(!is_hash_link(&MemoryAnchor::new("http://localhost/other", base)));
        assert!(!is_hash_link(&MemoryAnchor::new("http://localhost/page", base)));
    }

    #[test]
    fn test_current_location_path() {
        let loc = CurrentLocation {
            pathname: "/a".into(),
            search: "?b=1".into(),
            href: "http://localhost/a?b=1".into(),
        };
        assert_eq!(loc.path(), "/a?b=1");
    }
}
