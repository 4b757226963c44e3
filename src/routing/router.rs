//! Route registration and navigation.
//!
//! # Responsibilities
//! - Compile patterns and append chain entries in registration order
//! - Dispatch paths through the chain, keeping the current context
//! - Reconcile with history and intercept in-page link clicks
//!
//! # Design Decisions
//! - `Router` is a cheap `Rc` handle; event callbacks hold a `Weak` one
//! - Entries are snapshotted per dispatch, so a handler may register routes
//! - Identical patterns are never merged; both entries run
//! - `listen` happens once; there is no stop

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::RouterConfig;
use crate::error::{CompileError, HandlerError};
use crate::navigation::{is_hash_link, Anchor, Environment, LinkEvent};
use crate::observability::metrics;
use crate::routing::chain::{self, ChainEntry, Handler};
use crate::routing::context::NavigationContext;
use crate::routing::matcher::{CompiledMatcher, PathPrefix};

/// Options for [`Router::listen`].
#[derive(Debug, Clone)]
pub struct ListenOptions {
    /// Only intercept links whose pathname starts with this prefix.
    pub scope: Option<String>,
    /// Dispatch the current location before listening.
    pub initial_dispatch: bool,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            scope: None,
            initial_dispatch: true,
        }
    }
}

struct RouterState {
    entries: RefCell<Vec<Rc<ChainEntry>>>,
    ignored: RefCell<Vec<PathPrefix>>,
    current: RefCell<Option<Rc<NavigationContext>>>,
    running: Cell<bool>,
    env: Environment,
}

/// Client-side path router.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterState>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("entries", &self.inner.entries.borrow().len())
            .field("ignored", &self.inner.ignored.borrow())
            .field("running", &self.inner.running.get())
            .finish()
    }
}

impl Router {
    pub fn new(env: Environment) -> Self {
        Self {
            inner: Rc::new(RouterState {
                entries: RefCell::new(Vec::new()),
                ignored: RefCell::new(Vec::new()),
                current: RefCell::new(None),
                running: Cell::new(false),
                env,
            }),
        }
    }

    /// Build a router whose ignore list is seeded from `config`.
    pub fn from_config(config: &RouterConfig, env: Environment) -> Self {
        let router = Self::new(env);
        for prefix in &config.ignored {
            router.ignore(prefix.as_str());
        }
        router
    }

    /// Compile `pattern` once and append one entry per handler.
    pub fn register<I>(&self, pattern: &str, handlers: I) -> Result<&Self, CompileError>
    where
        I: IntoIterator<Item = Handler>,
    {
        let matcher = Rc::new(CompiledMatcher::compile(pattern)?);
        let mut entries = self.inner.entries.borrow_mut();
        let before = entries.len();
        entries.extend(
            handlers
                .into_iter()
                .map(|handler| Rc::new(ChainEntry::new(matcher.clone(), handler))),
        );
        tracing::debug!(
            pattern = %pattern,
            handlers = entries.len() - before,
            "Route registered"
        );
        Ok(self)
    }

    /// Run the chain for `path` and make the new context current.
    pub fn dispatch(&self, path: &str) -> Result<&Self, HandlerError> {
        let previous = self.inner.current.borrow().clone();
        let mut ctx = NavigationContext::new(path, previous.as_ref());
        let entries = self.inner.entries.borrow().clone();

        tracing::debug!(path = %path, entries = entries.len(), "Dispatching");
        let result = chain::run(&entries, &mut ctx);

        match &result {
            Ok(invoked) => {
                metrics::record_dispatch(*invoked);
                tracing::debug!(path = %path, handlers = invoked, "Dispatch complete");
            }
            Err(e) => {
                metrics::record_dispatch_failed();
                tracing::debug!(path = %path, error = %e, "Dispatch aborted by handler");
            }
        }

        *self.inner.current.borrow_mut() = Some(Rc::new(ctx));
        result.map(|_| self)
    }

    /// Navigate to `path`, or re-dispatch the current location.
    ///
    /// An explicit path is pushed onto history first. Without one the current
    /// location is read back, and nothing happens if it is ignored; the return
    /// value is `false` in that case.
    pub fn navigate(&self, path: Option<&str>) -> Result<bool, HandlerError> {
        let path = match path {
            Some(path) => {
                self.push(path);
                path.to_string()
            }
            None => {
                let location = self.inner.env.location.current();
                if self.is_ignored(&location.href) {
                    tracing::warn!(href = %location.href, "Current location is ignored");
                    metrics::record_navigation_ignored();
                    return Ok(false);
                }
                location.path()
            }
        };

        self.dispatch(&path)?;
        Ok(true)
    }

    /// Start intercepting link clicks. Later calls do nothing.
    pub fn listen(&self, options: ListenOptions) -> Result<&Self, HandlerError> {
        if self.inner.running.get() {
            return Ok(self);
        }

        // Set before the first navigation so handlers that call listen see it.
        self.inner.running.set(true);
        if options.initial_dispatch {
            if let Err(e) = self.navigate(None) {
                self.inner.running.set(false);
                return Err(e);
            }
        }

        let weak = Rc::downgrade(&self.inner);
        let scope = options.scope.clone().map(PathPrefix::new);
        self.inner.env.links.bind(Box::new(move |event: &mut dyn LinkEvent, anchor: &dyn Anchor| {
            if let Some(router) = upgrade(&weak) {
                router.intercept(event, anchor, scope.as_ref());
            }
        }));

        tracing::info!(scope = ?options.scope, "Router listening for link clicks");
        Ok(self)
    }

    /// Re-dispatch the current location on back/forward navigation.
    pub fn listen_pop_state(&self) -> &Self {
        let weak = Rc::downgrade(&self.inner);
        self.inner.env.pop_state.bind(Box::new(move || {
            let Some(router) = upgrade(&weak) else {
                return;
            };
            if let Err(e) = router.navigate(None) {
                tracing::error!(error = %e, "Navigation after popstate failed");
            }
        }));
        self
    }

    /// Exclude hrefs under `prefix` from interception.
    pub fn ignore(&self, prefix: impl Into<String>) -> &Self {
        self.inner
            .ignored
            .borrow_mut()
            .push(PathPrefix::new(prefix));
        self
    }

    /// Returns true if `href` falls under any ignored prefix.
    pub fn is_ignored(&self, href: &str) -> bool {
        let pathname = self.inner.env.url.parse(href).pathname;
        self.inner
            .ignored
            .borrow()
            .iter()
            .any(|prefix| prefix.routable(&pathname))
    }

    pub fn push(&self, path: &str) -> &Self {
        self.inner.env.history.push(path);
        self
    }

    pub fn replace(&self, path: &str) -> &Self {
        self.inner.env.history.replace(path);
        self
    }

    /// Hand the router to `plugin`, e.g. to register a bundle of routes.
    pub fn use_plugin<F>(&self, plugin: F) -> &Self
    where
        F: FnOnce(&Router),
    {
        plugin(self);
        self
    }

    /// Context of the most recent dispatch.
    pub fn current(&self) -> Option<Rc<NavigationContext>> {
        self.inner.current.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Registered patterns in dispatch order, one per entry.
    pub fn patterns(&self) -> Vec<String> {
        self.inner
            .entries
            .borrow()
            .iter()
            .map(|entry| entry.matcher().pattern().to_string())
            .collect()
    }

    /// Handle one link activation. Returns true if it was intercepted.
    fn intercept(
        &self,
        event: &mut dyn LinkEvent,
        anchor: &dyn Anchor,
        scope: Option<&PathPrefix>,
    ) -> bool {
        if !anchor.has_href_attribute() || is_hash_link(anchor) {
            return false;
        }

        let href = anchor.href();
        let parsed = self.inner.env.url.parse(&href);
        let in_scope = scope.map_or(true, |prefix| prefix.routable(&parsed.pathname));
        if !in_scope || self.is_ignored(&href) {
            tracing::debug!(href = %href, in_scope, "Link left to the browser");
            return false;
        }

        let path = format!("{}{}", parsed.pathname, parsed.search);
        match self.navigate(Some(&path)) {
            Ok(_) => {
                event.prevent_default();
                event.stop_propagation();
                metrics::record_link_intercepted();
                true
            }
            Err(e) => {
                // Default navigation goes ahead, so the browser loads the page.
                tracing::error!(href = %href, error = %e, "Intercepted navigation failed");
                false
            }
        }
    }
}

fn upgrade(weak: &Weak<RouterState>) -> Option<Router> {
    weak.upgrade().map(|inner| Router { inner })
}
