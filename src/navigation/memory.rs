//! In-memory stand-ins for the browser.
//!
//! Used by the CLI and by tests. Event sources snapshot their callback lists
//! before firing so a callback may bind further listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use url::Url;

use crate::navigation::{
    Anchor, CurrentLocation, History, LinkCallback, LinkDelegate, LinkEvent, Location,
    PopStateSource,
};

/// History stack with a cursor, also serving as the current location.
#[derive(Debug)]
pub struct MemoryHistory {
    base: Url,
    entries: RefCell<Vec<String>>,
    cursor: Cell<usize>,
}

impl MemoryHistory {
    pub fn new(base: Url, initial: &str) -> Self {
        Self {
            base,
            entries: RefCell::new(vec![initial.to_string()]),
            cursor: Cell::new(0),
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn current_path(&self) -> String {
        self.entries
            .borrow()
            .get(self.cursor.get())
            .cloned()
            .unwrap_or_default()
    }

    /// Step back one entry. Returns false at the start of the stack.
    pub fn back(&self) -> bool {
        let cursor = self.cursor.get();
        if cursor == 0 {
            return false;
        }
        self.cursor.set(cursor - 1);
        true
    }

    /// Step forward one entry. Returns false at the end of the stack.
    pub fn forward(&self) -> bool {
        let cursor = self.cursor.get();
        if cursor + 1 >= self.entries.borrow().len() {
            return false;
        }
        self.cursor.set(cursor + 1);
        true
    }
}

impl History for MemoryHistory {
    fn push(&self, path: &str) {
        let mut entries = self.entries.borrow_mut();
        // Pushing discards anything ahead of the cursor.
        entries.truncate(self.cursor.get() + 1);
        entries.push(path.to_string());
        self.cursor.set(entries.len() - 1);
    }

    fn replace(&self, path: &str) {
        let mut entries = self.entries.borrow_mut();
        if let Some(slot) = entries.get_mut(self.cursor.get()) {
            *slot = path.to_string();
        }
    }
}

impl Location for MemoryHistory {
    fn current(&self) -> CurrentLocation {
        let path = self.current_path();
        match self.base.join(&path) {
            Ok(url) => CurrentLocation {
                pathname: url.path().to_string(),
                search: url.query().map(|q| format!("?{}", q)).unwrap_or_default(),
                href: url.to_string(),
            },
            Err(_) => CurrentLocation {
                pathname: path.clone(),
                search: String::new(),
                href: path,
            },
        }
    }
}

/// Outcome flags of a simulated click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryClick {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl LinkEvent for MemoryClick {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// A simulated `<a>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAnchor {
    href: String,
    base_uri: String,
    has_href: bool,
}

impl MemoryAnchor {
    pub fn new(href: impl Into<String>, base_uri: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            base_uri: base_uri.into(),
            has_href: true,
        }
    }

    /// An anchor with no `href` attribute at all.
    pub fn without_href(base_uri: impl Into<String>) -> Self {
        Self {
            href: String::new(),
            base_uri: base_uri.into(),
            has_href: false,
        }
    }
}

impl Anchor for MemoryAnchor {
    fn href(&self) -> String {
        self.href.clone()
    }

    fn has_href_attribute(&self) -> bool {
        self.has_href
    }

    fn base_uri(&self) -> String {
        self.base_uri.clone()
    }
}

/// Link delegate driven by [`MemoryLinkDelegate::click`].
#[derive(Default)]
pub struct MemoryLinkDelegate {
    callbacks: RefCell<Vec<Rc<dyn Fn(&mut dyn LinkEvent, &dyn Anchor)>>>,
}

impl MemoryLinkDelegate {
    /// Fire every bound callback for a click on `anchor`.
    pub fn click(&self, anchor: &MemoryAnchor) -> MemoryClick {
        let callbacks = self.callbacks.borrow().clone();
        let mut event = MemoryClick::default();
        for callback in callbacks {
            callback(&mut event, anchor);
        }
        event
    }

    pub fn listener_count(&self) -> usize {
        self.callbacks.borrow().len()
    }
}

impl LinkDelegate for MemoryLinkDelegate {
    fn bind(&self, callback: LinkCallback) {
        self.callbacks.borrow_mut().push(Rc::from(callback));
    }
}

/// Pop-state source driven by [`MemoryPopState::fire`].
#[derive(Default)]
pub struct MemoryPopState {
    callbacks: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl MemoryPopState {
    pub fn fire(&self) {
        let callbacks = self.callbacks.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.callbacks.borrow().len()
    }
}

impl PopStateSource for MemoryPopState {
    fn bind(&self, callback: Box<dyn Fn()>) {
        self.callbacks.borrow_mut().push(Rc::from(callback));
    }
}
