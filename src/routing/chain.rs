//! Ordered handler chain with explicit continuation.
//!
//! # Responsibilities
//! - Bind a handler to a compiled matcher
//! - Walk entries in registration order, filtering by match
//! - Hand each matching handler a `Next` for the rest of the walk
//!
//! # Design Decisions
//! - A handler stops the chain by not calling `next.run(ctx)`
//! - Non-matching entries are skipped without stopping the walk
//! - Each `Next` owns its position, so nested runs never share a cursor
//! - Handler errors are returned as-is; later entries do not run

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::HandlerError;
use crate::routing::context::NavigationContext;
use crate::routing::matcher::CompiledMatcher;

/// Result of a handler or of a whole run.
pub type HandlerResult = Result<(), HandlerError>;

/// A route handler.
pub type Handler = Rc<dyn Fn(&mut NavigationContext, Next<'_>) -> HandlerResult>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut NavigationContext, Next<'_>) -> HandlerResult + 'static,
{
    Rc::new(f)
}

/// One matcher bound to one handler.
pub struct ChainEntry {
    matcher: Rc<CompiledMatcher>,
    handler: Handler,
}

impl ChainEntry {
    pub fn new(matcher: Rc<CompiledMatcher>, handler: Handler) -> Self {
        Self { matcher, handler }
    }

    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }
}

impl fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainEntry")
            .field("pattern", &self.matcher.pattern())
            .finish()
    }
}

/// Continuation handed to a handler.
///
/// Holds the remaining entries of this run. Calling [`Next::run`] resumes the
/// walk; dropping it ends the dispatch.
pub struct Next<'a> {
    remaining: &'a [Rc<ChainEntry>],
    invoked: &'a Cell<usize>,
}

impl<'a> Next<'a> {
    /// Continue with the next entry whose matcher accepts `ctx.pathname`.
    pub fn run(self, ctx: &mut NavigationContext) -> HandlerResult {
        let mut remaining = self.remaining;
        while let Some((entry, rest)) = remaining.split_first() {
            remaining = rest;
            let Some(params) = entry.matcher.params(ctx.pathname()) else {
                continue;
            };

            tracing::debug!(
                pattern = %entry.matcher.pattern(),
                path = %ctx.path(),
                "Route matched"
            );
            ctx.params = params;
            self.invoked.set(self.invoked.get() + 1);

            let next = Next {
                remaining,
                invoked: self.invoked,
            };
            return (entry.handler)(ctx, next);
        }
        Ok(())
    }
}

/// Run `entries` over `ctx`, returning how many handlers were invoked.
pub fn run(entries: &[Rc<ChainEntry>], ctx: &mut NavigationContext) -> Result<usize, HandlerError> {
    let invoked = Cell::new(0);
    Next {
        remaining: entries,
        invoked: &invoked,
    }
    .run(ctx)?;
    Ok(invoked.get())
}
