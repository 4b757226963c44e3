//! Client-side path router.
//!
//! Matches navigated paths against registered patterns, extracts parameters
//! and runs handlers in registration order through an explicit continuation.
//! Browser history, location and link clicks sit behind traits in
//! [`navigation`] so the router runs anywhere, including tests.

pub mod config;
pub mod error;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use error::{CompileError, HandlerError, RouterError};
pub use navigation::Environment;
pub use routing::{handler, CompiledMatcher, ListenOptions, NavigationContext, Next, Router};
