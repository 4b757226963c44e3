//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     register(pattern, handlers)
//!     → matcher.rs (compile pattern once)
//!     → chain.rs (one ChainEntry per handler, appended in order)
//!
//! Dispatch:
//!     dispatch(path)
//!     → context.rs (new NavigationContext linked to the previous one)
//!     → chain.rs (walk entries, match pathname, call handler with Next)
//!     → router.rs (store context as current)
//! ```
//!
//! # Design Decisions
//! - Registration order is dispatch order; nothing is reordered or merged
//! - Deterministic: same input always matches the same entries
//! - Single-threaded and synchronous; no suspension points

pub mod chain;
pub mod context;
pub mod matcher;
pub mod router;

pub use chain::{handler, ChainEntry, Handler, HandlerResult, Next};
pub use context::NavigationContext;
pub use matcher::{CompiledMatcher, PathPrefix, Segment, WILDCARD_PARAM};
pub use router::{ListenOptions, Router};
