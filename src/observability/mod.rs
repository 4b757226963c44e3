//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, chain, link interception produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt layer)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a subscriber or recorder is up to the binary
//! - Without a recorder, metric updates are no-ops

pub mod logging;
pub mod metrics;
