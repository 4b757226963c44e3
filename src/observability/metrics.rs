//! Router metrics.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatches, by outcome
//! - `router_handlers_invoked_total` (counter): handlers run across dispatches
//! - `router_navigation_ignored_total` (counter): re-dispatches skipped as ignored
//! - `router_links_intercepted_total` (counter): clicks handled without a page load

use metrics::counter;

pub fn record_dispatch(handlers_invoked: usize) {
    counter!("router_dispatch_total", "outcome" => "completed").increment(1);
    counter!("router_handlers_invoked_total").increment(handlers_invoked as u64);
}

pub fn record_dispatch_failed() {
    counter!("router_dispatch_total", "outcome" => "failed").increment(1);
}

pub fn record_navigation_ignored() {
    counter!("router_navigation_ignored_total").increment(1);
}

pub fn record_link_intercepted() {
    counter!("router_links_intercepted_total").increment(1);
}
