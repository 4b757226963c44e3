//! Shared utilities for router integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use path_router::navigation::{Environment, MemoryEnvironment};
use path_router::routing::Handler;
use path_router::{handler, Router};

/// Ordered log of handler invocations.
pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Router over a fresh in-memory browser at `http://localhost/`.
pub fn in_memory_router() -> (Router, MemoryEnvironment) {
    let (env, mem) = Environment::in_memory("http://localhost/").unwrap();
    (Router::new(env), mem)
}

/// Handler that logs `label` and continues the chain.
pub fn pass(log: &Log, label: &'static str) -> Handler {
    let log = log.clone();
    handler(move |ctx, next| {
        log.borrow_mut().push(label.to_string());
        next.run(ctx)
    })
}

/// Handler that logs `label` and stops the chain.
pub fn stop(log: &Log, label: &'static str) -> Handler {
    let log = log.clone();
    handler(move |_, _| {
        log.borrow_mut().push(label.to_string());
        Ok(())
    })
}

/// Handler that logs `label` with the params it saw, then continues.
#[allow(dead_code)]
pub fn capture(log: &Log, label: &'static str) -> Handler {
    let log = log.clone();
    handler(move |ctx, next| {
        let mut params: Vec<_> = ctx
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        params.sort();
        log.borrow_mut()
            .push(format!("{}({})", label, params.join(",")));
        next.run(ctx)
    })
}

pub fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}
