//! Link interception, history reconciliation and the ignore list.

use path_router::navigation::{History, MemoryAnchor};
use path_router::{handler, HandlerError, ListenOptions};

mod common;
use common::{entries, in_memory_router, new_log, pass};

const BASE: &str = "http://localhost/";

#[test]
fn test_listen_dispatches_current_location() {
    let (router, mem) = in_memory_router();
    let log = new_log();
    router.register("/start", [pass(&log, "start")]).unwrap();

    mem.history.replace("/start?from=boot");
    router.listen(ListenOptions::default()).unwrap();

    assert_eq!(entries(&log), vec!["start"]);
    let ctx = router.current().unwrap();
    assert_eq!(ctx.path(), "/start?from=boot");
    assert_eq!(mem.history.entries(), vec!["/start?from=boot"]);
}

#[test]
fn test_click_is_intercepted_and_pushed() {
    let (router, mem) = in_memory_router();
    let log = new_log();
    router.register("/users/:id", [pass(&log, "user")]).unwrap();
    router.listen(ListenOptions::default()).unwrap();

    let click = mem
        .links
        .click(&MemoryAnchor::new("http://localhost/users/5?tab=1", BASE));

    assert!(click.default_prevented);
    assert!(click.propagation_stopped);
    assert_eq!(entries(&log), vec!["user"]);
    assert_eq!(mem.history.entries(), vec!["/", "/users/5?tab=1"]);
    assert_eq!(router.current().unwrap().param("id"), Some("5"));
}

#[test]
fn test_hash_links_are_left_alone() {
    let (router, mem) = in_memory_router();
    router.listen(ListenOptions::default()).unwrap();

    let click = mem
        .links
        .click(&MemoryAnchor::new("http://localhost/#section", BASE));

    assert!(!click.default_prevented);
    assert_eq!(mem.history.entries(), vec!["/"]);
}

#[test]
fn test_anchor_without_href_is_left_alone() {
    let (router, mem) = in_memory_router();
    router.listen(ListenOptions::default()).unwrap();

    let click = mem.links.click(&MemoryAnchor::without_href(BASE));
    assert!(!click.default_prevented);
    assert!(!click.propagation_stopped);
}

#[test]
fn test_links_outside_scope_are_left_alone() {
    let (router, mem) = in_memory_router();
    router
        .listen(ListenOptions {
            scope: Some("/app".into()),
            initial_dispatch: false,
        })
        .unwrap();

    let outside = mem
        .links
        .click(&MemoryAnchor::new("http://localhost/blog/post", BASE));
    assert!(!outside.default_prevented);

    let inside = mem
        .links
        .click(&MemoryAnchor::new("http://localhost/app/settings", BASE));
    assert!(inside.default_prevented);
    assert_eq!(mem.history.entries(), vec!["/", "/app/settings"]);
}

#[test]
fn test_ignored_links_are_left_alone() {
    let (router, mem) = in_memory_router();
    router.ignore("/static").ignore("/downloads");
    router.listen(ListenOptions::default()).unwrap();

    let click = mem
        .links
        .click(&MemoryAnchor::new("http://localhost/downloads/app.zip", BASE));
    assert!(!click.default_prevented);
    assert_eq!(mem.history.entries(), vec!["/"]);
}

#[test]
fn test_is_ignored_is_a_union_of_prefixes() {
    let (router, _) = in_memory_router();
    assert!(!router.is_ignored("http://localhost/static/a.css"));

    router.ignore("/static").ignore("/api");
    assert!(router.is_ignored("http://localhost/static/a.css"));
    assert!(router.is_ignored("/api/v1/users"));
    assert!(!router.is_ignored("http://localhost/about"));
}

#[test]
fn test_failed_navigation_falls_back_to_browser() {
    let (router, mem) = in_memory_router();
    router
        .register("/broken", [handler(|_, _| Err(HandlerError::new("render failed")))])
        .unwrap();
    router
        .listen(ListenOptions {
            scope: None,
            initial_dispatch: false,
        })
        .unwrap();

    let click = mem
        .links
        .click(&MemoryAnchor::new("http://localhost/broken", BASE));
    assert!(!click.default_prevented);
}

#[test]
fn test_pop_state_redispatches_current_location() {
    let (router, mem) = in_memory_router();
    let log = new_log();
    router
        .register("/a", [pass(&log, "a")])
        .unwrap()
        .register("/b", [pass(&log, "b")])
        .unwrap();
    router.listen_pop_state();

    router.navigate(Some("/a")).unwrap();
    router.navigate(Some("/b")).unwrap();
    assert!(mem.history.back());
    mem.pop_state.fire();

    assert_eq!(entries(&log), vec!["a", "b", "a"]);
    assert_eq!(mem.history.entries(), vec!["/", "/a", "/b"]);
    assert_eq!(router.current().unwrap().path(), "/a");
}

#[test]
fn test_pop_state_to_ignored_location_does_nothing() {
    let (router, mem) = in_memory_router();
    let log = new_log();
    router.register("*", [pass(&log, "any")]).unwrap();
    router.ignore("/legacy");
    router.listen_pop_state();

    mem.history.push("/legacy/page");
    mem.pop_state.fire();
    assert!(entries(&log).is_empty());
}

#[test]
fn test_replace_does_not_grow_history() {
    let (router, mem) = in_memory_router();
    router.push("/one").replace("/two");
    assert_eq!(mem.history.entries(), vec!["/", "/two"]);
}
