use std::{cell::Cell, rc::Rc};

use pretty_assertions::assert_eq;
use wayfinder_router::prelude::*;

fn table(dispatches: &Rc<Cell<usize>>) -> RouteTable {
    let count = |dispatches: &Rc<Cell<usize>>| {
        let dispatches = dispatches.clone();
        move |_: &Parameters| dispatches.set(dispatches.get() + 1)
    };

    RouteTable::new()
        .route(Route::new("/", count(dispatches)).unwrap().with_title("Home"))
        .route(Route::new("/about", count(dispatches)).unwrap().with_title("About"))
        .route(
            Route::new("/users/:id", count(dispatches))
                .unwrap()
                .with_page("user-detail"),
        )
}

fn started(history: Rc<dyn History>) -> (Router, Rc<Cell<usize>>) {
    let dispatches = Rc::new(Cell::new(0));
    let mut router = Router::new(table(&dispatches), history, RouterConfig::default());
    router.start().unwrap();
    (router, dispatches)
}

#[test]
fn routed_links_are_taken_over() {
    let (mut router, dispatches) = started(Rc::new(MemoryHistory::default()));

    assert!(router.intercept_click(&LinkClick::routed("/users/7")).unwrap());
    assert_eq!(router.state().parameters.get("id"), Some("7"));
    assert_eq!(dispatches.get(), 2);
}

#[test]
fn other_clicks_stay_with_the_host() {
    let (mut router, dispatches) = started(Rc::new(MemoryHistory::default()));
    let before = router.state().clone();

    let clicks = [
        LinkClick::plain("/about"),
        LinkClick::routed("/about").with_modifier(true),
        LinkClick::routed("/about").with_button(MouseButton::Auxiliary),
        LinkClick::routed("https://example.com/about"),
        LinkClick::routed("mailto:ana@example.com"),
        LinkClick::routed(""),
        LinkClick {
            href: None,
            routed: true,
            ..Default::default()
        },
    ];
    for click in &clicks {
        assert!(!router.intercept_click(click).unwrap(), "{click:?}");
    }

    assert_eq!(router.state(), &before);
    assert_eq!(dispatches.get(), 1);
}

#[test]
fn relative_links_resolve_against_the_current_path() {
    let (mut router, _) = started(Rc::new(MemoryHistory::default()));
    router.navigate("/users/7", None).unwrap();

    assert!(router.intercept_click(&LinkClick::routed("8")).unwrap());
    assert_eq!(router.state().path, "/users/8");

    assert!(router.intercept_click(&LinkClick::routed("../about?from=user")).unwrap());
    assert_eq!(router.state().pathname(), "/about");
    assert_eq!(router.state().query.as_deref(), Some("from=user"));
}

#[test]
fn prefixed_links_lose_their_prefix() {
    let history = Rc::new(MemoryHistory::default().with_prefix("/app"));
    let (mut router, _) = started(history.clone());

    let href = router.href("user-detail", &[("id", "7")]).unwrap();
    assert_eq!(href, "/app/users/7");

    assert!(router.intercept_click(&LinkClick::routed(href)).unwrap());
    assert_eq!(history.current_route(), "/users/7");
    assert_eq!(history.full_route_path(), "/app/users/7");
    assert_eq!(router.state().page, "user-detail");
}

#[test]
fn active_links_follow_the_state() {
    let (mut router, _) = started(Rc::new(MemoryHistory::default()));
    router.navigate("/users/7?tab=posts", None).unwrap();

    let state = router.state();
    assert!(state.is_active("/users", false));
    assert!(state.is_active("/users/7", true));
    assert!(!state.is_active("/", false));
    assert!(!state.is_active("/about", false));
}

#[test]
fn hash_routing() {
    let history = Rc::new(HashHistory::new("https://example.com/app/index.html#/about").unwrap());
    let (mut router, dispatches) = started(history.clone());
    assert_eq!(router.state().breadcrumb, "About");

    // the user edits the fragment
    history.set_fragment("/users/3");
    assert_eq!(router.handle_history_events(), 1);
    assert_eq!(router.state().parameters.get("id"), Some("3"));

    // fragment links and prefixed links both route
    assert!(router.intercept_click(&LinkClick::routed("#/")).unwrap());
    assert_eq!(router.state().breadcrumb, "Home");

    let href = router.href("user-detail", &[("id", "9")]).unwrap();
    assert_eq!(href, "/app/index.html#/users/9");
    assert!(router.intercept_click(&LinkClick::routed(href)).unwrap());
    assert_eq!(history.href(), "https://example.com/app/index.html#/users/9");

    assert_eq!(router.go_back(), 1);
    assert_eq!(router.state().breadcrumb, "Home");
    assert_eq!(dispatches.get(), 5);
}

#[test]
fn prefix_with_trailing_slash() {
    let history = Rc::new(MemoryHistory::default().with_prefix("/app/"));
    let (mut router, _) = started(history.clone());
    router.navigate("/about", None).unwrap();

    let href = router.href("user-detail", &[("id", "7")]).unwrap();
    assert_eq!(href, "/app/users/7");
    assert!(router.intercept_click(&LinkClick::routed(href)).unwrap());
    assert_eq!(history.current_route(), "/users/7");
    assert_eq!(router.state().page, "user-detail");

    // the prefix itself is the root
    assert!(router.intercept_click(&LinkClick::routed("/app")).unwrap());
    assert_eq!(history.current_route(), "/");
    assert_eq!(router.state().breadcrumb, "Home");
}

#[test]
fn bare_fragment_links_in_hash_mode() {
    let history = Rc::new(HashHistory::new("https://example.com/index.html").unwrap());
    let (mut router, _) = started(history.clone());

    assert!(router.intercept_click(&LinkClick::routed("#about")).unwrap());
    assert_eq!(history.current_route(), "/about");
    assert_eq!(router.state().breadcrumb, "About");
}

#[test]
fn hash_back_keeps_parameters_that_need_encoding() {
    let history = Rc::new(HashHistory::new("https://example.com/index.html").unwrap());
    let table = RouteTable::new()
        .route(Route::new("/search/:term", |_| {}).unwrap())
        .route(Route::new("/users/:name", |_| {}).unwrap());
    let mut router = Router::new(table, history.clone(), RouterConfig::default());
    router.start().unwrap();

    router.navigate("/search/a b", None).unwrap();
    router.navigate("/search/a b", None).unwrap();
    let searched = router.state().clone();
    assert_eq!(searched.parameters.get("term"), Some("a b"));

    router.navigate("/users/José", None).unwrap();
    assert_eq!(router.state().parameters.get("name"), Some("José"));

    assert_eq!(router.go_back(), 1);
    assert_eq!(router.state().parameters, searched.parameters);
    assert_eq!(history.current_route(), "/search/a b");

    // the repeated navigation did not add an entry
    assert_eq!(router.go_back(), 1);
    assert_eq!(history.current_route(), "/");
}
