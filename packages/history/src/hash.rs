use std::cell::RefCell;

use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::{History, Updater};

/// One history entry. The route is kept as it was pushed, since the fragment of `url` is
/// percent-encoded.
struct HashEntry {
    url: Url,
    route: String,
    state: Option<Value>,
}

impl HashEntry {
    fn with_route(&self, route: String, state: Option<Value>) -> Self {
        let mut url = self.url.clone();
        url.set_fragment(Some(&route));
        Self { url, route, state }
    }
}

struct HashHistoryState {
    current: HashEntry,
    past: Vec<HashEntry>,
    future: Vec<HashEntry>,
}

/// A [`History`] provider that keeps the route in the fragment of a full URL.
///
/// `#/about` and `#about` both read as `/about`; an empty or missing fragment reads as `/`. Pushed
/// routes are written as `#/route`, and read back exactly as they were pushed.
///
/// ```rust
/// # use wayfinder_history::{History, HashHistory};
/// let history = HashHistory::new("https://example.com/app/index.html#about").unwrap();
/// assert_eq!(history.current_route(), "/about");
///
/// history.push(String::from("/contact"), None);
/// assert_eq!(history.href(), "https://example.com/app/index.html#/contact");
/// ```
pub struct HashHistory {
    state: RefCell<HashHistoryState>,
    updater: RefCell<Option<Updater>>,
}

impl HashHistory {
    /// Create a [`HashHistory`] whose current location is `url`.
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(url)?;
        let route = route_from_fragment(url.fragment());
        Ok(Self {
            state: RefCell::new(HashHistoryState {
                current: HashEntry {
                    url,
                    route,
                    state: None,
                },
                past: Vec::new(),
                future: Vec::new(),
            }),
            updater: RefCell::new(None),
        })
    }

    /// The full URL of the current location.
    pub fn href(&self) -> String {
        self.state.borrow().current.url.to_string()
    }

    /// Change the fragment as if the user edited it in the address bar.
    ///
    /// Unlike [`History::push`], this reports the change through the updater, the way a browser
    /// fires `hashchange`. Setting the route that is already current does nothing.
    pub fn set_fragment(&self, fragment: &str) {
        let changed = {
            let mut write = self.state.borrow_mut();
            let fragment = fragment.trim_start_matches('#');
            let route = route_from_fragment(Some(fragment));
            if write.current.route == route {
                false
            } else {
                let next = write.current.with_route(route, None);
                let old = std::mem::replace(&mut write.current, next);
                write.past.push(old);
                write.future.clear();
                true
            }
        };

        if changed {
            debug!(fragment, "fragment changed outside of the router");
            self.notify();
        }
    }

    fn notify(&self) {
        let updater = self.updater.borrow().clone();
        if let Some(updater) = updater {
            updater();
        }
    }
}

/// Read a route from a URL fragment.
fn route_from_fragment(fragment: Option<&str>) -> String {
    match fragment.unwrap_or("") {
        "" => String::from("/"),
        f if f.starts_with('/') => f.to_string(),
        f => format!("/{f}"),
    }
}

impl History for HashHistory {
    fn current_route(&self) -> String {
        self.state.borrow().current.route.clone()
    }

    fn current_state(&self) -> Option<Value> {
        self.state.borrow().current.state.clone()
    }

    fn current_prefix(&self) -> Option<String> {
        let state = self.state.borrow();
        Some(format!("{}#", state.current.url.path()))
    }

    fn full_route_path(&self) -> String {
        let state = self.state.borrow();
        let HashEntry { url, route, .. } = &state.current;
        match url.query() {
            Some(query) => format!("{}?{query}#{route}", url.path()),
            None => format!("{}#{route}", url.path()),
        }
    }

    fn can_go_back(&self) -> bool {
        !self.state.borrow().past.is_empty()
    }

    fn go_back(&self) {
        let moved = {
            let mut write = self.state.borrow_mut();
            match write.past.pop() {
                Some(last) => {
                    let old = std::mem::replace(&mut write.current, last);
                    write.future.push(old);
                    true
                }
                None => false,
            }
        };

        if moved {
            self.notify();
        }
    }

    fn can_go_forward(&self) -> bool {
        !self.state.borrow().future.is_empty()
    }

    fn go_forward(&self) {
        let moved = {
            let mut write = self.state.borrow_mut();
            match write.future.pop() {
                Some(next) => {
                    let old = std::mem::replace(&mut write.current, next);
                    write.past.push(old);
                    true
                }
                None => false,
            }
        };

        if moved {
            self.notify();
        }
    }

    fn push(&self, route: String, state: Option<Value>) {
        if route.starts_with("//") {
            error!(r#"cannot navigate to paths starting with "//", path: {route}"#);
            return;
        }

        let mut write = self.state.borrow_mut();
        if write.current.route == route {
            write.current.state = state;
            return;
        }
        let next = write.current.with_route(route, state);
        let old = std::mem::replace(&mut write.current, next);
        write.past.push(old);
        write.future.clear();
    }

    fn replace(&self, route: String, state: Option<Value>) {
        if route.starts_with("//") {
            error!(r#"cannot navigate to paths starting with "//", path: {route}"#);
            return;
        }

        let mut write = self.state.borrow_mut();
        let next = write.current.with_route(route, state);
        write.current = next;
    }

    fn updater(&self, callback: Updater) {
        *self.updater.borrow_mut() = Some(callback);
    }
}
