use std::cell::RefCell;

use serde_json::Value;
use tracing::error;

use crate::{History, Updater};

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    route: String,
    state: Option<Value>,
}

impl Entry {
    fn new(route: String, state: Option<Value>) -> Self {
        Self { route, state }
    }
}

struct MemoryHistoryState {
    current: Entry,
    history: Vec<Entry>,
    future: Vec<Entry>,
}

/// A [`History`] provider that stores all navigation information in memory.
///
/// It behaves like the History API of a browser: [`push`](History::push) and
/// [`replace`](History::replace) are silent, while [`go_back`](History::go_back) and
/// [`go_forward`](History::go_forward) report the move through the registered updater.
pub struct MemoryHistory {
    state: RefCell<MemoryHistoryState>,
    base_path: Option<String>,
    updater: RefCell<Option<Updater>>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] starting at `path`.
    ///
    /// ```rust
    /// # use wayfinder_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/users/42");
    /// assert_eq!(history.current_route(), "/users/42");
    /// assert_eq!(history.can_go_back(), false);
    /// ```
    pub fn with_initial_path(path: impl ToString) -> Self {
        Self {
            state: MemoryHistoryState {
                current: Entry::new(path.to_string(), None),
                history: Vec::new(),
                future: Vec::new(),
            }
            .into(),
            base_path: None,
            updater: RefCell::new(None),
        }
    }

    /// Set the base path for the history. All routes are prefixed with this path when rendered.
    ///
    /// ```rust
    /// # use wayfinder_history::*;
    /// let history = MemoryHistory::default().with_prefix("/my-app");
    ///
    /// assert_eq!(history.current_prefix(), Some("/my-app".to_string()));
    /// assert_eq!(history.full_route_path(), "/my-app/");
    /// ```
    pub fn with_prefix(mut self, prefix: impl ToString) -> Self {
        self.base_path = Some(prefix.to_string());
        self
    }

    /// The number of entries in the history, including the current one.
    pub fn len(&self) -> usize {
        let state = self.state.borrow();
        state.history.len() + 1 + state.future.len()
    }

    /// A [`MemoryHistory`] always holds at least its current entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn notify(&self) {
        // clone out of the cell so the callback may call back into the history
        let updater = self.updater.borrow().clone();
        if let Some(updater) = updater {
            updater();
        }
    }
}

impl History for MemoryHistory {
    fn current_route(&self) -> String {
        self.state.borrow().current.route.clone()
    }

    fn current_state(&self) -> Option<Value> {
        self.state.borrow().current.state.clone()
    }

    fn current_prefix(&self) -> Option<String> {
        self.base_path.clone()
    }

    fn can_go_back(&self) -> bool {
        !self.state.borrow().history.is_empty()
    }

    fn go_back(&self) {
        let moved = {
            let mut write = self.state.borrow_mut();
            match write.history.pop() {
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
                    write.history.push(old);
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
        // don't push the same route twice
        if write.current.route == route {
            write.current.state = state;
            return;
        }
        let old = std::mem::replace(&mut write.current, Entry::new(route, state));
        write.history.push(old);
        write.future.clear();
    }

    fn replace(&self, route: String, state: Option<Value>) {
        if route.starts_with("//") {
            error!(r#"cannot navigate to paths starting with "//", path: {route}"#);
            return;
        }

        self.state.borrow_mut().current = Entry::new(route, state);
    }

    fn updater(&self, callback: Updater) {
        *self.updater.borrow_mut() = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn counting(history: &MemoryHistory) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        history.updater(Arc::new(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        }));
        count
    }

    #[test]
    fn push_then_back_and_forward() {
        let history = MemoryHistory::default();
        history.push(String::from("/a"), None);
        history.push(String::from("/b"), None);
        assert_eq!(history.len(), 3);

        history.go_back();
        assert_eq!(history.current_route(), "/a");
        assert!(history.can_go_forward());

        history.go_back();
        assert_eq!(history.current_route(), "/");
        assert!(!history.can_go_back());

        history.go_forward();
        history.go_forward();
        assert_eq!(history.current_route(), "/b");
        assert!(!history.can_go_forward());
    }

    #[test]
    fn push_clears_future() {
        let history = MemoryHistory::default();
        history.push(String::from("/a"), None);
        history.go_back();
        history.push(String::from("/b"), None);

        assert!(!history.can_go_forward());
        history.go_back();
        assert_eq!(history.current_route(), "/");
    }

    #[test]
    fn same_route_is_not_pushed_twice() {
        let history = MemoryHistory::default();
        history.push(String::from("/a"), None);
        history.push(String::from("/a"), Some(json!({ "timestamp": 1 })));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current_state(), Some(json!({ "timestamp": 1 })));
    }

    #[test]
    fn state_travels_with_entries() {
        let history = MemoryHistory::default();
        history.push(String::from("/a"), Some(json!({ "from": "a" })));
        history.push(String::from("/b"), None);
        history.go_back();

        assert_eq!(history.current_state(), Some(json!({ "from": "a" })));
    }

    #[test]
    fn double_slash_paths_are_rejected() {
        let history = MemoryHistory::default();
        history.push(String::from("//evil.example"), None);
        history.replace(String::from("//evil.example"), None);

        assert_eq!(history.current_route(), "/");
        assert!(!history.can_go_back());
    }

    #[test]
    fn only_moves_notify() {
        let history = MemoryHistory::default();
        let count = counting(&history);

        history.push(String::from("/a"), None);
        history.replace(String::from("/b"), None);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        history.go_back();
        history.go_forward();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        // nothing left to go forward to
        history.go_forward();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
