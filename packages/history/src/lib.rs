//! History Integration
//!
//! The wayfinder router relies on so-called [`History`] providers to store the current location, and
//! possibly a history (i.e. a browsers back button) and future (i.e. a browsers forward button).
//!
//! To integrate the router with any kind of host history, all you have to do is implement the
//! [`History`] trait. This crate comes with two in-process implementations:
//! - [`MemoryHistory`] keeps everything in memory, like the History API of a browser would.
//! - [`HashHistory`] keeps the route in the fragment of a full URL, like hash based routing does.
#![warn(missing_docs)]

use std::sync::Arc;

use serde_json::Value;

mod hash;
mod memory;

pub use hash::*;
pub use memory::*;

/// The callback a [`History`] invokes when the location changes from outside the router.
pub type Updater = Arc<dyn Fn() + Send + Sync>;

/// An integration with some kind of navigation history.
///
/// Depending on your use case, your implementation may deviate from the described procedure. This
/// is fine, as long as `current_route` matches the described format.
///
/// However, you should document all deviations. Also, make sure the navigation is user-friendly.
/// The described behaviors are designed to mimic a web browser, which most users should already
/// know. Deviations might confuse them.
///
/// All methods take `&self`. Implementations are shared between the router and the host and use
/// interior mutability.
pub trait History {
    /// Get the route of the current location.
    ///
    /// **Must start** with `/`. **Must _not_ contain** the prefix.
    ///
    /// ```rust
    /// # use wayfinder_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// assert_eq!(history.current_route(), "/");
    ///
    /// history.push(String::from("/path"), None);
    /// assert_eq!(history.current_route(), "/path");
    /// ```
    #[must_use]
    fn current_route(&self) -> String;

    /// Get the state payload stored with the current entry, if any.
    #[must_use]
    fn current_state(&self) -> Option<Value> {
        None
    }

    /// Get the current path prefix.
    ///
    /// Not all [`History`]s need a prefix feature. It is meant for environments where a routed
    /// application is not running on `/`. The [`History`] is responsible for removing the prefix
    /// from the route, and also for adding it back in during navigation.
    #[must_use]
    fn current_prefix(&self) -> Option<String> {
        None
    }

    /// The full path of the current location, including the prefix.
    #[must_use]
    fn full_route_path(&self) -> String {
        match self.current_prefix() {
            Some(prefix) => format!("{}{}", prefix.trim_end_matches('/'), self.current_route()),
            None => self.current_route(),
        }
    }

    /// Check whether there is a previous page to navigate back to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    ///
    /// ```rust
    /// # use wayfinder_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// assert_eq!(history.can_go_back(), false);
    ///
    /// history.push(String::from("/some-other-page"), None);
    /// assert_eq!(history.can_go_back(), true);
    /// ```
    #[must_use]
    fn can_go_back(&self) -> bool {
        true
    }

    /// Go back to a previous page.
    ///
    /// If a [`History`] cannot go to a previous page, it should do nothing. This method might be
    /// called, even if `can_go_back` returns [`false`].
    ///
    /// A successful move **must** be reported through the [`Updater`], exactly like a browser fires
    /// `popstate` for its back button.
    fn go_back(&self);

    /// Check whether there is a future page to navigate forward to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_forward(&self) -> bool {
        true
    }

    /// Go forward to a future page.
    ///
    /// This is the inverse of [`History::go_back`] and reports a successful move the same way.
    fn go_forward(&self);

    /// Go to another page.
    ///
    /// This should do three things:
    /// 1. Make `route` the current location, storing `state` with it.
    /// 2. Add the previous location to the navigation history.
    /// 3. Clear the navigation future.
    ///
    /// Pushing does **not** invoke the [`Updater`]: the caller already knows where it is going.
    fn push(&self, route: String, state: Option<Value>);

    /// Replace the current page with another one.
    ///
    /// In contrast to [`History::push`], the navigation history and future stay untouched.
    ///
    /// ```rust
    /// # use wayfinder_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// history.replace(String::from("/some-other-page"), None);
    /// assert_eq!(history.current_route(), "/some-other-page");
    /// assert!(!history.can_go_back());
    /// ```
    fn replace(&self, route: String, state: Option<Value>);

    /// Provide the [`History`] with an update callback.
    ///
    /// Some [`History`]s receive location changes from outside the router (back and forward
    /// buttons, a user editing the address bar). When such changes happen, they should call
    /// `callback`, which will cause the router to update.
    #[allow(unused_variables)]
    fn updater(&self, callback: Updater) {}
}
