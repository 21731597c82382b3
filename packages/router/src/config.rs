use std::{fmt, rc::Rc};

use crate::state::RouterState;

/// The page identifier used when no route matches, unless configured otherwise.
pub const DEFAULT_NOT_FOUND_PAGE: &str = "not-found";

/// The breadcrumb used when no route matches, unless configured otherwise.
pub const DEFAULT_NOT_FOUND_TITLE: &str = "Page not found";

/// A function to be called whenever the routing is updated.
pub type UpdateCallback = Rc<dyn Fn(&RouterState)>;

/// Global configuration options for the router.
///
/// This implements [`Default`] and follows the builder pattern, so you can use it like this:
/// ```rust
/// # use wayfinder_router::prelude::*;
/// let cfg = RouterConfig::default()
///     .not_found_page("missing")
///     .not_found_title("Nothing here")
///     .on_update(|state| println!("now at {}", state.path));
/// ```
#[derive(Clone)]
pub struct RouterConfig {
    pub(crate) not_found_page: String,
    pub(crate) not_found_title: String,
    pub(crate) on_update: Option<UpdateCallback>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            not_found_page: DEFAULT_NOT_FOUND_PAGE.to_string(),
            not_found_title: DEFAULT_NOT_FOUND_TITLE.to_string(),
            on_update: None,
        }
    }
}

impl RouterConfig {
    /// The page identifier handed to the rendering layer when no route matches.
    ///
    /// Defaults to [`DEFAULT_NOT_FOUND_PAGE`].
    pub fn not_found_page(self, page: impl Into<String>) -> Self {
        Self {
            not_found_page: page.into(),
            ..self
        }
    }

    /// The breadcrumb shown when no route matches.
    ///
    /// Defaults to [`DEFAULT_NOT_FOUND_TITLE`].
    pub fn not_found_title(self, title: impl Into<String>) -> Self {
        Self {
            not_found_title: title.into(),
            ..self
        }
    }

    /// A function to be called whenever the routing is updated.
    ///
    /// The callback is invoked after the matched route's callback, but before subscribers are
    /// notified. It is called exactly once per dispatch, including not-found dispatches.
    ///
    /// Defaults to [`None`].
    pub fn on_update(self, callback: impl Fn(&RouterState) + 'static) -> Self {
        Self {
            on_update: Some(Rc::new(callback)),
            ..self
        }
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("not_found_page", &self.not_found_page)
            .field("not_found_title", &self.not_found_title)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}
