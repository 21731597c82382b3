use std::{
    rc::{Rc, Weak},
    sync::Arc,
};

use futures_channel::mpsc::{unbounded, UnboundedReceiver};
use serde_json::Value;
use tracing::{debug, info, warn};
use wayfinder_history::History;

use crate::{
    config::RouterConfig,
    error::{Result, RouteError},
    link::LinkClick,
    navigation::{
        resolve_href, split_location, strip_history_prefix, validate_path, NavigationTarget,
    },
    segment::Parameters,
    state::{Resolution, RouterState},
    table::{Route, RouteMatch, RouteTable},
};

/// A set of messages the [`Router`] receives from outside.
#[derive(Debug)]
pub(crate) enum RouterMessage {
    /// The history moved without the router asking for it.
    Update,
}

type Subscriber = dyn Fn(&RouterState);

/// Keeps a [`Router::subscribe`] callback registered. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Rc<Subscriber>,
}

/// The core of the router.
///
/// This combines a [`RouteTable`] and a [`History`] to find which route is active for the current
/// location. It invokes the active route's callback and informs subscribers whenever the current
/// route changes.
///
/// ```rust
/// # use std::rc::Rc;
/// # use wayfinder_router::prelude::*;
/// # fn main() -> wayfinder_router::Result<()> {
/// let table = RouteTable::new()
///     .route(Route::new("/", |_| {})?.with_title("Home"))
///     .route(Route::new("/users/:id", |params| {
///         println!("user {:?}", params.get("id"));
///     })?);
///
/// let mut router = Router::new(table, Rc::new(MemoryHistory::default()), RouterConfig::default());
/// router.start()?;
/// assert_eq!(router.state().breadcrumb, "Home");
///
/// router.navigate("/users/42", None)?;
/// assert_eq!(router.state().pattern(), Some("/users/:id"));
/// assert_eq!(router.state().parameters.get("id"), Some("42"));
///
/// router.navigate("/contact", None)?;
/// assert!(router.state().is_not_found());
/// # Ok(())
/// # }
/// ```
pub struct Router {
    config: RouterConfig,
    history: Rc<dyn History>,
    rx: UnboundedReceiver<RouterMessage>,
    state: RouterState,
    subscribers: Vec<Weak<Subscriber>>,
    table: RouteTable,
}

impl Router {
    /// Create a new [`Router`].
    ///
    /// The router registers itself with the `history` to learn about foreign navigation (back and
    /// forward buttons, address bar edits). Nothing is dispatched until [`Router::start`] or a
    /// navigation is called.
    #[must_use]
    pub fn new(table: RouteTable, history: Rc<dyn History>, config: RouterConfig) -> Self {
        let (tx, rx) = unbounded();
        history.updater(Arc::new(move || {
            tx.unbounded_send(RouterMessage::Update).ok();
        }));

        Self {
            config,
            history,
            rx,
            state: RouterState::default(),
            subscribers: Vec::new(),
            table,
        }
    }

    /// Add a route to the end of the route table.
    ///
    /// Routes added after a dispatch only take part in later dispatches.
    pub fn add_route(&mut self, route: Route) -> &mut Self {
        self.table.add(route);
        self
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// The history the router navigates with.
    pub fn history(&self) -> &Rc<dyn History> {
        &self.history
    }

    /// The current routing information.
    pub fn state(&self) -> &RouterState {
        &self.state
    }

    /// Find the first registered route matching `path`.
    ///
    /// `path` is matched as is; it must not contain a query string. [`None`] means not found.
    pub fn match_route(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.table.match_route(path)
    }

    /// Dispatch the current location of the history.
    pub fn start(&mut self) -> Result<()> {
        // anything queued before the start is covered by this dispatch
        while let Ok(Some(_)) = self.rx.try_next() {}

        let current = self.history.current_route();
        self.handle_route(&current)
    }

    /// Resolve `path` and dispatch the result.
    ///
    /// On a match, the state is replaced, the route's callback is invoked with the extracted
    /// parameters, and the `on_update` hook and subscribers are informed. Without a match, the
    /// state becomes the not-found state and the hook and subscribers are informed as well. Not
    /// finding a route is not an error.
    ///
    /// # Errors
    /// [`RouteError::InvalidPath`] if `path` does not start with `/`. Nothing changes in that case.
    pub fn handle_route(&mut self, path: &str) -> Result<()> {
        validate_path(path)?;
        let (pathname, query) = split_location(path);
        debug!(path, "resolving route");

        let (state, callback) = match self.table.match_route(pathname) {
            Some(RouteMatch { route, params }) => {
                info!(path, pattern = %route.pattern(), page = route.page(), "route matched");
                let state = RouterState {
                    resolution: Resolution::Matched {
                        pattern: route.pattern().to_string(),
                        title: route.title().map(str::to_string),
                    },
                    path: path.to_string(),
                    query: query.map(str::to_string),
                    parameters: params,
                    page: route.page().to_string(),
                    breadcrumb: route.title().unwrap_or(pathname).to_string(),
                    can_go_back: self.history.can_go_back(),
                    can_go_forward: self.history.can_go_forward(),
                    history_state: self.history.current_state(),
                };
                (state, Some(route.callback()))
            }
            None => {
                warn!(path, "no route matched");
                let state = RouterState {
                    resolution: Resolution::NotFound,
                    path: path.to_string(),
                    query: query.map(str::to_string),
                    parameters: Parameters::default(),
                    page: self.config.not_found_page.clone(),
                    breadcrumb: self.config.not_found_title.clone(),
                    can_go_back: self.history.can_go_back(),
                    can_go_forward: self.history.can_go_forward(),
                    history_state: self.history.current_state(),
                };
                (state, None)
            }
        };

        self.state = state;
        if let Some(callback) = callback {
            callback(&self.state.parameters);
        }
        if let Some(on_update) = &self.config.on_update {
            on_update(&self.state);
        }
        self.update_subscribers();

        Ok(())
    }

    /// Go to `path`, adding a new history entry with the optional `state` payload.
    ///
    /// Pushing to the history does not notify the router, so the new location is dispatched right
    /// away.
    ///
    /// # Errors
    /// [`RouteError::InvalidPath`] if `path` does not start with `/`. The history is left alone.
    pub fn navigate(&mut self, path: &str, state: Option<Value>) -> Result<()> {
        validate_path(path)?;
        debug!(path, "pushing history entry");
        self.history.push(path.to_string(), state);
        self.handle_route(path)
    }

    /// Go to `path`, replacing the current history entry.
    ///
    /// # Errors
    /// [`RouteError::InvalidPath`] if `path` does not start with `/`. The history is left alone.
    pub fn replace(&mut self, path: &str, state: Option<Value>) -> Result<()> {
        validate_path(path)?;
        debug!(path, "replacing history entry");
        self.history.replace(path.to_string(), state);
        self.handle_route(path)
    }

    /// Go back to the previous location, if there is one.
    ///
    /// Returns the number of dispatches this caused.
    pub fn go_back(&mut self) -> usize {
        self.history.go_back();
        self.handle_history_events()
    }

    /// Go forward to the next location, if there is one.
    ///
    /// Returns the number of dispatches this caused.
    pub fn go_forward(&mut self) -> usize {
        self.history.go_forward();
        self.handle_history_events()
    }

    /// Dispatch the current history location once for every change the history reported.
    ///
    /// Hosts call this after their history fired (e.g. from a `popstate` listener). Returns the
    /// number of dispatches. A location the router cannot dispatch is logged and skipped, the
    /// remaining changes are still handled.
    pub fn handle_history_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(Some(RouterMessage::Update)) = self.rx.try_next() {
            let current = self.history.current_route();
            debug!(path = current.as_str(), "history moved");
            match self.handle_route(&current) {
                Ok(()) => handled += 1,
                Err(err) => warn!(%err, "skipping history location"),
            }
        }
        handled
    }

    /// Take over a link click if it is meant for the router.
    ///
    /// Returns [`true`] if the router navigated, in which case the host must prevent the default
    /// action of the click. Relative links are resolved against the current path, links carrying
    /// the history's prefix have it removed, and external links are left to the host.
    pub fn intercept_click(&mut self, click: &LinkClick) -> Result<bool> {
        let Some(href) = click.intercept_target() else {
            return Ok(false);
        };

        let href = match NavigationTarget::from(href) {
            NavigationTarget::Internal(href) => href,
            NavigationTarget::External(url) => {
                debug!(url = url.as_str(), "leaving external link to the host");
                return Ok(false);
            }
        };

        let href = match self.history.current_prefix() {
            Some(prefix) if !prefix.is_empty() => {
                strip_history_prefix(&prefix, &href).unwrap_or(href)
            }
            _ => href,
        };

        let Some(path) = resolve_href(self.state.pathname(), &href) else {
            debug!(href = href.as_str(), "cannot resolve link target");
            return Ok(false);
        };

        self.navigate(&path, None)?;
        Ok(true)
    }

    /// Build the `href` of the route with the page identifier `page`.
    ///
    /// The history's prefix is prepended, so the result can be used as a link target.
    ///
    /// # Errors
    /// - [`RouteError::UnknownPage`] if no route carries `page`.
    /// - [`RouteError::MissingParameter`] if a parameter of the route is missing in `parameters`.
    pub fn href(&self, page: &str, parameters: &[(&str, &str)]) -> Result<String> {
        let route = self
            .table
            .find_page(page)
            .ok_or_else(|| RouteError::UnknownPage {
                page: page.to_string(),
            })?;
        let path = route.pattern().format(parameters)?;

        Ok(match self.history.current_prefix() {
            Some(prefix) => format!("{}{path}", prefix.trim_end_matches('/')),
            None => path,
        })
    }

    /// Subscribe to routing updates.
    ///
    /// `callback` is invoked with the current state right away, and after every dispatch until the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe(&mut self, callback: impl Fn(&RouterState) + 'static) -> Subscription {
        let callback: Rc<Subscriber> = Rc::new(callback);
        callback(&self.state);
        self.subscribers.push(Rc::downgrade(&callback));
        Subscription {
            _callback: callback,
        }
    }

    /// Inform all subscribers of the current state.
    ///
    /// Also sorts out the subscriptions that have been dropped since the last update.
    fn update_subscribers(&mut self) {
        let state = &self.state;
        self.subscribers.retain(|s| match s.upgrade() {
            Some(s) => {
                s(state);
                true
            }
            None => false,
        });
    }
}
