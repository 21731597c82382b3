//! Client side routing for single page applications.
//!
//! A [`Router`] owns an ordered [`RouteTable`] of path patterns like `/users/:id`. Whenever the
//! location changes, because the application navigated, the user clicked a routed link, or the
//! host's history moved, the router finds the first matching route, extracts its parameters,
//! replaces its [`RouterState`] and invokes the route's callback. Paths without a route produce a
//! not-found state instead.
//!
//! The location itself lives in a [`History`] provider, see [`wayfinder_history`].
//!
//! ```rust
//! # use std::{cell::RefCell, rc::Rc};
//! # use wayfinder_router::prelude::*;
//! # fn main() -> wayfinder_router::Result<()> {
//! let shown = Rc::new(RefCell::new(String::new()));
//! let user = shown.clone();
//!
//! let table = RouteTable::new()
//!     .route(Route::new("/", |_| {})?.with_title("Home"))
//!     .route(Route::new("/users/:id", move |params| {
//!         *user.borrow_mut() = format!("user {}", params.get("id").unwrap_or_default());
//!     })?);
//!
//! let history = Rc::new(MemoryHistory::default());
//! let mut router = Router::new(table, history, RouterConfig::default());
//! router.start()?;
//!
//! router.intercept_click(&LinkClick::routed("/users/7"))?;
//! assert_eq!(*shown.borrow(), "user 7");
//!
//! router.go_back();
//! assert_eq!(router.state().breadcrumb, "Home");
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs)]

mod config;
mod error;
pub mod link;
pub mod navigation;
mod router;
pub mod segment;
mod state;
mod table;

pub use config::*;
pub use error::{Result, RouteError};
pub use router::{Router, Subscription};
pub use state::{Resolution, RouterState};
pub use table::{Route, RouteCallback, RouteMatch, RouteTable};

pub use wayfinder_history as history;

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::config::RouterConfig;
    pub use crate::link::{LinkClick, MouseButton};
    pub use crate::navigation::NavigationTarget;
    pub use crate::router::{Router, Subscription};
    pub use crate::segment::{Parameters, Pattern};
    pub use crate::state::{Resolution, RouterState};
    pub use crate::table::{Route, RouteTable};
    pub use wayfinder_history::{HashHistory, History, MemoryHistory};
}
