//! Route definitions and the ordered table they are registered in.

use std::{fmt, rc::Rc};

use tracing::debug;

use crate::{
    error::Result,
    segment::{Parameters, Pattern},
};

/// The function a [`Route`] invokes when it is dispatched.
pub type RouteCallback = Rc<dyn Fn(&Parameters)>;

/// A registered routing rule.
///
/// Every route carries a page identifier for the rendering layer. Unless set with
/// [`Route::with_page`], it is the pattern string itself.
///
/// ```rust
/// # use wayfinder_router::prelude::*;
/// let route = Route::new("/users/:id", |params| {
///     println!("showing user {:?}", params.get("id"));
/// })
/// .unwrap()
/// .with_title("User")
/// .with_page("user-detail");
///
/// assert_eq!(route.page(), "user-detail");
/// assert_eq!(route.title(), Some("User"));
/// ```
#[derive(Clone)]
pub struct Route {
    pattern: Pattern,
    callback: RouteCallback,
    title: Option<String>,
    page: String,
}

impl Route {
    /// Create a route, validating its `pattern`.
    pub fn new(pattern: &str, callback: impl Fn(&Parameters) + 'static) -> Result<Self> {
        let pattern = Pattern::parse(pattern)?;
        Ok(Self {
            page: pattern.as_str().to_string(),
            pattern,
            callback: Rc::new(callback),
            title: None,
        })
    }

    /// Set a human readable title, used for breadcrumbs.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page identifier handed to the rendering layer.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = page.into();
        self
    }

    /// The pattern of this route.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The title of this route, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The page identifier of this route.
    pub fn page(&self) -> &str {
        &self.page
    }

    pub(crate) fn callback(&self) -> RouteCallback {
        self.callback.clone()
    }
}

// the callback doesn't implement Debug
impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("title", &self.title)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}

/// A successful match of a path against a [`RouteTable`].
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// The first registered route whose pattern matched.
    pub route: &'a Route,
    /// The parameters bound by the pattern.
    pub params: Parameters,
}

/// An ordered collection of [`Route`]s.
///
/// Registration order is significant: the first route that matches a path wins. There is no
/// specificity scoring and no deduplication, so register specific patterns before general ones.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty [`RouteTable`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route to the end of the table.
    pub fn add(&mut self, route: Route) {
        debug!(
            pattern = route.pattern.as_str(),
            page = route.page.as_str(),
            position = self.routes.len(),
            "registered route"
        );
        self.routes.push(route);
    }

    /// Add a route to the end of the table, builder style.
    ///
    /// ```rust
    /// # use wayfinder_router::prelude::*;
    /// # fn main() -> wayfinder_router::Result<()> {
    /// let table = RouteTable::new()
    ///     .route(Route::new("/", |_| {})?)
    ///     .route(Route::new("/about", |_| {})?);
    /// assert_eq!(table.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn route(mut self, route: Route) -> Self {
        self.add(route);
        self
    }

    /// The number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over the routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Find the first route with the page identifier `page`.
    pub fn find_page(&self, page: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.page == page)
    }

    /// Find the first registered route matching `path`.
    ///
    /// [`None`] is the not-found outcome, it is not an error.
    pub fn match_route(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .match_path(path)
                .map(|params| RouteMatch { route, params })
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn noop(pattern: &str) -> Route {
        Route::new(pattern, |_| {}).unwrap()
    }

    fn table(patterns: &[&str]) -> RouteTable {
        patterns
            .iter()
            .fold(RouteTable::new(), |table, p| table.route(noop(p)))
    }

    #[test]
    fn matches_static_and_dynamic_routes() {
        let table = table(&["/", "/about", "/users/:id"]);

        let found = table.match_route("/users/123").unwrap();
        assert_eq!(found.route.pattern().as_str(), "/users/:id");
        assert_eq!(found.params.get("id"), Some("123"));

        let found = table.match_route("/").unwrap();
        assert_eq!(found.route.pattern().as_str(), "/");
        assert!(found.params.is_empty());

        assert!(table.match_route("/contact").is_none());
    }

    #[test]
    fn segment_count_mismatch_is_not_found() {
        let table = table(&["/", "/about", "/users/:id"]);

        assert!(table.match_route("/users").is_none());
        assert!(table.match_route("/users/1/posts").is_none());
        assert!(table.match_route("/about/").is_none());
    }

    #[test]
    fn parameter_route_registered_first_wins() {
        let table = table(&["/a/:x", "/a/b"]);

        let found = table.match_route("/a/b").unwrap();
        assert_eq!(found.route.pattern().as_str(), "/a/:x");
        assert_eq!(found.params.get("x"), Some("b"));
    }

    #[test]
    fn literal_route_registered_first_wins() {
        let table = table(&["/users/active", "/users/:id"]);

        let found = table.match_route("/users/active").unwrap();
        assert_eq!(found.route.pattern().as_str(), "/users/active");
        assert!(found.params.is_empty());

        let found = table.match_route("/users/7").unwrap();
        assert_eq!(found.route.pattern().as_str(), "/users/:id");
    }

    #[test]
    fn duplicate_patterns_are_kept_in_order() {
        let table = RouteTable::new()
            .route(noop("/").with_page("first"))
            .route(noop("/").with_page("second"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.match_route("/").unwrap().route.page(), "first");
    }

    #[test]
    fn page_defaults_to_pattern() {
        let table = table(&["/users/:id"]);
        assert!(table.find_page("/users/:id").is_some());
        assert!(table.find_page("users").is_none());
    }
}
