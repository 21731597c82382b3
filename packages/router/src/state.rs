use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::{navigation::split_location, segment::Parameters};

/// How the current path was resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Nothing has been dispatched yet.
    #[default]
    Unresolved,
    /// A registered route matched.
    Matched {
        /// The pattern of the matched route.
        pattern: String,
        /// The title of the matched route.
        title: Option<String>,
    },
    /// No registered route matched.
    NotFound,
}

/// The current routing information.
///
/// A new [`RouterState`] is built by every dispatch and replaces the previous one as a whole.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RouterState {
    /// How the current path was resolved.
    pub resolution: Resolution,

    /// The path that was dispatched, exactly as the router received it.
    pub path: String,

    /// The query string of the dispatched path, if present.
    pub query: Option<String>,

    /// The parameters read from the path by the matched route.
    pub parameters: Parameters,

    /// The page the rendering layer should show.
    ///
    /// This is the matched route's page identifier, or the configured not-found page.
    pub page: String,

    /// The text to show as breadcrumb: the route title, the path for untitled routes, or the
    /// configured not-found title.
    pub breadcrumb: String,

    /// Whether there is a prior path to go back to.
    ///
    /// This might be [`true`] even if there isn't.
    pub can_go_back: bool,

    /// Whether there is a later path to forward to.
    ///
    /// This might be [`true`] even if there isn't.
    pub can_go_forward: bool,

    /// The state payload stored with the current history entry.
    pub history_state: Option<Value>,
}

impl RouterState {
    /// The pattern of the matched route, [`None`] when nothing matched.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Matched { pattern, .. } => Some(pattern.as_str()),
            _ => None,
        }
    }

    /// Whether the last dispatch found no route.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.resolution == Resolution::NotFound
    }

    /// The dispatched path without its query string.
    #[must_use]
    pub fn pathname(&self) -> &str {
        split_location(&self.path).0
    }

    /// Checks if a link to `href` should be shown as active.
    ///
    /// If `exact` is [`true`], the current path must match `href` exactly.
    ///
    /// If `exact` is [`false`] and `href` is absolute (starts with `/`), the current path must
    /// equal `href` or continue it with further segments. `/` is only active for `/` itself.
    ///
    /// Otherwise, the last segment of the current path must match `href`.
    ///
    /// The query is ignored. Nothing is active while the state is unresolved.
    #[must_use]
    pub fn is_active(&self, href: &str, exact: bool) -> bool {
        if self.resolution == Resolution::Unresolved {
            return false;
        }

        let path = self.pathname();
        let href = split_location(href).0;

        if exact || href == "/" {
            return path == href;
        }

        // absolute path
        if href.starts_with('/') {
            return match path.strip_prefix(href) {
                Some(rest) => rest.is_empty() || rest.starts_with('/') || href.ends_with('/'),
                None => false,
            };
        }

        // relative path
        match path.rsplit_once('/') {
            Some((_, segment)) => segment == href,
            None => false,
        }
    }

    /// Get the query parameters as a [`BTreeMap`].
    ///
    /// Later values win for repeated keys.
    #[must_use]
    pub fn query_params(&self) -> Option<BTreeMap<String, String>> {
        self.query.as_ref().map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn is_active_path_exact() {
        let state = test_state();

        assert!(state.is_active("/users/42/posts", true));
        assert!(!state.is_active("/users/42", true));
        assert!(!state.is_active("users/42/posts", true));
    }

    #[test]
    fn is_active_path_absolute() {
        let state = test_state();

        assert!(state.is_active("/users", false));
        assert!(state.is_active("/users/42", false));
        assert!(state.is_active("/users/42/posts", false));
        assert!(!state.is_active("/use", false));
        assert!(!state.is_active("/about", false));
    }

    #[test]
    fn is_active_root_only_for_root() {
        let state = test_state();
        assert!(!state.is_active("/", false));

        let root = RouterState {
            path: String::from("/"),
            ..test_state()
        };
        assert!(root.is_active("/", false));
        assert!(root.is_active("/", true));
    }

    #[test]
    fn is_active_path_relative() {
        let state = test_state();

        assert!(state.is_active("posts", false));
        assert!(!state.is_active("users", false));
    }

    #[test]
    fn is_active_ignores_query() {
        let state = RouterState {
            path: String::from("/users?page=2"),
            query: Some(String::from("page=2")),
            ..test_state()
        };

        assert!(state.is_active("/users", true));
        assert!(state.is_active("/users?page=3", true));
    }

    #[test]
    fn nothing_is_active_before_dispatch() {
        let state = RouterState::default();
        assert!(!state.is_active("/", true));
        assert!(!state.is_active("/", false));
    }

    #[test]
    fn query_params() {
        let state = RouterState {
            query: Some(String::from("tab=info&q=hello%20world")),
            ..test_state()
        };

        let params = state.query_params().unwrap();
        assert_eq!(params.get("tab").map(String::as_str), Some("info"));
        assert_eq!(params.get("q").map(String::as_str), Some("hello world"));
        assert_eq!(test_state().query_params(), None);
    }

    #[test]
    fn serializes_for_renderers() {
        let value = serde_json::to_value(test_state()).unwrap();

        assert_eq!(value["resolution"]["kind"], "matched");
        assert_eq!(value["resolution"]["pattern"], "/users/:id/posts");
        assert_eq!(value["parameters"]["id"], "42");
        assert_eq!(value["page"], "user-posts");
    }

    fn test_state() -> RouterState {
        RouterState {
            resolution: Resolution::Matched {
                pattern: String::from("/users/:id/posts"),
                title: Some(String::from("Posts")),
            },
            path: String::from("/users/42/posts"),
            query: None,
            parameters: [("id", "42")].into_iter().collect(),
            page: String::from("user-posts"),
            breadcrumb: String::from("Posts"),
            can_go_back: false,
            can_go_forward: false,
            history_state: None,
        }
    }
}
