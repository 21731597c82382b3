//! Types relating to navigation.

use url::Url;

use crate::error::{Result, RouteError};

// only used to resolve relative links, never shown
const RESOLUTION_BASE: &str = "http://wayfinder.invalid/";

/// A target for the router to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A location handled by the router.
    Internal(String),
    /// A location the router leaves to the host, like another origin or a `mailto:` link.
    External(String),
}

impl NavigationTarget {
    /// Returns `true` if the navigation target is [`External`].
    ///
    /// [`External`]: NavigationTarget::External
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(..))
    }
}

impl From<&str> for NavigationTarget {
    /// Anything that parses as an absolute URL, and protocol relative `//host` links, are
    /// external. Everything else is internal.
    fn from(value: &str) -> Self {
        if value.starts_with("//") || Url::parse(value).is_ok() {
            Self::External(value.to_string())
        } else {
            Self::Internal(value.to_string())
        }
    }
}

impl From<String> for NavigationTarget {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Split a location into the path used for matching and its query string.
///
/// Anything from the first `#` on is dropped.
///
/// ```rust
/// # use wayfinder_router::navigation::split_location;
/// assert_eq!(split_location("/users/7"), ("/users/7", None));
/// assert_eq!(split_location("/users/7?tab=info"), ("/users/7", Some("tab=info")));
/// assert_eq!(split_location("/users/7#bio"), ("/users/7", None));
/// ```
pub fn split_location(location: &str) -> (&str, Option<&str>) {
    let location = match location.split_once('#') {
        Some((before, _)) => before,
        None => location,
    };

    match location.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (location, None),
    }
}

/// Reject paths the router cannot dispatch: empty ones, relative ones and protocol relative ones.
pub(crate) fn validate_path(path: &str) -> Result<()> {
    if !path.starts_with('/') || path.starts_with("//") {
        return Err(RouteError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Turn an `href` carrying the history `prefix` into the route it points to.
///
/// The prefix is matched without its trailing `/`, so `/app` and `/app/` behave the same and a link
/// to the prefix itself is the root route. With a hash prefix (ending in `#`), bare `#route` links
/// are routes too. [`None`] if the `href` does not carry the prefix.
pub(crate) fn strip_history_prefix(prefix: &str, href: &str) -> Option<String> {
    let hash = prefix.ends_with('#');
    if hash {
        if let Some(fragment) = href.strip_prefix('#') {
            return Some(route_from_rest(fragment, true));
        }
    }

    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return None;
    }
    let rest = href.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') || hash {
        Some(route_from_rest(rest, hash))
    } else {
        // `/application` does not carry the prefix `/app`
        None
    }
}

fn route_from_rest(rest: &str, hash: bool) -> String {
    match rest {
        "" => String::from("/"),
        r if r.starts_with('/') => r.to_string(),
        r if hash => format!("/{r}"),
        r => r.to_string(),
    }
}

/// Resolve a relative `href` against the `current` path, the way a browser resolves link targets.
///
/// Absolute paths are returned untouched.
pub(crate) fn resolve_href(current: &str, href: &str) -> Option<String> {
    if href.starts_with('/') {
        return Some(href.to_string());
    }

    let joined = Url::parse(RESOLUTION_BASE).ok()?.join(current).ok()?.join(href).ok()?;
    let mut resolved = joined.path().to_string();
    if let Some(query) = joined.query() {
        resolved.push('?');
        resolved.push_str(query);
    }
    Some(resolved)
}
