/// A specialized [`Result`](std::result::Result) for router operations.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors reported by the router for caller mistakes.
///
/// A path that matches no route is **not** an error. It resolves to the not-found state.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The pattern was an empty string.
    #[error("route pattern is empty")]
    EmptyPattern,

    /// The pattern does not start with `/`.
    #[error(r#"route pattern "{pattern}" must start with "/""#)]
    MissingLeadingSlash {
        /// The offending pattern.
        pattern: String,
    },

    /// A segment consists of the parameter sigil only.
    #[error(r#"route pattern "{pattern}" has a parameter without a name in segment {index}"#)]
    EmptyParameterName {
        /// The offending pattern.
        pattern: String,
        /// Position of the segment, counting the empty segment before the leading `/`.
        index: usize,
    },

    /// The parameter sigil appears somewhere other than the start of a segment.
    #[error(r#"route pattern "{pattern}" has a misplaced ":" in segment "{segment}""#)]
    MisplacedSigil {
        /// The offending pattern.
        pattern: String,
        /// The segment holding the sigil.
        segment: String,
    },

    /// Two parameter segments share a name.
    #[error(r#"route pattern "{pattern}" binds parameter "{name}" more than once"#)]
    DuplicateParameter {
        /// The offending pattern.
        pattern: String,
        /// The repeated parameter name.
        name: String,
    },

    /// A path handed to the router is empty, relative or protocol relative.
    #[error(r#"cannot route to "{path}": paths must start with a single "/""#)]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// No registered route carries the requested page identifier.
    #[error(r#"no route is registered for page "{page}""#)]
    UnknownPage {
        /// The requested page identifier.
        page: String,
    },

    /// A path was requested for a route without providing all of its parameters.
    #[error(r#"no value for parameter "{name}" of route "{pattern}""#)]
    MissingParameter {
        /// Pattern of the route.
        pattern: String,
        /// The parameter without a value.
        name: String,
    },
}
