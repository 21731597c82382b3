//! Route patterns and the segments they are made of.
//!
//! A segment refers to the value between two `/` in a path. Paths and patterns are split with the
//! same convention: `/` is `["", ""]`, `/blog/1` is `["", "blog", "1"]` and `/blog/` is
//! `["", "blog", ""]`. Trailing slashes are therefore significant.

use std::{fmt, str::FromStr};

use serde::{ser::SerializeMap, Serialize, Serializer};
use urlencoding::encode;

use crate::error::{Result, RouteError};

/// Marks a pattern segment as a parameter.
pub const PARAMETER_SIGIL: char = ':';

/// One segment of a [`Pattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Matches a path segment that is exactly equal to the wrapped string.
    Fixed(String),
    /// Matches any path segment and binds it to the wrapped name.
    Parameter(String),
}

impl Segment {
    fn parse(pattern: &str, index: usize, raw: &str) -> Result<Self> {
        let Some(name) = raw.strip_prefix(PARAMETER_SIGIL) else {
            if raw.contains(PARAMETER_SIGIL) {
                return Err(RouteError::MisplacedSigil {
                    pattern: pattern.to_string(),
                    segment: raw.to_string(),
                });
            }
            return Ok(Self::Fixed(raw.to_string()));
        };

        if name.is_empty() {
            return Err(RouteError::EmptyParameterName {
                pattern: pattern.to_string(),
                index,
            });
        }
        if name.contains(PARAMETER_SIGIL) {
            return Err(RouteError::MisplacedSigil {
                pattern: pattern.to_string(),
                segment: raw.to_string(),
            });
        }

        Ok(Self::Parameter(name.to_string()))
    }
}

/// A parsed route pattern such as `/users/:id`.
///
/// Patterns are immutable once parsed and always have a fixed number of segments. There are no
/// optional, wildcard or catch-all segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern.
    ///
    /// ```rust
    /// # use wayfinder_router::segment::{Pattern, Segment};
    /// let pattern = Pattern::parse("/users/:id").unwrap();
    /// assert_eq!(
    ///     pattern.segments(),
    ///     &[
    ///         Segment::Fixed(String::new()),
    ///         Segment::Fixed(String::from("users")),
    ///         Segment::Parameter(String::from("id")),
    ///     ]
    /// );
    ///
    /// assert!(Pattern::parse("users/:id").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(RouteError::EmptyPattern);
        }
        if !raw.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash {
                pattern: raw.to_string(),
            });
        }

        let mut segments: Vec<Segment> = Vec::new();
        for (index, part) in raw.split('/').enumerate() {
            let segment = Segment::parse(raw, index, part)?;
            if let Segment::Parameter(name) = &segment {
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Parameter(other) if other == name))
                {
                    return Err(RouteError::DuplicateParameter {
                        pattern: raw.to_string(),
                        name: name.clone(),
                    });
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as it was registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The segments of the pattern, including the empty one in front of the leading `/`.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The names of all parameter segments, in order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Parameter(name) => Some(name.as_str()),
            Segment::Fixed(_) => None,
        })
    }

    /// Match `path` against this pattern.
    ///
    /// Returns [`None`] if the segment counts differ or a fixed segment differs. Otherwise all
    /// parameter segments are bound to the raw path segments at the same positions. Values are
    /// neither validated nor decoded.
    ///
    /// ```rust
    /// # use wayfinder_router::segment::Pattern;
    /// let pattern = Pattern::parse("/products/:category/:id").unwrap();
    ///
    /// let params = pattern.match_path("/products/electronics/456").unwrap();
    /// assert_eq!(params.get("category"), Some("electronics"));
    /// assert_eq!(params.get("id"), Some("456"));
    ///
    /// assert!(pattern.match_path("/products/electronics").is_none());
    /// ```
    pub fn match_path(&self, path: &str) -> Option<Parameters> {
        if path.split('/').count() != self.segments.len() {
            return None;
        }

        let mut parameters = Parameters::default();
        for (segment, value) in self.segments.iter().zip(path.split('/')) {
            match segment {
                Segment::Parameter(name) => parameters.push(name.clone(), value.to_string()),
                Segment::Fixed(fixed) if fixed == value => {}
                Segment::Fixed(_) => return None,
            }
        }

        Some(parameters)
    }

    /// Build a path for this pattern by filling in its parameters.
    ///
    /// Values are percent-encoded, so a value can never introduce new segments.
    ///
    /// ```rust
    /// # use wayfinder_router::segment::Pattern;
    /// let pattern = Pattern::parse("/users/:id").unwrap();
    /// assert_eq!(pattern.format(&[("id", "42")]).unwrap(), "/users/42");
    /// assert_eq!(pattern.format(&[("id", "a/b")]).unwrap(), "/users/a%2Fb");
    /// assert!(pattern.format(&[]).is_err());
    /// ```
    pub fn format(&self, parameters: &[(&str, &str)]) -> Result<String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Fixed(fixed) => parts.push(fixed.clone()),
                Segment::Parameter(name) => {
                    let (_, value) = parameters
                        .iter()
                        .find(|(k, _)| *k == name.as_str())
                        .ok_or_else(|| RouteError::MissingParameter {
                            pattern: self.raw.clone(),
                            name: name.clone(),
                        })?;
                    parts.push(encode(value).into_owned());
                }
            }
        }

        Ok(parts.join("/"))
    }
}

impl FromStr for Pattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The parameters extracted from a path, in the order they appear in the pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    /// Get the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over all `(name, value)` pairs in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of bound parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters were bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, name: String, value: String) {
        self.0.push((name, value));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// serialized as a map, keeping encounter order
impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
