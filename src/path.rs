//! Structured URL paths.
//!
//! Route prefixes are kept as an ordered list of [`Segment`]s rather than a
//! string, so the resolver can append and remove whole segments without the
//! substring pitfalls of splicing text. A path renders with the `:name`
//! parameter syntax used by the route target:
//!
//! ```rust
//! use restree::UrlPath;
//!
//! let p = UrlPath::parse("/api/")
//!     .with_literal("parents")
//!     .with_param("parent_id");
//! assert_eq!(p.to_string(), "/api/parents/:parent_id");
//! ```
//!
//! Parsing is also where prefix normalization happens: repeated slashes
//! collapse, trailing slashes drop, and the bare root becomes the empty
//! path. Because normalization is structural, applying it twice can never
//! produce a different result than applying it once.

use std::fmt;

/// One URL path segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// A fixed path component, e.g. `parents`.
    Literal(String),
    /// A named parameter, rendered as `:name`.
    Param(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::Param(s) => write!(f, ":{s}"),
        }
    }
}

/// An ordered sequence of path segments.
///
/// The empty path renders as `""`, anything else as `/seg/seg/…`. Route
/// URLs are built by extending a prefix path with the segments a route
/// spec contributes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UrlPath {
    segments: Vec<Segment>,
}

impl UrlPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses and normalizes a path string.
    ///
    /// Empty components are discarded, so `"/api/"`, `"api"` and `"///api//"`
    /// all parse to the same single-segment path. Components starting with
    /// `:` become parameters.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_owned()),
                None => Segment::Literal(s.to_owned()),
            })
            .collect();
        Self { segments }
    }

    /// Returns a copy of this path with a literal segment appended.
    pub fn with_literal(&self, name: &str) -> Self {
        self.extended(Segment::Literal(name.to_owned()))
    }

    /// Returns a copy of this path with a parameter segment appended.
    pub fn with_param(&self, name: &str) -> Self {
        self.extended(Segment::Param(name.to_owned()))
    }

    fn extended(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Removes the trailing literal + parameter pair, if present.
    ///
    /// Descending into a resource directory appends exactly such a pair
    /// (`…/sites/:parent_id`); index-folding undoes that single step. Only
    /// the *last* pair is ever touched, so an earlier segment that happens
    /// to share the resource's name is left alone.
    pub(crate) fn without_last_pair(&self) -> Self {
        match self.segments.as_slice() {
            [head @ .., Segment::Literal(_), Segment::Param(_)] => Self { segments: head.to_vec() },
            _ => self.clone(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
