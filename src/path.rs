//! Accessor paths from the validation root to an offending value.
//!
//! A [`JsonPath`] is an ordered list of [`PathSegment`]s, each either an object
//! key or an array index. The empty path addresses the root value itself.

use std::fmt::{self, Display};

/// One accessor in a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key (e.g. `config`).
    Field(String),
    /// An array or tuple index (e.g. `[0]`).
    Index(usize),
}

impl PathSegment {
    /// Creates a key segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates an index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Returns the segment as a constraint field name.
    ///
    /// Indices are stringified, so `[2]` becomes `"2"`.
    pub fn to_key(&self) -> String {
        match self {
            PathSegment::Field(name) => name.clone(),
            PathSegment::Index(idx) => idx.to_string(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in a nested JSON-like structure.
///
/// # Example
///
/// ```rust
/// use verdict::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("items")
///     .push_index(0)
///     .push_field("sku");
///
/// assert_eq!(path.to_string(), "items[0].sku");
/// assert_eq!(path.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates the empty path addressing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a sequence of segments.
    ///
    /// ```rust
    /// use verdict::{JsonPath, PathSegment};
    ///
    /// let path = JsonPath::from_segments([PathSegment::field("config"), PathSegment::index(1)]);
    /// assert_eq!(path.to_string(), "config[1]");
    /// ```
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = PathSegment>,
    {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Returns a new path with a key segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns a new path with every segment of `other` appended.
    pub fn join(&self, other: &JsonPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Returns true if this path addresses the root value.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Splits the path into its nesting chain and its leaf segment.
    ///
    /// Returns `None` for the root path.
    pub fn split_leaf(&self) -> Option<(&[PathSegment], &PathSegment)> {
        self.segments
            .split_last()
            .map(|(leaf, chain)| (chain, leaf))
    }
}

impl FromIterator<PathSegment> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
