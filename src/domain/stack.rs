//! Views, slices and the stacks that order them

use std::fmt;

/// Identity of an open viewport in the host viewer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Opaque identifier of a single slice image
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ImageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A loaded slice as handed out by the image loader
///
/// Pixel data stays with the host; the core only needs the identity and the
/// pixel grid extent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub image_id: ImageId,
    pub rows: u32,
    pub columns: u32,
}

impl Image {
    pub fn new(image_id: impl Into<ImageId>, rows: u32, columns: u32) -> Self {
        Self {
            image_id: image_id.into(),
            rows,
            columns,
        }
    }

    /// Check if a pixel index `(x, y)` lies on the image
    pub fn contains_pixel(&self, (x, y): (i64, i64)) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.columns) && y < i64::from(self.rows)
    }
}

/// How a slice load should interact with the image cache
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Load through the cache and keep the result there
    #[default]
    Cached,
    /// Single-shot load that bypasses the cache
    Uncached,
}

/// Ordered slices shown one at a time in a view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    pub image_ids: Vec<ImageId>,
    pub current_index: usize,
    pub prevent_cache: bool,
}

impl Stack {
    /// Create a stack positioned at its first slice
    pub fn new<I, T>(image_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageId>,
    {
        Self {
            image_ids: image_ids.into_iter().map(Into::into).collect(),
            current_index: 0,
            prevent_cache: false,
        }
    }

    pub fn with_current_index(mut self, index: usize) -> Self {
        self.current_index = index;
        self
    }

    pub fn with_prevent_cache(mut self, prevent_cache: bool) -> Self {
        self.prevent_cache = prevent_cache;
        self
    }

    pub fn image_id(&self, index: usize) -> Option<&ImageId> {
        self.image_ids.get(index)
    }

    pub fn current_image_id(&self) -> Option<&ImageId> {
        self.image_id(self.current_index)
    }

    /// Cache policy for loads issued against this stack
    pub fn cache_policy(&self) -> CachePolicy {
        if self.prevent_cache {
            CachePolicy::Uncached
        } else {
            CachePolicy::Cached
        }
    }

    pub fn len(&self) -> usize {
        self.image_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_ids.is_empty()
    }
}
