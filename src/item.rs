//! Discovered image items.

use serde::Serialize;

/// One discovered image.
///
/// Created by an [`ItemSource`](crate::listing::ItemSource) per run and never
/// mutated afterwards; link resolution produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawItem {
    /// Relative path (folder mode) or file name (filename mode), always with
    /// `/` as the path separator.
    pub identifier: String,
    /// Leaf file name.
    pub display_name: String,
    /// Public URL, filled by a link resolver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_link: Option<String>,
}

impl RawItem {
    /// Create an item from its identifier, deriving the display name from the
    /// last path component.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into().replace('\\', "/");
        let display_name = leaf_name(&identifier).to_string();
        Self {
            identifier,
            display_name,
            resolved_link: None,
        }
    }

    /// Returns a copy carrying the given public link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.resolved_link = Some(link.into());
        self
    }
}

/// Last `/`-separated component of a path-like identifier.
pub(crate) fn leaf_name(identifier: &str) -> &str {
    identifier
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(identifier)
}
