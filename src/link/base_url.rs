//! Links built from a base URL and the item's relative path.

use super::error::LinkError;
use super::LinkResolver;
use crate::item::RawItem;

/// Joins a base URL with the percent-encoded segments of the identifier.
///
/// Suits storage that serves files under their relative path, e.g. a CDN or
/// a bucket with public read access.
#[derive(Debug, Clone)]
pub struct BaseUrlResolver {
    base: String,
}

impl BaseUrlResolver {
    /// Create a resolver. The base must be an `http(s)://` URL.
    pub fn new(base: impl Into<String>) -> Result<Self, LinkError> {
        let base = base.into();
        let trimmed = base.trim().trim_end_matches('/');
        let has_host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(LinkError::InvalidBaseUrl(base));
        }
        Ok(Self {
            base: trimmed.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl LinkResolver for BaseUrlResolver {
    fn resolve(&self, item: &RawItem) -> Result<String, LinkError> {
        let mut url = self.base.clone();
        let mut segments = 0;
        for segment in item.identifier.split('/').filter(|s| !s.is_empty()) {
            if segment == ".." || segment == "." {
                return Err(LinkError::Unresolvable {
                    identifier: item.identifier.clone(),
                    reason: "relative path segments are not allowed".to_string(),
                });
            }
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
            segments += 1;
        }
        if segments == 0 {
            return Err(LinkError::Unresolvable {
                identifier: item.identifier.clone(),
                reason: "empty path".to_string(),
            });
        }
        Ok(url)
    }
}
