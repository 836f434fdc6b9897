//! Separator sets and alternation splitting.

use super::error::MappingError;
use serde::Serialize;

/// Ordered set of literal separators.
///
/// Splitting treats the set as alternatives in a single pass: at each scan
/// point the earliest occurrence of any separator is the boundary, and when
/// several separators start at the same byte the longest one wins (so `__`
/// beats `_`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeparatorSet {
    separators: Vec<String>,
}

impl SeparatorSet {
    /// Build a set, rejecting empty separators and dropping duplicates.
    pub fn new<I, S>(separators: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for sep in separators {
            let sep = sep.into();
            if sep.is_empty() {
                return Err(MappingError::EmptySeparator);
            }
            if !unique.contains(&sep) {
                unique.push(sep);
            }
        }
        Ok(Self { separators: unique })
    }

    /// The implicit folder-mode set.
    pub(crate) fn path() -> Self {
        Self {
            separators: vec!["/".to_string()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.separators.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.separators
    }

    /// Split `input` on the alternation of all separators.
    ///
    /// Empty pieces between adjacent separators are kept so token positions
    /// stay stable across items. An empty input yields no tokens.
    pub fn split(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }
        if self.separators.is_empty() {
            return vec![input.to_string()];
        }

        let mut tokens = Vec::new();
        let mut rest = input;
        while let Some((start, len)) = self.find_boundary(rest) {
            tokens.push(rest[..start].to_string());
            rest = &rest[start + len..];
        }
        tokens.push(rest.to_string());
        tokens
    }

    /// Earliest separator match in `haystack` as `(byte offset, length)`.
    fn find_boundary(&self, haystack: &str) -> Option<(usize, usize)> {
        self.separators
            .iter()
            .filter_map(|sep| haystack.find(sep.as_str()).map(|pos| (pos, sep.len())))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
    }
}
