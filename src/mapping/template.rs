//! Template token sequences used to drive role assignment.

use super::tokenize::Tokenizer;
use crate::item::RawItem;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the representative item is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pick {
    /// First item in listing order.
    #[default]
    First,
    /// Item with the most tokens; ties go to the first encountered.
    Deepest,
}

impl FromStr for Pick {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(Pick::First),
            "deepest" | "longest" => Ok(Pick::Deepest),
            other => Err(format!("unknown pick '{}' (expected first or deepest)", other)),
        }
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pick::First => write!(f, "first"),
            Pick::Deepest => write!(f, "deepest"),
        }
    }
}

/// Tokens of one representative item.
///
/// Other items may have fewer or more tokens; the template only tells the
/// user which positions exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenTemplate {
    pub identifier: String,
    pub tokens: Vec<String>,
}

impl TokenTemplate {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Pick the representative item and tokenize it. `None` for no items.
    pub fn build(items: &[RawItem], tokenizer: &Tokenizer, pick: Pick) -> Option<Self> {
        let mut candidates = items
            .iter()
            .map(|item| (item, tokenizer.tokenize(&item.identifier)));

        let (item, tokens) = match pick {
            Pick::First => candidates.next()?,
            Pick::Deepest => {
                let mut best: Option<(&RawItem, Vec<String>)> = None;
                for candidate in candidates {
                    if best
                        .as_ref()
                        .map_or(true, |(_, tokens)| candidate.1.len() > tokens.len())
                    {
                        best = Some(candidate);
                    }
                }
                best?
            }
        };

        tracing::debug!(
            identifier = %item.identifier,
            tokens = tokens.len(),
            "Built template"
        );

        Some(Self {
            identifier: item.identifier.clone(),
            tokens,
        })
    }
}
