//! Links looked up from a prepared manifest.

use super::error::LinkError;
use super::LinkResolver;
use crate::item::RawItem;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Resolves links from a `path,url` CSV, such as a list of shared links
/// exported from a cloud drive.
///
/// Lookups try the full identifier first, then the bare file name.
#[derive(Debug, Clone, Default)]
pub struct ManifestResolver {
    links: HashMap<String, String>,
}

impl ManifestResolver {
    /// Load a manifest file. The first row is a header and is skipped.
    pub fn load(path: &Path) -> Result<Self, LinkError> {
        let file = std::fs::File::open(path).map_err(|e| LinkError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_reader(file).map_err(|e| match e {
            LinkError::Csv(source) => LinkError::Manifest {
                path: path.to_path_buf(),
                message: source.to_string(),
            },
            other => other,
        })
    }

    /// Parse manifest rows from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LinkError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut links = HashMap::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            match (record.get(0), record.get(1)) {
                (Some(path), Some(url)) if !path.is_empty() && !url.is_empty() => {
                    links.insert(path.replace('\\', "/"), url.to_string());
                }
                _ => {
                    tracing::debug!(line = line + 2, "Skipping incomplete manifest row");
                }
            }
        }
        Ok(Self { links })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            links: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl LinkResolver for ManifestResolver {
    fn resolve(&self, item: &RawItem) -> Result<String, LinkError> {
        self.links
            .get(&item.identifier)
            .or_else(|| self.links.get(&item.display_name))
            .cloned()
            .ok_or_else(|| LinkError::NotFound(item.identifier.clone()))
    }
}
