//! Adds missing fields to an existing config file.
//!
//! Works on the TOML document rather than on [`Config`] so user comments,
//! ordering and formatting survive the migration.

use super::{Config, ConfigError};
use toml_edit::{DocumentMut, Item, Table};

/// Outcome of a migration.
#[derive(Debug, Clone, Default)]
pub struct MigrateResult {
    /// The migrated document
    pub content: String,
    /// Added keys as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist before
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty() || !self.sections_added.is_empty()
    }
}

/// Merge the default config into `content`, keeping every existing value.
pub fn migrate_config(content: &str) -> Result<MigrateResult, ConfigError> {
    let mut doc: DocumentMut = content.parse()?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?.parse()?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };

        if !doc.contains_key(section) {
            let mut table = Table::new();
            for (key, value) in default_table.iter() {
                table.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
            doc.insert(section, Item::Table(table));
            sections_added.push(section.to_string());
            continue;
        }

        // A non-table value under a section name is left for the loader to
        // report.
        let Some(existing) = doc.get_mut(section).and_then(Item::as_table_like_mut) else {
            continue;
        };
        for (key, value) in default_table.iter() {
            if !existing.contains_key(key) {
                existing.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
