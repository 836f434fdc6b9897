//! Applies a role assignment to items to produce export rows.

use super::role::{Role, RoleAssignment};
use super::tokenize::Tokenizer;
use crate::item::RawItem;
use crate::link::LinkResolver;
use serde::Serialize;
use tracing::{debug, warn};

/// A labelled custom tag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomField {
    pub label: String,
    pub value: String,
}

/// One output record.
///
/// `custom` has one entry per custom label of the assignment that produced
/// the row, in the same order for every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub itemcode: String,
    pub colorcode: String,
    pub custom: Vec<CustomField>,
    pub image_link: String,
    pub display_name: String,
}

impl ExportRow {
    /// Value of a custom field by label.
    pub fn custom_value(&self, label: &str) -> Option<&str> {
        self.custom
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// Replays one role assignment over a collection of items.
///
/// Holds only shared references; applying never mutates the mapper, the
/// assignment or the item, so repeated calls give identical rows.
pub struct Mapper<'a> {
    tokenizer: &'a Tokenizer,
    assignment: &'a RoleAssignment,
    resolver: Option<&'a dyn LinkResolver>,
    labels: Vec<String>,
}

impl<'a> Mapper<'a> {
    pub fn new(tokenizer: &'a Tokenizer, assignment: &'a RoleAssignment) -> Self {
        Self {
            tokenizer,
            assignment,
            resolver: None,
            labels: assignment.custom_labels(),
        }
    }

    /// Resolve image links through `resolver` instead of using identifiers.
    pub fn with_resolver(mut self, resolver: &'a dyn LinkResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Custom tag labels, in column order.
    pub fn custom_labels(&self) -> &[String] {
        &self.labels
    }

    /// Map one item to a row. Never fails: positions beyond the item's
    /// tokens leave their field empty.
    pub fn apply(&self, item: &RawItem) -> ExportRow {
        let tokens = self.tokenizer.tokenize(&item.identifier);

        let mut itemcode = String::new();
        let mut colorcode = String::new();
        let mut custom: Vec<CustomField> = self
            .labels
            .iter()
            .map(|label| CustomField {
                label: label.clone(),
                value: String::new(),
            })
            .collect();

        // Ascending token order, so a later position overwrites an earlier
        // one bound to the same singular role.
        for (index, role) in self.assignment.resolve(tokens.len()) {
            let token = &tokens[index];
            match role {
                Role::Itemcode => itemcode = token.clone(),
                Role::Colorcode => colorcode = token.clone(),
                Role::CustomTag(label) => {
                    if let Some(field) = custom.iter_mut().find(|f| &f.label == label) {
                        field.value.push_str(token);
                        field.value.push(' ');
                    }
                }
                Role::Ignore => {}
            }
        }
        for field in &mut custom {
            field.value = field.value.trim().to_string();
        }

        debug!(
            identifier = %item.identifier,
            tokens = tokens.len(),
            itemcode = %itemcode,
            colorcode = %colorcode,
            "Mapped item"
        );

        ExportRow {
            itemcode,
            colorcode,
            custom,
            image_link: self.link_for(item),
            display_name: item.display_name.clone(),
        }
    }

    /// Map every item in listing order.
    pub fn apply_all(&self, items: &[RawItem]) -> Vec<ExportRow> {
        items.iter().map(|item| self.apply(item)).collect()
    }

    fn link_for(&self, item: &RawItem) -> String {
        if let Some(link) = &item.resolved_link {
            return link.clone();
        }
        match self.resolver {
            Some(resolver) => match resolver.resolve(item) {
                Ok(link) => link,
                Err(e) => {
                    warn!(identifier = %item.identifier, error = %e, "Link resolution failed");
                    String::new()
                }
            },
            None => item.identifier.clone(),
        }
    }
}
