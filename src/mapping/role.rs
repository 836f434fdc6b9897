//! Roles, token positions and role assignments.

use super::error::MappingError;
use serde::Serialize;
use std::fmt;

/// Label used for custom tags that were assigned without an explicit name.
pub const DEFAULT_TAG_LABEL: &str = "Tag";

/// Semantic meaning of a token position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", content = "label", rename_all = "snake_case")]
pub enum Role {
    Ignore,
    Itemcode,
    Colorcode,
    /// Free-form field; tokens sharing a label are space-joined.
    CustomTag(String),
}

impl Role {
    /// Parse a role name, using `default_label` for an unlabelled tag.
    ///
    /// Accepts `ignore`, `itemcode`, `colorcode`, `tag` and `tag:<label>`
    /// (case-insensitive), plus the German names used by older exports.
    pub fn parse(input: &str, default_label: &str) -> Option<Self> {
        let (name, label) = match input.split_once(':') {
            Some((name, label)) => (name.trim(), Some(label.trim())),
            None => (input.trim(), None),
        };

        match name.to_lowercase().as_str() {
            "ignore" | "ignorieren" | "skip" | "-" => Some(Role::Ignore),
            "itemcode" | "item" => Some(Role::Itemcode),
            "colorcode" | "colourcode" | "color" | "farbcode" => Some(Role::Colorcode),
            "tag" | "custom" | "eigener tag" => {
                let label = label.filter(|l| !l.is_empty()).unwrap_or(default_label);
                Some(Role::CustomTag(label.to_string()))
            }
            _ => None,
        }
    }

    /// Roles that hold a single value per row.
    pub fn is_singular(&self) -> bool {
        matches!(self, Role::Itemcode | Role::Colorcode)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Ignore => write!(f, "ignore"),
            Role::Itemcode => write!(f, "itemcode"),
            Role::Colorcode => write!(f, "colorcode"),
            Role::CustomTag(label) => write!(f, "tag:{}", label),
        }
    }
}

/// Token position, counted from either end of the token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// 0-based index from the first token.
    FromStart(usize),
    /// 1-based offset from the last token (`FromEnd(1)` is the last one).
    FromEnd(usize),
}

impl Position {
    /// Concrete index into a token list of length `len`, if it exists.
    pub fn resolve(self, len: usize) -> Option<usize> {
        match self {
            Position::FromStart(i) if i < len => Some(i),
            Position::FromEnd(n) if n >= 1 && n <= len => Some(len - n),
            _ => None,
        }
    }

    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(rest) = input.strip_prefix('-') {
            let n: usize = rest.parse().ok()?;
            (n >= 1).then_some(Position::FromEnd(n))
        } else {
            input.parse().ok().map(Position::FromStart)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::FromStart(i) => write!(f, "{}", i),
            Position::FromEnd(n) => write!(f, "-{}", n),
        }
    }
}

/// One `position = role` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleBinding {
    pub position: Position,
    pub role: Role,
}

impl RoleBinding {
    pub fn new(position: Position, role: Role) -> Self {
        Self { position, role }
    }

    /// Parse `"<pos>=<role>"`, e.g. `0=itemcode`, `-2=colorcode`, `3=tag:Season`.
    pub fn parse(spec: &str, default_label: &str) -> Result<Self, MappingError> {
        let (pos, role) = spec
            .split_once('=')
            .ok_or_else(|| MappingError::invalid_spec(spec, "expected <position>=<role>"))?;

        let position = Position::parse(pos).ok_or_else(|| {
            MappingError::invalid_spec(spec, format!("'{}' is not a token position", pos.trim()))
        })?;
        let role = Role::parse(role, default_label).ok_or_else(|| {
            MappingError::invalid_spec(
                spec,
                format!(
                    "unknown role '{}' (expected ignore, itemcode, colorcode or tag[:label])",
                    role.trim()
                ),
            )
        })?;

        Ok(Self { position, role })
    }
}

/// A singular role bound to more than one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleConflict {
    pub role: Role,
    pub positions: Vec<Position>,
}

impl fmt::Display for RoleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions: Vec<String> = self.positions.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "{} is assigned to positions {}; the later position overwrites the earlier",
            self.role,
            positions.join(", ")
        )
    }
}

/// Role per token position, applied uniformly to every item of an export.
///
/// Unbound positions are ignored. Binding a position twice replaces the
/// earlier binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    bindings: Vec<RoleBinding>,
}

impl RoleAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folder convention: Itemcode two levels above the file, Colorcode in
    /// the folder containing it (`parts[-3]` / `parts[-2]` of the full path).
    pub fn convention() -> Self {
        Self::new()
            .with(Position::FromEnd(2), Role::Itemcode)
            .with(Position::FromEnd(1), Role::Colorcode)
    }

    /// Build from an index-ordered role list, as collected per template token.
    pub fn from_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        roles
            .into_iter()
            .enumerate()
            .fold(Self::new(), |acc, (i, role)| {
                acc.with(Position::FromStart(i), role)
            })
    }

    /// Parse a list of `<pos>=<role>` specs.
    pub fn parse_specs<S: AsRef<str>>(
        specs: &[S],
        default_label: &str,
    ) -> Result<Self, MappingError> {
        let mut assignment = Self::new();
        for spec in specs {
            assignment.bind(RoleBinding::parse(spec.as_ref(), default_label)?);
        }
        Ok(assignment)
    }

    pub fn with(mut self, position: Position, role: Role) -> Self {
        self.bind(RoleBinding::new(position, role));
        self
    }

    pub fn bind(&mut self, binding: RoleBinding) {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.position == binding.position)
        {
            Some(existing) => existing.role = binding.role,
            None => self.bindings.push(binding),
        }
    }

    pub fn bindings(&self) -> &[RoleBinding] {
        &self.bindings
    }

    /// True when no position carries a non-ignore role.
    pub fn is_empty(&self) -> bool {
        self.bindings.iter().all(|b| b.role == Role::Ignore)
    }

    /// Role of a position; unbound positions are [`Role::Ignore`].
    pub fn role_at(&self, position: Position) -> &Role {
        self.bindings
            .iter()
            .find(|b| b.position == position)
            .map(|b| &b.role)
            .unwrap_or(&Role::Ignore)
    }

    /// Custom tag labels in first-bound order, without duplicates.
    ///
    /// Every exported row carries one field per label, so this is also the
    /// column order of the custom fields.
    pub fn custom_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for binding in &self.bindings {
            if let Role::CustomTag(label) = &binding.role {
                if !labels.contains(label) {
                    labels.push(label.clone());
                }
            }
        }
        labels
    }

    /// Singular roles bound to several positions.
    pub fn conflicts(&self) -> Vec<RoleConflict> {
        [Role::Itemcode, Role::Colorcode]
            .into_iter()
            .filter_map(|role| {
                let positions: Vec<Position> = self
                    .bindings
                    .iter()
                    .filter(|b| b.role == role)
                    .map(|b| b.position)
                    .collect();
                (positions.len() > 1).then_some(RoleConflict { role, positions })
            })
            .collect()
    }

    /// Bindings resolved against a token list of length `len`, in ascending
    /// token index. Positions outside the list are dropped.
    pub(crate) fn resolve(&self, len: usize) -> Vec<(usize, &Role)> {
        let mut resolved: Vec<(usize, &Role)> = self
            .bindings
            .iter()
            .filter(|b| b.role != Role::Ignore)
            .filter_map(|b| b.position.resolve(len).map(|i| (i, &b.role)))
            .collect();
        // Stable: a FromStart and a FromEnd binding landing on the same index
        // keep their bound order.
        resolved.sort_by_key(|(i, _)| *i);
        resolved
    }
}
