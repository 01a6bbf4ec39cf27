//! Argument references: column names rendered as a comma-joined sequence where
//! names known to the feature mapping become navigable.

use crate::core::features::FeatureIdMapping;

pub const ARGUMENT_SEPARATOR: &str = ", ";

/// Request to move the feature view to a column position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest {
    pub column: usize,
}

/// One renderable piece of the argument line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferencePiece {
    /// Name found in the mapping; activation navigates to `column`
    Reference { name: String, column: usize },
    /// Name with no feature behind it
    Label(String),
    Separator,
}

impl ReferencePiece {
    pub fn text(&self) -> &str {
        match self {
            ReferencePiece::Reference { name, .. } | ReferencePiece::Label(name) => name.as_str(),
            ReferencePiece::Separator => ARGUMENT_SEPARATOR,
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self, ReferencePiece::Reference { .. })
    }

    pub fn activate(&self) -> Option<NavigationRequest> {
        match self {
            ReferencePiece::Reference { column, .. } => Some(NavigationRequest { column: *column }),
            _ => None,
        }
    }
}

/// Built argument line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentReferences {
    pieces: Vec<ReferencePiece>,
}

impl ArgumentReferences {
    pub fn build(arguments: &[String], mapping: &FeatureIdMapping) -> Self {
        let mut pieces = Vec::with_capacity(arguments.len() * 2);
        for (i, name) in arguments.iter().enumerate() {
            if i > 0 {
                pieces.push(ReferencePiece::Separator);
            }
            pieces.push(match mapping.get(name) {
                Some(column) => ReferencePiece::Reference {
                    name: name.clone(),
                    column,
                },
                None => ReferencePiece::Label(name.clone()),
            });
        }
        Self { pieces }
    }

    pub fn pieces(&self) -> &[ReferencePiece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Argument tokens, separators excluded
    pub fn tokens(&self) -> impl Iterator<Item = &ReferencePiece> {
        self.pieces
            .iter()
            .filter(|p| !matches!(p, ReferencePiece::Separator))
    }

    pub fn separator_count(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| matches!(p, ReferencePiece::Separator))
            .count()
    }

    /// Number of navigable references
    pub fn actionable_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_actionable()).count()
    }

    /// The `nth` navigable reference, counting only actionable pieces
    pub fn actionable(&self, nth: usize) -> Option<&ReferencePiece> {
        self.pieces.iter().filter(|p| p.is_actionable()).nth(nth)
    }

    /// Activate the `nth` navigable reference
    pub fn activate(&self, nth: usize) -> Option<NavigationRequest> {
        self.actionable(nth).and_then(ReferencePiece::activate)
    }

    pub fn to_plain_text(&self) -> String {
        self.pieces.iter().map(ReferencePiece::text).collect()
    }
}
