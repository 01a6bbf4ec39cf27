use crate::core::features::FeatureIdMapping;
use crate::core::references::ArgumentReferences;
use crate::core::row_state::RowState;
use crate::core::types::{ActionPayload, PayloadOptions, TransformerAction};

pub const OPTION_SEPARATOR: &str = ", ";

/// The single block shown under a row header
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowContent<'a> {
    Editor(&'a ActionPayload),
    Message(&'a str),
    OptionSummary(&'a PayloadOptions),
    Code(&'a str),
    Empty,
}

/// Pick what the row shows, first match wins:
/// editor, message, option summary, code, nothing.
pub fn select_content<'a>(action: &'a TransformerAction, state: &'a RowState) -> RowContent<'a> {
    if state.is_editing() {
        return RowContent::Editor(state.draft_payload());
    }
    if let Some(message) = action.message_text() {
        return RowContent::Message(message);
    }
    if let Some(options) = action.payload.non_empty_options() {
        return RowContent::OptionSummary(options);
    }
    if let Some(code) = action.payload.code_text() {
        return RowContent::Code(code);
    }
    RowContent::Empty
}

/// `key: value` entries joined in insertion order
pub fn option_summary(options: &PayloadOptions) -> String {
    options
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(OPTION_SEPARATOR)
}

/// Title plus argument references; the colon only appears with arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHeader {
    pub title: String,
    pub references: ArgumentReferences,
}

impl RowHeader {
    pub fn build(action: &TransformerAction, mapping: &FeatureIdMapping) -> Self {
        Self {
            title: action.title.clone(),
            references: ArgumentReferences::build(&action.payload.arguments, mapping),
        }
    }

    pub fn shows_colon(&self) -> bool {
        !self.references.is_empty()
    }

    pub fn to_plain_text(&self) -> String {
        if self.shows_colon() {
            format!("{}: {}", self.title, self.references.to_plain_text())
        } else {
            self.title.clone()
        }
    }
}
