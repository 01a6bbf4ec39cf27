use crate::core::SaveActionRequest;

/// Requests a row hands to its parent
///
/// Each variant corresponds to an optional capability of the row; a row only
/// emits the ones its parent enabled.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEvent {
    /// "Apply" was activated
    Apply,
    /// The edited payload was saved
    SaveAction(SaveActionRequest),
    /// The row was dismissed
    Close,
    /// A column reference was activated
    Navigate { column: usize },
}
