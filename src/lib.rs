#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod core;
pub mod logging;
pub mod tui;

// Re-export commonly used types
pub use core::{
    ActionPayload, ActionRowError, FeatureIdMapping, SaveActionRequest, Suggestions,
    TransformerAction,
};
pub use tui::{ActionList, ActionRow, RowCapabilities, RowEvent, RowProps};
