pub mod content;
pub mod error;
pub mod features;
pub mod references;
pub mod row_state;
pub mod suggestions;
pub mod types;

pub use content::{option_summary, select_content, RowContent, RowHeader};
pub use error::ActionRowError;
pub use features::{FeatureIdMapping, FeatureIndex};
pub use references::{ArgumentReferences, NavigationRequest, ReferencePiece};
pub use row_state::{RowMode, RowState, RowTransition};
pub use suggestions::Suggestions;
pub use types::*;
