pub mod action_list;
pub mod action_row;
pub mod code_viewer;
pub mod payload_editor;

pub use action_list::ActionList;
pub use action_row::{ActionRow, Affordance, RowCapabilities, RowProps, RowView};
pub use code_viewer::{
    BuiltinCodeViewerProvider, CodeView, CodeViewFuture, CodeViewerProvider, CodeViewerSlot,
    NumberedCodeView, ViewerLoadState,
};
pub use payload_editor::{EditorEvent, JsonPayloadEditor, PayloadEditor};
