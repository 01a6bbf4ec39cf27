//! Row edit state: committed payload from the parent, the draft being edited,
//! and the view/edit mode. Transitions are applied through [`RowState::apply`].

use crate::core::types::{ActionPayload, PayloadPatch, SaveActionRequest};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum RowMode {
    #[default]
    View,
    Editing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowTransition {
    /// Flip between View and Editing; requires a save capability
    ToggleEdit,
    /// Parent supplied a payload; resets the draft when its identity changed
    ExternalPayloadChanged(Arc<ActionPayload>),
    /// Editor replaced the draft wholesale
    EditorUpdatesDraft(ActionPayload),
    /// Merge the override into the draft and emit it; only valid while Editing
    Save(PayloadPatch),
}

#[derive(Debug, Clone)]
pub struct RowState {
    mode: RowMode,
    draft_payload: ActionPayload,
    committed: Arc<ActionPayload>,
}

impl RowState {
    /// Mount: draft starts as a copy of the committed payload, mode View
    pub fn new(committed: Arc<ActionPayload>) -> Self {
        Self {
            mode: RowMode::View,
            draft_payload: (*committed).clone(),
            committed,
        }
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == RowMode::Editing
    }

    pub fn draft_payload(&self) -> &ActionPayload {
        &self.draft_payload
    }

    pub fn committed(&self) -> &Arc<ActionPayload> {
        &self.committed
    }

    /// Run one transition. `can_save` is whether the row has a save capability.
    ///
    /// Returns the save request when the transition commits a payload.
    pub fn apply(
        &mut self,
        transition: RowTransition,
        can_save: bool,
    ) -> Option<SaveActionRequest> {
        match transition {
            RowTransition::ToggleEdit => {
                if !can_save {
                    debug!("toggle edit ignored: row has no save capability");
                    return None;
                }
                self.mode = match self.mode {
                    RowMode::View => RowMode::Editing,
                    RowMode::Editing => RowMode::View,
                };
                debug!(mode = %self.mode, "row mode toggled");
                None
            }
            RowTransition::ExternalPayloadChanged(payload) => {
                if Arc::ptr_eq(&payload, &self.committed) {
                    return None;
                }
                if self.is_editing() && self.draft_payload != *self.committed {
                    debug!("discarding unsaved draft: parent supplied a new payload");
                }
                self.draft_payload = (*payload).clone();
                self.committed = payload;
                None
            }
            RowTransition::EditorUpdatesDraft(payload) => {
                if !self.is_editing() {
                    debug!("draft update outside editing ignored");
                    return None;
                }
                self.draft_payload = payload;
                None
            }
            RowTransition::Save(patch) => {
                if !self.is_editing() {
                    warn!("save requested while not editing; ignored");
                    return None;
                }
                let action_payload = self.draft_payload.merged(&patch);
                debug!(action_type = %action_payload.action_type, "saving action payload");
                Some(SaveActionRequest { action_payload })
            }
        }
    }
}
