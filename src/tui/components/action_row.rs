//! ActionRow: one suggested transformation in the review list.
//!
//! Shows an optional Apply control and index label, the action title with its
//! column references, one content block (message, option summary, code or the
//! payload editor) and trailing edit/dismiss controls. The row owns only its
//! edit state; every outcome is handed to the parent as a [`RowEvent`].

use crate::core::{
    option_summary, select_content, FeatureIdMapping, FeatureIndex, FeatureSet, ReferencePiece,
    RowContent, RowHeader, RowMode, RowState, RowTransition, TransformerAction,
};
use crate::tui::components::code_viewer::{
    BuiltinCodeViewerProvider, CodeViewerProvider, CodeViewerSlot, ViewerLoadState,
};
use crate::tui::components::payload_editor::{EditorEvent, JsonPayloadEditor, PayloadEditor};
use crate::tui::{Action, Component, Focusable, KeyBindings, RowEvent, RowStyle};
use color_eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which optional controls the parent wired up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCapabilities {
    /// "Apply" (the `link` capability)
    pub apply: bool,
    /// Saving edits; also gates the edit toggle
    pub save: bool,
    /// Dismissing the row
    pub close: bool,
}

impl RowCapabilities {
    pub fn all() -> Self {
        Self {
            apply: true,
            save: true,
            close: true,
        }
    }
}

/// Everything the parent supplies to a row
#[derive(Debug, Clone)]
pub struct RowProps {
    pub action: TransformerAction,
    pub features: Arc<FeatureSet>,
    pub feature_id_mapping: Arc<FeatureIdMapping>,
    pub idx: usize,
    pub show_idx: bool,
    pub border: bool,
    pub is_loading: bool,
    pub capabilities: RowCapabilities,
}

impl RowProps {
    pub fn new(
        action: TransformerAction,
        features: Arc<FeatureSet>,
        feature_id_mapping: Arc<FeatureIdMapping>,
        idx: usize,
    ) -> Self {
        Self {
            action,
            features,
            feature_id_mapping,
            idx,
            show_idx: false,
            border: false,
            is_loading: false,
            capabilities: RowCapabilities::default(),
        }
    }
}

/// State of an optional control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Hidden,
    Visible,
    Busy,
}

impl Affordance {
    fn for_capability(present: bool, is_loading: bool) -> Self {
        match (present, is_loading) {
            (false, _) => Affordance::Hidden,
            (true, true) => Affordance::Busy,
            (true, false) => Affordance::Visible,
        }
    }
}

/// What the row shows, decided without touching the terminal
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    pub apply: Affordance,
    pub index_label: Option<String>,
    pub header: &'a RowHeader,
    pub content: RowContent<'a>,
    pub edit_toggle: bool,
    pub dismiss: Affordance,
}

pub struct ActionRow {
    props: RowProps,
    state: RowState,
    header: RowHeader,
    feature_index: FeatureIndex,
    reference_cursor: Option<usize>,
    editor: Box<dyn PayloadEditor>,
    code_viewer: CodeViewerSlot,
    style: RowStyle,
    keybindings: KeyBindings,
    focused: bool,
}

impl ActionRow {
    pub fn new(props: RowProps, style: RowStyle) -> Self {
        Self::with_parts(
            props,
            style,
            Box::new(JsonPayloadEditor::new()),
            Arc::new(BuiltinCodeViewerProvider::default()),
        )
    }

    /// Build a row with a specific editor and code viewer source
    pub fn with_parts(
        props: RowProps,
        style: RowStyle,
        editor: Box<dyn PayloadEditor>,
        code_viewer: Arc<dyn CodeViewerProvider>,
    ) -> Self {
        let state = RowState::new(props.action.payload.clone());
        let header = RowHeader::build(&props.action, &props.feature_id_mapping);
        let feature_index = FeatureIndex::resolve(&props.features);
        let mut row = Self {
            props,
            state,
            header,
            feature_index,
            reference_cursor: None,
            editor,
            code_viewer: CodeViewerSlot::new(code_viewer),
            style,
            keybindings: KeyBindings::default(),
            focused: false,
        };
        row.load_code_viewer();
        row
    }

    pub fn code_viewer_state(&self) -> ViewerLoadState {
        self.code_viewer.state()
    }

    /// Swap the code viewer source and start loading from it
    pub fn set_code_viewer_provider(&mut self, provider: Arc<dyn CodeViewerProvider>) {
        self.code_viewer = CodeViewerSlot::new(provider);
        self.load_code_viewer();
    }

    /// Start the viewer load as soon as code is the row's content
    fn load_code_viewer(&mut self) {
        if matches!(
            select_content(&self.props.action, &self.state),
            RowContent::Code(_)
        ) {
            self.code_viewer.request();
            self.code_viewer.poll();
        }
    }

    /// Key hints in the header follow these bindings
    pub fn set_keybindings(&mut self, keybindings: KeyBindings) {
        self.keybindings = keybindings;
    }

    pub fn props(&self) -> &RowProps {
        &self.props
    }

    pub fn action(&self) -> &TransformerAction {
        &self.props.action
    }

    pub fn mode(&self) -> RowMode {
        self.state.mode()
    }

    pub fn state(&self) -> &RowState {
        &self.state
    }

    pub fn header(&self) -> &RowHeader {
        &self.header
    }

    pub fn reference_cursor(&self) -> Option<usize> {
        self.reference_cursor
    }

    pub fn style(&self) -> &RowStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: RowStyle) {
        self.style = style;
    }

    /// Feature id at a navigation position
    pub fn feature_at(&self, column: usize) -> Option<&str> {
        self.feature_index.ids().get(column).map(String::as_str)
    }

    /// Parent supplied the action again; a new payload identity resets the draft
    pub fn set_action(&mut self, action: TransformerAction) {
        let reset = !Arc::ptr_eq(&action.payload, self.state.committed());
        self.state.apply(
            RowTransition::ExternalPayloadChanged(action.payload.clone()),
            self.props.capabilities.save,
        );
        if reset && self.state.is_editing() {
            self.editor.seed(self.state.draft_payload());
        }
        self.props.action = action;
        self.rebuild_header();
        self.load_code_viewer();
    }

    pub fn set_features(&mut self, features: Arc<FeatureSet>, mapping: Arc<FeatureIdMapping>) {
        if !Arc::ptr_eq(&features, &self.props.features) {
            self.feature_index = FeatureIndex::resolve(&features);
            self.props.features = features;
        }
        self.props.feature_id_mapping = mapping;
        self.rebuild_header();
    }

    pub fn set_idx(&mut self, idx: usize) {
        self.props.idx = idx;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.props.is_loading = is_loading;
    }

    pub fn set_capabilities(&mut self, capabilities: RowCapabilities) {
        self.props.capabilities = capabilities;
    }

    pub fn set_show_idx(&mut self, show_idx: bool) {
        self.props.show_idx = show_idx;
    }

    pub fn set_border(&mut self, border: bool) {
        self.props.border = border;
    }

    fn rebuild_header(&mut self) {
        self.header = RowHeader::build(&self.props.action, &self.props.feature_id_mapping);
        let count = self.header.references.actionable_count();
        self.reference_cursor = self.reference_cursor.filter(|&c| c < count);
    }

    pub fn compose(&self) -> RowView<'_> {
        let caps = self.props.capabilities;
        RowView {
            apply: Affordance::for_capability(caps.apply, self.props.is_loading),
            index_label: self
                .props
                .show_idx
                .then(|| format!("{}.", self.props.idx + 1)),
            header: &self.header,
            content: select_content(&self.props.action, &self.state),
            edit_toggle: caps.save,
            dismiss: Affordance::for_capability(caps.close, self.props.is_loading),
        }
    }

    fn move_reference_cursor(&mut self, forward: bool) {
        let count = self.header.references.actionable_count();
        if count == 0 {
            self.reference_cursor = None;
            return;
        }
        self.reference_cursor = Some(match (self.reference_cursor, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(c), true) => (c + 1) % count,
            (Some(c), false) => (c + count - 1) % count,
        });
    }

    /// Route a key: the editor gets everything but Ctrl bindings while editing
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<RowEvent>> {
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }

        if !self.state.is_editing() {
            return match self.keybindings.get_action(&key) {
                Some(action) => self.handle_action(action),
                None => Ok(None),
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && self.keybindings.get_action(&key) == Some(Action::ToggleEdit)
        {
            return self.handle_action(Action::ToggleEdit);
        }

        let can_save = self.props.capabilities.save;
        match self.editor.handle_key_event(key) {
            Some(EditorEvent::DraftChanged(payload)) => {
                self.state
                    .apply(RowTransition::EditorUpdatesDraft(payload), can_save);
                Ok(None)
            }
            Some(EditorEvent::Save(patch)) => {
                let request = self.state.apply(RowTransition::Save(patch), can_save);
                if request.is_some() {
                    info!(title = %self.props.action.title, "action payload saved");
                }
                Ok(request.map(RowEvent::SaveAction))
            }
            None => Ok(None),
        }
    }

    /// `[key] label` hints for the actions the row answers to right now
    pub fn key_hints(&self) -> Vec<String> {
        let editing = self.state.is_editing();
        self.supported_actions()
            .into_iter()
            .filter_map(|action| {
                let hint = if editing {
                    // only Ctrl bindings get past the editor
                    format!("[{}] view", self.keybindings.ctrl_hint_for(action)?)
                } else {
                    let key = self.keybindings.hint_for(action)?;
                    format!("[{key}] {}", action.description())
                };
                Some(hint)
            })
            .collect()
    }

    pub fn height(&self, width: u16) -> u16 {
        let wrap_width = width.max(1) as usize;
        let content = match select_content(&self.props.action, &self.state) {
            RowContent::Editor(_) => self.editor.height(),
            RowContent::Message(message) => textwrap::wrap(message, wrap_width).len() as u16,
            RowContent::OptionSummary(options) => {
                textwrap::wrap(&option_summary(options), wrap_width).len() as u16
            }
            RowContent::Code(code) => self.code_viewer.height(code, width),
            RowContent::Empty => 0,
        };
        1 + content + u16::from(self.props.border)
    }

    fn header_spans(&self, view: &RowView<'_>) -> Vec<Span<'static>> {
        let style = &self.style;
        let mut spans = Vec::new();
        match view.apply {
            Affordance::Visible => spans.push(Span::styled("[Apply] ", style.apply_style())),
            Affordance::Busy => spans.push(Span::styled("[...] ", style.busy_style())),
            Affordance::Hidden => {}
        }
        if let Some(label) = &view.index_label {
            spans.push(Span::styled(format!("{label} "), style.muted_style()));
        }
        spans.push(Span::styled(view.header.title.clone(), style.title_style()));
        if view.header.shows_colon() {
            spans.push(Span::styled(": ", style.normal_style()));
            let mut nth = 0;
            for piece in view.header.references.pieces() {
                let piece_style = match piece {
                    ReferencePiece::Reference { .. } => {
                        let focused = self.focused && self.reference_cursor == Some(nth);
                        nth += 1;
                        if focused {
                            style.focused_reference_style()
                        } else {
                            style.reference_style()
                        }
                    }
                    ReferencePiece::Label(_) | ReferencePiece::Separator => style.normal_style(),
                };
                spans.push(Span::styled(piece.text().to_string(), piece_style));
            }
        }
        spans
    }

    fn control_spans(&self, view: &RowView<'_>) -> Vec<Span<'static>> {
        let style = &self.style;
        let mut spans = Vec::new();
        if view.edit_toggle {
            let label = match self.state.mode() {
                RowMode::View => {
                    let key = self
                        .keybindings
                        .hint_for(Action::ToggleEdit)
                        .unwrap_or_else(|| "e".into());
                    format!("[{key}] edit")
                }
                RowMode::Editing => {
                    let key = self
                        .keybindings
                        .ctrl_hint_for(Action::ToggleEdit)
                        .unwrap_or_else(|| "Ctrl+e".into());
                    format!("[{key}] view")
                }
            };
            spans.push(Span::styled(label, style.normal_style()));
        }
        match view.dismiss {
            Affordance::Visible => {
                let key = self
                    .keybindings
                    .hint_for(Action::Dismiss)
                    .unwrap_or_else(|| "x".into());
                spans.push(Span::styled(format!(" [{key}] dismiss"), style.dismiss_style()));
            }
            Affordance::Busy => spans.push(Span::styled(" [...]", style.busy_style())),
            Affordance::Hidden => {}
        }
        spans
    }
}

impl Component for ActionRow {
    fn handle_action(&mut self, action: Action) -> Result<Option<RowEvent>> {
        let view_apply = Affordance::for_capability(
            self.props.capabilities.apply,
            self.props.is_loading,
        );
        let view_dismiss = Affordance::for_capability(
            self.props.capabilities.close,
            self.props.is_loading,
        );
        match action {
            Action::Apply if view_apply == Affordance::Visible => {
                info!(title = %self.props.action.title, "apply requested");
                Ok(Some(RowEvent::Apply))
            }
            Action::Dismiss if view_dismiss == Affordance::Visible => {
                info!(title = %self.props.action.title, "dismiss requested");
                Ok(Some(RowEvent::Close))
            }
            Action::ToggleEdit => {
                let was_editing = self.state.is_editing();
                self.state
                    .apply(RowTransition::ToggleEdit, self.props.capabilities.save);
                if !was_editing && self.state.is_editing() {
                    self.editor.seed(self.state.draft_payload());
                }
                Ok(None)
            }
            Action::NextReference => {
                self.move_reference_cursor(true);
                Ok(None)
            }
            Action::PrevReference => {
                self.move_reference_cursor(false);
                Ok(None)
            }
            Action::ActivateReference => {
                let piece = self
                    .reference_cursor
                    .and_then(|c| self.header.references.actionable(c));
                if let Some(ReferencePiece::Reference { name, column }) = piece {
                    let position = self.feature_index.lookup(name);
                    if position != Some(*column) {
                        warn!(
                            %name,
                            mapped = column,
                            ?position,
                            "feature id mapping disagrees with feature order"
                        );
                    }
                }
                let request = piece.and_then(ReferencePiece::activate);
                Ok(request.map(|nav| {
                    debug!(column = nav.column, "navigating to referenced column");
                    RowEvent::Navigate { column: nav.column }
                }))
            }
            _ => Ok(None),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let view = self.compose();
        let header_line = Line::from(self.header_spans(&view));
        let controls = Line::from(self.control_spans(&view));
        let controls_width = controls.width() as u16;

        let base = if self.focused {
            Style::default().bg(self.style.selected_bg)
        } else {
            Style::default()
        };
        let block = if self.props.border {
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(self.style.border_style())
                .style(base)
        } else {
            Block::default().style(base)
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        let header_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(controls_width)])
            .split(rows[0]);
        frame.render_widget(Paragraph::new(header_line), header_cols[0]);
        frame.render_widget(Paragraph::new(controls), header_cols[1]);

        let content_area = rows[1];
        match select_content(&self.props.action, &self.state) {
            RowContent::Editor(_) => self.editor.render(frame, content_area, &self.style),
            RowContent::Message(message) => {
                let paragraph = Paragraph::new(message.to_string())
                    .style(self.style.normal_style())
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, content_area);
            }
            RowContent::OptionSummary(options) => {
                let paragraph = Paragraph::new(option_summary(options))
                    .style(self.style.muted_style())
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, content_area);
            }
            RowContent::Code(code) => {
                self.code_viewer
                    .render(code, frame, content_area, &self.style);
            }
            RowContent::Empty => {}
        }
    }

    fn supported_actions(&self) -> Vec<Action> {
        if self.state.is_editing() {
            return vec![Action::ToggleEdit];
        }
        let caps = self.props.capabilities;
        let mut actions = Vec::new();
        if caps.apply && !self.props.is_loading {
            actions.push(Action::Apply);
        }
        if caps.save {
            actions.push(Action::ToggleEdit);
        }
        if caps.close && !self.props.is_loading {
            actions.push(Action::Dismiss);
        }
        if self.header.references.actionable_count() > 0 {
            actions.extend([
                Action::NextReference,
                Action::PrevReference,
                Action::ActivateReference,
            ]);
        }
        actions
    }

    fn name(&self) -> &str {
        "ActionRow"
    }

    fn update(&mut self) -> Result<()> {
        self.load_code_viewer();
        Ok(())
    }
}

impl Focusable for ActionRow {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        ActionPayload, ActionType, Axis, Feature, OptionValue, PayloadOptions,
    };
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn features() -> (Arc<FeatureSet>, Arc<FeatureIdMapping>) {
        let set: FeatureSet = ["id", "age", "income", "city"]
            .into_iter()
            .map(Feature::new)
            .collect();
        let mapping = FeatureIdMapping::from_features(&set);
        (Arc::new(set), Arc::new(mapping))
    }

    fn impute_action() -> TransformerAction {
        TransformerAction::new(
            "Fill in missing values",
            ActionPayload::new(ActionType::Impute, Axis::Column)
                .with_arguments(["age", "zip", "city"])
                .with_options([("strategy", "median")].into_iter().collect()),
        )
    }

    fn row_with(action: TransformerAction, caps: RowCapabilities) -> ActionRow {
        let (set, mapping) = features();
        let mut props = RowProps::new(action, set, mapping, 2);
        props.capabilities = caps;
        props.show_idx = true;
        let mut row = ActionRow::new(props, RowStyle::default());
        row.set_focused(true);
        row
    }

    fn press(row: &mut ActionRow, code: KeyCode, modifiers: KeyModifiers) -> Option<RowEvent> {
        row.handle_key_event(KeyEvent::new(code, modifiers)).unwrap()
    }

    fn draw(row: &mut ActionRow, width: u16) -> String {
        let height = row.height(width);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| row.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_compose_with_all_capabilities() {
        let row = row_with(impute_action(), RowCapabilities::all());
        let view = row.compose();
        assert_eq!(view.apply, Affordance::Visible);
        assert_eq!(view.dismiss, Affordance::Visible);
        assert!(view.edit_toggle);
        assert_eq!(view.index_label.as_deref(), Some("3."));
        assert!(matches!(view.content, RowContent::OptionSummary(_)));
    }

    #[test]
    fn test_compose_without_capabilities() {
        let row = row_with(impute_action(), RowCapabilities::default());
        let view = row.compose();
        assert_eq!(view.apply, Affordance::Hidden);
        assert_eq!(view.dismiss, Affordance::Hidden);
        assert!(!view.edit_toggle);
    }

    #[test]
    fn test_loading_replaces_apply_and_dismiss() {
        let mut row = row_with(impute_action(), RowCapabilities::all());
        row.set_loading(true);
        let view = row.compose();
        assert_eq!(view.apply, Affordance::Busy);
        assert_eq!(view.dismiss, Affordance::Busy);

        assert_eq!(row.handle_action(Action::Apply).unwrap(), None);
        assert_eq!(row.handle_action(Action::Dismiss).unwrap(), None);
    }

    #[test]
    fn test_apply_and_dismiss_events() {
        let mut row = row_with(impute_action(), RowCapabilities::all());
        let apply = press(&mut row, KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(apply, Some(RowEvent::Apply));
        let dismiss = press(&mut row, KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(dismiss, Some(RowEvent::Close));
    }

    #[test]
    fn test_missing_capabilities_are_ignored() {
        let mut row = row_with(impute_action(), RowCapabilities::default());
        assert_eq!(row.handle_action(Action::Apply).unwrap(), None);
        assert_eq!(row.handle_action(Action::Dismiss).unwrap(), None);
        row.handle_action(Action::ToggleEdit).unwrap();
        assert_eq!(row.mode(), RowMode::View);
    }

    #[test]
    fn test_reference_cursor_skips_labels() {
        let mut row = row_with(impute_action(), RowCapabilities::default());
        assert_eq!(row.handle_action(Action::ActivateReference).unwrap(), None);

        row.handle_action(Action::NextReference).unwrap();
        // "age" is feature 1
        assert_eq!(
            row.handle_action(Action::ActivateReference).unwrap(),
            Some(RowEvent::Navigate { column: 1 })
        );

        // "zip" is not a feature, so the next stop is "city"
        row.handle_action(Action::NextReference).unwrap();
        assert_eq!(
            row.handle_action(Action::ActivateReference).unwrap(),
            Some(RowEvent::Navigate { column: 3 })
        );
        assert_eq!(row.feature_at(3), Some("city"));

        row.handle_action(Action::NextReference).unwrap();
        assert_eq!(row.reference_cursor(), Some(0));
        row.handle_action(Action::PrevReference).unwrap();
        assert_eq!(row.reference_cursor(), Some(1));
    }

    #[test]
    fn test_reference_uses_mapping_over_feature_order() {
        let (set, _) = features();
        let mapping: FeatureIdMapping = [("age", 3)].into_iter().collect();
        let mut props = RowProps::new(impute_action(), set, Arc::new(mapping), 0);
        props.capabilities = RowCapabilities::all();
        let mut row = ActionRow::new(props, RowStyle::default());
        assert_eq!(row.feature_at(3), Some("city"));

        row.handle_action(Action::NextReference).unwrap();
        assert_eq!(
            row.handle_action(Action::ActivateReference).unwrap(),
            Some(RowEvent::Navigate { column: 3 })
        );
    }

    #[test]
    fn test_edit_and_save_through_editor() {
        let mut row = row_with(impute_action(), RowCapabilities::all());
        press(&mut row, KeyCode::Char('e'), KeyModifiers::NONE);
        assert_eq!(row.mode(), RowMode::Editing);
        assert!(matches!(row.compose().content, RowContent::Editor(_)));

        // plain keys go to the editor, not to the row bindings
        assert_eq!(press(&mut row, KeyCode::Char('x'), KeyModifiers::NONE), None);
        assert_eq!(row.mode(), RowMode::Editing);
        press(&mut row, KeyCode::Backspace, KeyModifiers::NONE);

        let event = press(&mut row, KeyCode::Char('s'), KeyModifiers::CONTROL);
        match event {
            Some(RowEvent::SaveAction(request)) => {
                assert_eq!(request.action_payload, *impute_action().payload);
            }
            other => panic!("expected save, got {other:?}"),
        }
        // saving keeps the row in edit mode
        assert_eq!(row.mode(), RowMode::Editing);

        press(&mut row, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(row.mode(), RowMode::View);
    }

    #[test]
    fn test_new_payload_resets_draft_while_editing() {
        let mut row = row_with(impute_action(), RowCapabilities::all());
        row.handle_action(Action::ToggleEdit).unwrap();

        let mut options = PayloadOptions::new();
        options.insert("strategy", "mode");
        let mut incoming = impute_action();
        incoming.payload = Arc::new(
            ActionPayload::new(ActionType::Impute, Axis::Column)
                .with_arguments(["income"])
                .with_options(options),
        );
        row.set_action(incoming.clone());

        assert_eq!(row.state().draft_payload(), &*incoming.payload);
        assert_eq!(row.mode(), RowMode::Editing);
        assert_eq!(row.header().to_plain_text(), "Fill in missing values: income");

        let event = press(&mut row, KeyCode::Char('s'), KeyModifiers::CONTROL);
        let Some(RowEvent::SaveAction(request)) = event else {
            panic!("expected save");
        };
        assert_eq!(
            request.action_payload.options.unwrap().get("strategy"),
            Some(&OptionValue::Text("mode".into()))
        );
    }

    #[test]
    fn test_render_header_and_options() {
        let mut row = row_with(impute_action(), RowCapabilities::all());
        let screen = draw(&mut row, 80);
        let lines: Vec<&str> = screen.lines().collect();
        assert!(lines[0].starts_with("[Apply] 3. Fill in missing values: age, zip, city"));
        assert!(lines[0].ends_with("[e] edit [x] dismiss"));
        assert_eq!(lines[1], "strategy: median");
    }

    #[test]
    fn test_render_title_without_arguments_has_no_colon() {
        let action = TransformerAction::new(
            "Remove duplicate rows",
            ActionPayload::new(ActionType::DropDuplicate, Axis::Row),
        );
        let mut row = row_with(action, RowCapabilities::default());
        let screen = draw(&mut row, 40);
        assert_eq!(screen.lines().next(), Some("3. Remove duplicate rows"));
    }

    #[test]
    fn test_render_message_over_code() {
        let action = TransformerAction::new(
            "Remove outliers",
            ActionPayload::new(ActionType::Filter, Axis::Row)
                .with_arguments(["income"])
                .with_code("income <= 310.5 and income >= -10.5"),
        )
        .with_message("Remove 4 outlier(s) to reduce the amount of noise in this column.");
        let mut row = row_with(action, RowCapabilities::default());
        let screen = draw(&mut row, 100);
        assert!(screen.contains("Remove 4 outlier(s)"));
        assert!(!screen.contains("income <= 310.5"));
    }

    #[test]
    fn test_render_code_when_alone() {
        let action = TransformerAction::new(
            "Remove outliers",
            ActionPayload::new(ActionType::Filter, Axis::Row)
                .with_arguments(["income"])
                .with_code("income <= 310.5"),
        );
        let mut row = row_with(action, RowCapabilities::default());
        let screen = draw(&mut row, 60);
        assert!(screen.contains("1 income <= 310.5"));
    }

    #[test]
    fn test_code_height_is_known_before_first_frame() {
        let action = TransformerAction::new(
            "Reformat dates",
            ActionPayload::new(ActionType::Reformat, Axis::Column)
                .with_arguments(["income"])
                .with_code("a = 1\nb = 2\nc = 3"),
        );
        let mut row = row_with(action, RowCapabilities::default());
        assert_eq!(row.code_viewer_state(), ViewerLoadState::Ready);
        assert_eq!(row.height(60), 4);

        let screen = draw(&mut row, 60);
        assert_eq!(row.height(60), 4);
        assert!(screen.contains("3 c = 3"));
    }

    #[test]
    fn test_height_includes_border() {
        let mut row = row_with(impute_action(), RowCapabilities::default());
        assert_eq!(row.height(80), 2);
        row.props.border = true;
        assert_eq!(row.height(80), 3);
    }
}
