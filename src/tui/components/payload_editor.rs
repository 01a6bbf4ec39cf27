use crate::core::{ActionPayload, ActionRowError, PayloadPatch};
use crate::tui::style::RowStyle;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

const MAX_EDITOR_LINES: u16 = 12;

/// What an editor reports back to its row
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The draft was replaced by the editor's current payload
    DraftChanged(ActionPayload),
    /// The user asked to save, with the given override
    Save(PayloadPatch),
}

/// Inline editor for a row's payload
///
/// The row seeds it with the draft and forwards key events while editing.
/// Validation is the editor's own business; the row passes results through.
pub trait PayloadEditor {
    fn seed(&mut self, payload: &ActionPayload);

    fn handle_key_event(&mut self, key: KeyEvent) -> Option<EditorEvent>;

    fn render(&mut self, frame: &mut Frame, area: Rect, style: &RowStyle);

    /// Rows the editor wants, borders included
    fn height(&self) -> u16;
}

/// Edits the payload as pretty-printed JSON
pub struct JsonPayloadEditor {
    textarea: TextArea<'static>,
    error: Option<String>,
}

impl Default for JsonPayloadEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonPayloadEditor {
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            error: None,
        }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn parse_patch(&self) -> Result<PayloadPatch, ActionRowError> {
        Ok(serde_json::from_str(&self.text())?)
    }

    fn parse_payload(&self) -> Result<ActionPayload, ActionRowError> {
        Ok(serde_json::from_str(&self.text())?)
    }
}

impl PayloadEditor for JsonPayloadEditor {
    fn seed(&mut self, payload: &ActionPayload) {
        let json = serde_json::to_string_pretty(payload).unwrap_or_default();
        self.textarea = TextArea::new(json.lines().map(str::to_string).collect());
        self.error = None;
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Option<EditorEvent> {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return match self.parse_patch() {
                Ok(patch) => {
                    self.error = None;
                    Some(EditorEvent::Save(patch))
                }
                Err(e) => {
                    self.error = Some(e.to_string());
                    None
                }
            };
        }

        if !self.textarea.input(key) {
            return None;
        }
        match self.parse_payload() {
            Ok(payload) => {
                self.error = None;
                Some(EditorEvent::DraftChanged(payload))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, style: &RowStyle) {
        let error_height = u16::from(self.error.is_some());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(error_height)])
            .split(area);

        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title("Edit payload (Ctrl+s: save)")
                .border_style(style.border_style()),
        );
        self.textarea.set_line_number_style(style.line_number_style());
        frame.render_widget(&self.textarea, chunks[0]);

        if let Some(error) = &self.error {
            let message = Paragraph::new(error.as_str()).style(style.error_style());
            frame.render_widget(message, chunks[1]);
        }
    }

    fn height(&self) -> u16 {
        let lines = self.textarea.lines().len() as u16;
        lines.clamp(1, MAX_EDITOR_LINES) + 2 + u16::from(self.error.is_some())
    }
}
