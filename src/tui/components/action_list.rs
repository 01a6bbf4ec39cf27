use crate::core::{FeatureIdMapping, FeatureSet, Suggestions, TransformerAction};
use crate::tui::components::action_row::{ActionRow, RowCapabilities, RowProps};
use crate::tui::components::code_viewer::CodeViewerProvider;
use crate::tui::{Action, Component, Focusable, KeyBindings, RowEvent, RowStyle};
use color_eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A row whose apply is in flight; it stays busy until a frame has shown that
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingApply {
    index: usize,
    drawn: bool,
}

/// Scrollable list of suggested actions
///
/// Owns the rows and answers their events: saves replace the row's payload,
/// dismissals remove the row, applies and navigation report on the status line.
pub struct ActionList {
    features: Arc<FeatureSet>,
    feature_id_mapping: Arc<FeatureIdMapping>,
    rows: Vec<ActionRow>,
    selected: usize,
    offset: usize,
    pending_apply: Vec<PendingApply>,
    keybindings: KeyBindings,
    style: RowStyle,
    status: Option<String>,
    should_quit: bool,
}

impl ActionList {
    pub fn new(suggestions: Suggestions, style: RowStyle, keybindings: KeyBindings) -> Self {
        let mapping = Arc::new(suggestions.mapping());
        let features = Arc::new(suggestions.features);
        let rows = suggestions
            .actions
            .into_iter()
            .enumerate()
            .map(|(idx, action)| {
                let mut props = RowProps::new(action, features.clone(), mapping.clone(), idx);
                props.capabilities = RowCapabilities::all();
                let mut row = ActionRow::new(props, style.clone());
                row.set_keybindings(keybindings.clone());
                row
            })
            .collect();

        let mut list = Self {
            features,
            feature_id_mapping: mapping,
            rows,
            selected: 0,
            offset: 0,
            pending_apply: Vec::new(),
            keybindings,
            style,
            status: None,
            should_quit: false,
        };
        list.sync_focus();
        list
    }

    /// Show the `N.` label on every row
    pub fn with_show_idx(mut self, show_idx: bool) -> Self {
        for row in &mut self.rows {
            row.set_show_idx(show_idx);
        }
        self
    }

    /// Draw a separator under every row
    pub fn with_border(mut self, border: bool) -> Self {
        for row in &mut self.rows {
            row.set_border(border);
        }
        self
    }

    pub fn with_code_viewer(mut self, provider: Arc<dyn CodeViewerProvider>) -> Self {
        for row in &mut self.rows {
            row.set_code_viewer_provider(provider.clone());
        }
        self
    }

    pub fn with_capabilities(mut self, capabilities: RowCapabilities) -> Self {
        for row in &mut self.rows {
            row.set_capabilities(capabilities);
        }
        self
    }

    pub fn rows(&self) -> &[ActionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&ActionRow> {
        self.rows.get(self.selected)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current actions, saved edits included
    pub fn actions(&self) -> Vec<TransformerAction> {
        self.rows.iter().map(|row| row.action().clone()).collect()
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    /// Key hints for the selected row, then quit unless the row is editing
    pub fn key_hints(&self) -> String {
        let mut hints = self
            .selected_row()
            .map(ActionRow::key_hints)
            .unwrap_or_default();
        let editing = self
            .selected_row()
            .is_some_and(|row| row.state().is_editing());
        if !editing {
            if let Some(key) = self.keybindings.hint_for(Action::Quit) {
                hints.push(format!("[{key}] {}", Action::Quit.description()));
            }
        }
        hints.join("  ")
    }

    fn sync_focus(&mut self) {
        let selected = self.selected;
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.set_focused(i == selected);
        }
    }

    fn select(&mut self, index: usize) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        self.selected = index.min(self.rows.len() - 1);
        self.sync_focus();
    }

    /// Handle a key event
    ///
    /// A row in edit mode receives every key; otherwise list actions are
    /// handled here and the rest go to the selected row.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let editing = self
            .rows
            .get(self.selected)
            .is_some_and(|row| row.state().is_editing());
        if !editing {
            match self.keybindings.get_action(&key) {
                Some(Action::Quit) => {
                    self.should_quit = true;
                    return Ok(());
                }
                Some(Action::MoveUp) => {
                    self.select(self.selected.saturating_sub(1));
                    return Ok(());
                }
                Some(Action::MoveDown) => {
                    self.select(self.selected + 1);
                    return Ok(());
                }
                _ => {}
            }
        }

        let selected = self.selected;
        let Some(row) = self.rows.get_mut(selected) else {
            return Ok(());
        };
        if let Some(event) = row.handle_key_event(key)? {
            self.handle_row_event(selected, event);
        }
        Ok(())
    }

    pub fn handle_row_event(&mut self, index: usize, event: RowEvent) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        let title = row.action().title.clone();
        match event {
            RowEvent::Apply => {
                info!(%title, "applying action");
                row.set_loading(true);
                if !self.pending_apply.iter().any(|p| p.index == index) {
                    self.pending_apply.push(PendingApply {
                        index,
                        drawn: false,
                    });
                }
                self.status = Some(format!("Applying '{title}'..."));
            }
            RowEvent::SaveAction(request) => {
                let mut action = row.action().clone();
                action.payload = Arc::new(request.action_payload);
                row.set_action(action);
                self.status = Some(format!("Saved '{title}'"));
            }
            RowEvent::Close => {
                info!(%title, "dismissing action");
                self.rows.remove(index);
                self.pending_apply.retain(|p| p.index != index);
                for pending in &mut self.pending_apply {
                    if pending.index > index {
                        pending.index -= 1;
                    }
                }
                for (i, row) in self.rows.iter_mut().enumerate().skip(index) {
                    row.set_idx(i);
                }
                self.select(self.selected);
                self.status = Some(format!("Dismissed '{title}'"));
            }
            RowEvent::Navigate { column } => match row.feature_at(column) {
                Some(feature) => {
                    debug!(column, %feature, "navigate requested");
                    self.status = Some(format!("Go to column {column} ({feature})"));
                }
                None => {
                    warn!(column, "navigate requested for a column outside the feature set");
                    self.status = Some(format!("Column {column} is not a known feature"));
                }
            },
        }
    }

    /// Called on every tick; finishes applies whose busy state has been drawn
    pub fn update(&mut self) -> Result<()> {
        let (finished, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_apply)
            .into_iter()
            .partition(|p| p.drawn);
        self.pending_apply = waiting;
        for pending in finished {
            if let Some(row) = self.rows.get_mut(pending.index) {
                row.set_loading(false);
                self.status = Some(format!("Applied '{}'", row.action().title));
            }
        }
        for row in &mut self.rows {
            row.update()?;
        }
        Ok(())
    }

    /// First row index to draw so the selection stays on screen
    fn scroll_to_selection(&mut self, width: u16, height: u16) {
        if self.selected < self.offset {
            self.offset = self.selected;
            return;
        }
        loop {
            let used: u16 = self.rows[self.offset..=self.selected]
                .iter()
                .map(|row| row.height(width))
                .sum();
            if used <= height || self.offset == self.selected {
                break;
            }
            self.offset += 1;
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let list_area = chunks[0];

        if self.rows.is_empty() {
            let empty = Paragraph::new("No suggested actions").style(self.style.muted_style());
            frame.render_widget(empty, list_area);
        } else {
            self.scroll_to_selection(list_area.width, list_area.height);
            let mut y = list_area.y;
            let bottom = list_area.y + list_area.height;
            for row in self.rows.iter_mut().skip(self.offset) {
                if y >= bottom {
                    break;
                }
                let height = row.height(list_area.width).min(bottom - y);
                row.render(frame, Rect::new(list_area.x, y, list_area.width, height));
                y += height;
            }
        }

        let mut status = self.status.clone().unwrap_or_else(|| {
            format!(
                "{} suggested action(s), {} feature(s)",
                self.rows.len(),
                self.features.len()
            )
        });
        let hints = self.key_hints();
        if !hints.is_empty() {
            status = format!("{status}  {hints}");
        }
        for pending in &mut self.pending_apply {
            pending.drawn = true;
        }
        frame.render_widget(
            Paragraph::new(status).style(self.style.muted_style()),
            chunks[1],
        );
    }

    pub fn feature_id_mapping(&self) -> &FeatureIdMapping {
        &self.feature_id_mapping
    }
}
