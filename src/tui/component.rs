use crate::tui::action::Action;
use crate::tui::event::RowEvent;
use color_eyre::Result;
use ratatui::{layout::Rect, Frame};

/// Base trait for all TUI components
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(Some(event)) when the action produced a request for the parent,
    /// Ok(None) when it was consumed or ignored.
    fn handle_action(&mut self, action: Action) -> Result<Option<RowEvent>>;

    /// Render the component within the given area
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Actions this component currently responds to
    ///
    /// Feeds the key hints shown in the status bar.
    fn supported_actions(&self) -> Vec<Action>;

    /// Get component name for debugging/logging
    fn name(&self) -> &str;

    /// Update component state (called on every tick)
    fn update(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Components that can receive keyboard focus
pub trait Focusable: Component {
    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);
}
