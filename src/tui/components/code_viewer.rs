//! Read-only code viewer, loaded lazily per row.
//!
//! The viewer itself comes from a [`CodeViewerProvider`]. A [`CodeViewerSlot`]
//! starts the load the first time code has to be shown and polls it without
//! blocking, so a slow provider only delays its own row.

use crate::core::ActionRowError;
use crate::tui::style::RowStyle;
use futures::future::BoxFuture;
use futures::FutureExt;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// A loaded code viewer
pub trait CodeView: Send {
    fn render(&self, code: &str, frame: &mut Frame, area: Rect, style: &RowStyle);

    /// Lines needed to show `code` at `width` columns
    fn height(&self, code: &str, width: u16) -> u16;
}

pub type CodeViewFuture = BoxFuture<'static, Result<Box<dyn CodeView>, ActionRowError>>;

/// Source of code viewers
pub trait CodeViewerProvider: Send + Sync {
    fn load(&self) -> CodeViewFuture;
}

/// Line-numbered, non-wrapping viewer
#[derive(Debug, Clone)]
pub struct NumberedCodeView {
    pub max_lines: u16,
}

impl Default for NumberedCodeView {
    fn default() -> Self {
        Self { max_lines: 10 }
    }
}

impl CodeView for NumberedCodeView {
    fn render(&self, code: &str, frame: &mut Frame, area: Rect, style: &RowStyle) {
        let total = code.lines().count().max(1);
        let gutter = total.to_string().len();
        let lines: Vec<Line> = code
            .lines()
            .enumerate()
            .map(|(i, text)| {
                Line::from(vec![
                    Span::styled(format!("{:>gutter$} ", i + 1), style.line_number_style()),
                    Span::styled(text.to_string(), style.code_style()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn height(&self, code: &str, _width: u16) -> u16 {
        (code.lines().count() as u16).clamp(1, self.max_lines)
    }
}

/// Resolves immediately to a [`NumberedCodeView`]
#[derive(Debug, Clone, Default)]
pub struct BuiltinCodeViewerProvider {
    pub max_lines: u16,
}

impl CodeViewerProvider for BuiltinCodeViewerProvider {
    fn load(&self) -> CodeViewFuture {
        let view = NumberedCodeView {
            max_lines: if self.max_lines == 0 { 10 } else { self.max_lines },
        };
        futures::future::ready(Ok(Box::new(view) as Box<dyn CodeView>)).boxed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerLoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

pub struct CodeViewerSlot {
    provider: Arc<dyn CodeViewerProvider>,
    pending: Option<CodeViewFuture>,
    view: Option<Box<dyn CodeView>>,
    failure: Option<String>,
}

impl CodeViewerSlot {
    pub fn new(provider: Arc<dyn CodeViewerProvider>) -> Self {
        Self {
            provider,
            pending: None,
            view: None,
            failure: None,
        }
    }

    pub fn state(&self) -> ViewerLoadState {
        match (&self.view, &self.failure, &self.pending) {
            (Some(_), _, _) => ViewerLoadState::Ready,
            (None, Some(reason), _) => ViewerLoadState::Failed(reason.clone()),
            (None, None, Some(_)) => ViewerLoadState::Loading,
            (None, None, None) => ViewerLoadState::Idle,
        }
    }

    /// Start loading if nothing has been requested yet
    pub fn request(&mut self) {
        if self.state() == ViewerLoadState::Idle {
            debug!("loading code viewer");
            self.pending = Some(self.provider.load());
        }
    }

    /// Check the pending load once; returns true when it settled
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        match pending.now_or_never() {
            Some(Ok(view)) => {
                self.view = Some(view);
                self.pending = None;
                true
            }
            Some(Err(e)) => {
                warn!("code viewer failed to load: {e}");
                self.failure = Some(e.to_string());
                self.pending = None;
                true
            }
            None => false,
        }
    }

    pub fn height(&self, code: &str, width: u16) -> u16 {
        match &self.view {
            Some(view) => view.height(code, width),
            None if self.failure.is_some() => {
                // raw code plus a title line
                (code.lines().count() as u16).max(1) + 1
            }
            None => 1,
        }
    }

    pub fn render(&mut self, code: &str, frame: &mut Frame, area: Rect, style: &RowStyle) {
        self.request();
        self.poll();

        if let Some(view) = &self.view {
            view.render(code, frame, area, style);
            return;
        }

        if let Some(reason) = &self.failure {
            let block = Block::default()
                .borders(Borders::TOP)
                .title(format!("code (viewer unavailable: {reason})"))
                .border_style(style.error_style());
            let raw = Paragraph::new(code.to_string())
                .style(style.code_style())
                .block(block)
                .wrap(Wrap { trim: false });
            frame.render_widget(raw, area);
            return;
        }

        let placeholder = Paragraph::new("Loading code viewer...").style(style.muted_style());
        frame.render_widget(placeholder, area);
    }
}
