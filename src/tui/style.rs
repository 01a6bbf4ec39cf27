use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Named palette selectable from config
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

/// Colors used to draw an action row
///
/// Passed explicitly into each row; the row never looks styles up on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct RowStyle {
    pub name: String,

    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub selected_bg: Color,

    pub title: Color,
    pub reference: Color,
    pub code_fg: Color,
    pub line_number: Color,

    pub apply: Color,
    pub dismiss: Color,
    pub busy: Color,
    pub error: Color,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self::dark()
    }
}

impl RowStyle {
    /// Default dark palette
    pub fn dark() -> Self {
        Self {
            name: "Default Dark".to_string(),
            foreground: Color::Gray,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            selected_bg: Color::Rgb(25, 25, 35),
            title: Color::White,
            reference: Color::Cyan,
            code_fg: Color::LightGreen,
            line_number: Color::DarkGray,
            apply: Color::Green,
            dismiss: Color::Red,
            busy: Color::Yellow,
            error: Color::Red,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            foreground: Color::Black,
            muted: Color::Gray,
            border: Color::Gray,
            selected_bg: Color::Rgb(235, 235, 245),
            title: Color::Black,
            reference: Color::Blue,
            code_fg: Color::Rgb(0, 110, 0),
            line_number: Color::Gray,
            apply: Color::Rgb(0, 130, 0),
            dismiss: Color::Rgb(180, 0, 0),
            busy: Color::Rgb(200, 150, 0),
            error: Color::Red,
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn reference_style(&self) -> Style {
        Style::default()
            .fg(self.reference)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn focused_reference_style(&self) -> Style {
        self.reference_style().add_modifier(Modifier::REVERSED)
    }

    pub fn code_style(&self) -> Style {
        Style::default().fg(self.code_fg)
    }

    pub fn line_number_style(&self) -> Style {
        Style::default().fg(self.line_number)
    }

    pub fn apply_style(&self) -> Style {
        Style::default().fg(self.apply).add_modifier(Modifier::BOLD)
    }

    pub fn dismiss_style(&self) -> Style {
        Style::default().fg(self.dismiss)
    }

    pub fn busy_style(&self) -> Style {
        Style::default().fg(self.busy)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }
}
