pub mod action;
pub mod component;
pub mod components;
pub mod event;
pub mod keybindings;
pub mod style;

pub use action::Action;
pub use component::{Component, Focusable};
pub use components::{ActionList, ActionRow, RowCapabilities, RowProps};
pub use event::RowEvent;
pub use keybindings::{KeyBinding, KeyBindings, KeyPattern};
pub use style::{RowStyle, ThemeName};
