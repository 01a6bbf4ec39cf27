use crate::tui::action::Action;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Maps KeyEvents to Actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(rename = "bindings")]
    bindings_list: Vec<KeyBinding>,

    #[serde(skip)]
    bindings_map: HashMap<KeyPattern, Action>,
}

/// Single keybinding entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings_list = vec![
            // List navigation
            KeyBinding::new("Up", Action::MoveUp),
            KeyBinding::new("Down", Action::MoveDown),
            KeyBinding::new("k", Action::MoveUp),
            KeyBinding::new("j", Action::MoveDown),
            // Row controls
            KeyBinding::new("a", Action::Apply),
            KeyBinding::new("e", Action::ToggleEdit),
            KeyBinding::new("Ctrl+e", Action::ToggleEdit),
            KeyBinding::new("x", Action::Dismiss),
            KeyBinding::new("Delete", Action::Dismiss),
            // Column references
            KeyBinding::new("Tab", Action::NextReference),
            KeyBinding::new("l", Action::NextReference),
            KeyBinding::new("Shift+BackTab", Action::PrevReference),
            KeyBinding::new("h", Action::PrevReference),
            KeyBinding::new("Enter", Action::ActivateReference),
            // Application
            KeyBinding::new("q", Action::Quit),
            KeyBinding::new("Ctrl+c", Action::Quit),
        ];

        Self::from_list(bindings_list)
    }
}

impl KeyBindings {
    fn from_list(bindings_list: Vec<KeyBinding>) -> Self {
        let bindings_map = Self::build_map(&bindings_list);
        Self {
            bindings_list,
            bindings_map,
        }
    }

    /// Build hashmap from bindings list
    fn build_map(bindings: &[KeyBinding]) -> HashMap<KeyPattern, Action> {
        bindings
            .iter()
            .filter_map(|b| {
                KeyPattern::from_string(&b.key)
                    .ok()
                    .map(|pattern| (pattern, b.action))
            })
            .collect()
    }

    /// Get action for key event
    pub fn get_action(&self, key: &KeyEvent) -> Option<Action> {
        let pattern = KeyPattern::from_event(key);
        self.bindings_map.get(&pattern).copied()
    }

    /// Load from JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let bindings: KeyBindings = serde_json::from_str(&content)?;
        Ok(Self::from_list(bindings.bindings_list))
    }

    /// Get all bindings for an action (for help display)
    pub fn get_keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings_list
            .iter()
            .filter(|b| b.action == action)
            .map(|b| b.key.clone())
            .collect()
    }

    /// First key bound to an action, used for inline hints like `[e]dit`
    pub fn hint_for(&self, action: Action) -> Option<String> {
        self.get_keys_for_action(action).into_iter().next()
    }

    /// First Ctrl-modified key bound to an action; only these reach a row in edit mode
    pub fn ctrl_hint_for(&self, action: Action) -> Option<String> {
        self.get_keys_for_action(action)
            .into_iter()
            .find(|k| k.to_lowercase().starts_with("ctrl+"))
    }

    /// Validate bindings and return warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut seen_keys: HashMap<&str, Action> = HashMap::new();
        for binding in &self.bindings_list {
            if let Some(existing_action) = seen_keys.get(binding.key.as_str()) {
                warnings.push(format!(
                    "Duplicate key '{}': bound to both {:?} and {:?}",
                    binding.key, existing_action, binding.action
                ));
            } else {
                seen_keys.insert(&binding.key, binding.action);
            }
        }

        let bound: HashSet<Action> = self.bindings_list.iter().map(|b| b.action).collect();
        for action in Action::all() {
            if !bound.contains(&action) {
                warnings.push(format!("{:?} has no keybinding", action));
            }
        }

        for binding in &self.bindings_list {
            if let Err(e) = KeyPattern::from_string(&binding.key) {
                warnings.push(format!(
                    "Invalid key pattern '{}' for action {:?}: {}",
                    binding.key, binding.action, e
                ));
            }
        }

        warnings
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

impl KeyPattern {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Parse from string (e.g., "Ctrl+e", "Shift+BackTab", "x")
    pub fn from_string(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split('+').collect();
        let (modifier_parts, key_part) = match parts.split_last() {
            Some((key, mods)) if !key.is_empty() => (mods, *key),
            // a lone "+" splits into two empty parts
            _ => (&[][..], s),
        };

        let mut modifiers = KeyModifiers::empty();
        for part in modifier_parts {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            _ if key_part.chars().count() == 1 => {
                let ch = key_part.chars().next().unwrap_or_default();
                if ch.is_uppercase() {
                    modifiers |= KeyModifiers::SHIFT;
                }
                KeyCode::Char(ch)
            }
            _ => return Err(format!("Unknown key: {}", key_part)),
        };

        Ok(Self { code, modifiers })
    }
}
