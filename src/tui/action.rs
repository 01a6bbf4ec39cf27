use serde::{Deserialize, Serialize};

/// All possible actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,

    // Row
    Apply,
    ToggleEdit,
    Dismiss,

    // References
    NextReference,
    PrevReference,
    ActivateReference,

    // Application
    Quit,
}

impl Action {
    /// Short label shown next to the key in the status bar hints
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "previous action",
            Action::MoveDown => "next action",
            Action::Apply => "apply",
            Action::ToggleEdit => "edit",
            Action::Dismiss => "dismiss",
            Action::NextReference => "next column",
            Action::PrevReference => "previous column",
            Action::ActivateReference => "go to column",
            Action::Quit => "quit",
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::Apply,
            Action::ToggleEdit,
            Action::Dismiss,
            Action::NextReference,
            Action::PrevReference,
            Action::ActivateReference,
            Action::Quit,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_actions_have_descriptions() {
        for action in Action::all() {
            assert!(!action.description().is_empty());
        }
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::ToggleEdit;
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, "\"ToggleEdit\"");

        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, action);
    }
}
