// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Move the selection in a list (negative = up)
    Select(i32),
    /// Scroll content (negative = up)
    Scroll(i32),
    /// Unlike the selected excerpt (likes list)
    Unlike,
    /// Export liked excerpts (likes list)
    Export,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Project blurb and credits
    About,
    /// Liked excerpts with unlike/export; stores the selected row
    Likes { selected: usize },
    /// Captured log entries; stores the scroll offset from the newest entry
    Logs { scroll: usize },
    /// Blocking notification, dismissed with any key
    Notice(String),
}

impl Modal {
    pub fn likes() -> Self {
        Modal::Likes { selected: 0 }
    }

    pub fn logs() -> Self {
        Modal::Logs { scroll: 0 }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Modal::Notice(message.into())
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::About => match key {
                KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('q') | KeyCode::Enter => {
                    ModalAction::Close
                }
                _ => ModalAction::None,
            },
            Modal::Likes { .. } => match key {
                KeyCode::Esc | KeyCode::Char('v') | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => ModalAction::Select(-1),
                KeyCode::Down | KeyCode::Char('j') => ModalAction::Select(1),
                KeyCode::Enter | KeyCode::Char('l') => ModalAction::Unlike,
                KeyCode::Char('x') => ModalAction::Export,
                _ => ModalAction::None,
            },
            Modal::Logs { .. } => match key {
                KeyCode::Esc | KeyCode::Char('L') | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => ModalAction::Scroll(1),
                KeyCode::Down | KeyCode::Char('j') => ModalAction::Scroll(-1),
                KeyCode::PageUp => ModalAction::Scroll(10),
                KeyCode::PageDown => ModalAction::Scroll(-10),
                _ => ModalAction::None,
            },
            Modal::Notice(_) => ModalAction::Close,
        }
    }
}
