//! Keyboard event handling.
//!
//! Global keys:
//! - `Tab` / `Shift+Tab`: next / previous view
//! - `F1`..`F4`: jump to a view
//! - `Ctrl+C` or `Ctrl+Q`: quit
//! - `Up`/`Down`, `PageUp`/`PageDown`, `Home`/`End`: scroll
//! - `Left`/`Right`: scroll table columns
//!
//! Views with a text input (search, GC tool):
//! - printable keys and pasted text go to the input
//! - `Backspace`: delete the last character
//! - `Esc`: clear the input
//! - `Enter`: new line (GC tool only)
//!
//! Views without a text input (about, database, search without a dataset):
//! - `q`: quit
//! - `j`/`k`: scroll down/up, `h`/`l`: scroll left/right, `g`/`G`: top/bottom
//! - `1`..`4`: jump to a view

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::{AppState, Tab};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Switch to the next view
    NextTab,
    /// Switch to the previous view
    PreviousTab,
    /// Switch to a specific view
    SelectTab(Tab),
    /// Add character to the active input
    InputChar(char),
    /// Add pasted text to the active input
    Paste(String),
    /// Backspace in the active input
    InputBackspace,
    /// Clear the active input
    ClearInput,
    /// Scroll up one row
    ScrollUp,
    /// Scroll down one row
    ScrollDown,
    /// Scroll left one column
    ScrollLeft,
    /// Scroll right one column
    ScrollRight,
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll to the first row
    ScrollTop,
    /// Scroll to the last row
    ScrollBottom,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for terminal events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on the active view.
pub fn handle_event(event: Event, tab: Tab, accepts_input: bool) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, tab, accepts_input),
        Event::Paste(text) if accepts_input => Action::Paste(text),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the active view.
fn handle_key_event(key: KeyEvent, tab: Tab, accepts_input: bool) -> Action {
    // Ignore release/repeat reports on terminals that send them
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Tab => return Action::NextTab,
        KeyCode::BackTab => return Action::PreviousTab,
        KeyCode::F(n @ 1..=4) => return select_tab(n as usize),
        KeyCode::Up => return Action::ScrollUp,
        KeyCode::Down => return Action::ScrollDown,
        KeyCode::Left => return Action::ScrollLeft,
        KeyCode::Right => return Action::ScrollRight,
        KeyCode::PageUp => return Action::PageUp,
        KeyCode::PageDown => return Action::PageDown,
        KeyCode::Home => return Action::ScrollTop,
        KeyCode::End => return Action::ScrollBottom,
        _ => {}
    }

    if accepts_input {
        handle_input_key(key, tab)
    } else {
        handle_browse_key(key)
    }
}

/// Handles keys typed into a text input.
fn handle_input_key(key: KeyEvent, tab: Tab) -> Action {
    match key.code {
        KeyCode::Esc => Action::ClearInput,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Enter if tab == Tab::GcContent => Action::InputChar('\n'),
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handles keys in views without a text input.
fn handle_browse_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') => Action::ScrollDown,
        KeyCode::Char('k') => Action::ScrollUp,
        KeyCode::Char('h') => Action::ScrollLeft,
        KeyCode::Char('l') => Action::ScrollRight,
        KeyCode::Char('g') => Action::ScrollTop,
        KeyCode::Char('G') => Action::ScrollBottom,
        KeyCode::Char(c @ '1'..='4') => select_tab(c as usize - '0' as usize),
        _ => Action::None,
    }
}

/// Maps a 1-based view number to a tab selection.
fn select_tab(number: usize) -> Action {
    Tab::from_index(number - 1).map_or(Action::None, Action::SelectTab)
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.quit();
        }
        Action::NextTab => {
            state.next_tab();
        }
        Action::PreviousTab => {
            state.previous_tab();
        }
        Action::SelectTab(tab) => {
            state.select_tab(tab);
        }
        Action::InputChar(c) => {
            state.input_char(c);
        }
        Action::Paste(text) => {
            state.input_paste(&text);
        }
        Action::InputBackspace => {
            state.input_backspace();
        }
        Action::ClearInput => {
            state.clear_input();
        }
        Action::ScrollUp => {
            state.scroll_up(1);
        }
        Action::ScrollDown => {
            state.scroll_down(1);
        }
        Action::ScrollLeft => {
            state.scroll_left(1);
        }
        Action::ScrollRight => {
            state.scroll_right(1);
        }
        Action::PageUp => {
            state.page_up();
        }
        Action::PageDown => {
            state.page_down();
        }
        Action::ScrollTop => {
            state.scroll_to_top();
        }
        Action::ScrollBottom => {
            state.scroll_to_bottom();
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::Dataset;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tab_navigation() {
        assert_eq!(handle_key_event(key(KeyCode::Tab), Tab::About, false), Action::NextTab);
        assert_eq!(handle_key_event(key(KeyCode::BackTab), Tab::Search, true), Action::PreviousTab);
        assert_eq!(handle_key_event(key(KeyCode::F(3)), Tab::Search, true), Action::SelectTab(Tab::GcContent));
        assert_eq!(handle_key_event(key(KeyCode::F(5)), Tab::About, false), Action::None);
    }

    #[test]
    fn test_ctrl_c_quit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, Tab::GcContent, true), Action::Quit);
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_q, Tab::About, false), Action::Quit);
    }

    #[test]
    fn test_input_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), Tab::Search, true), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Char('4')), Tab::GcContent, true), Action::InputChar('4'));
        assert_eq!(handle_key_event(key(KeyCode::Backspace), Tab::Search, true), Action::InputBackspace);
        assert_eq!(handle_key_event(key(KeyCode::Esc), Tab::GcContent, true), Action::ClearInput);
    }

    #[test]
    fn test_enter_only_in_gc_input() {
        assert_eq!(handle_key_event(key(KeyCode::Enter), Tab::GcContent, true), Action::InputChar('\n'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), Tab::Search, true), Action::None);
    }

    #[test]
    fn test_browse_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), Tab::About, false), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), Tab::Database, false), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('G')), Tab::Database, false), Action::ScrollBottom);
        assert_eq!(handle_key_event(key(KeyCode::Char('2')), Tab::About, false), Action::SelectTab(Tab::Search));
        assert_eq!(handle_key_event(key(KeyCode::PageDown), Tab::Database, false), Action::PageDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), Tab::Database, false), Action::ScrollRight);
        assert_eq!(handle_key_event(key(KeyCode::Char('h')), Tab::Database, false), Action::ScrollLeft);
    }

    #[test]
    fn test_column_keys() {
        // Arrows scroll columns even while typing; letters go to the input
        assert_eq!(handle_key_event(key(KeyCode::Right), Tab::Search, true), Action::ScrollRight);
        assert_eq!(handle_key_event(key(KeyCode::Left), Tab::Search, true), Action::ScrollLeft);
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), Tab::Search, true), Action::InputChar('l'));
    }

    #[test]
    fn test_paste() {
        let paste = Event::Paste("ATGC".to_string());
        assert_eq!(handle_event(paste.clone(), Tab::GcContent, true), Action::Paste("ATGC".into()));
        assert_eq!(handle_event(paste, Tab::About, false), Action::None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(release, Tab::About, false), Action::None);
    }

    #[test]
    fn test_apply_actions() {
        let mut state = AppState::new(Arc::new(Dataset::empty()), None);
        assert!(apply_action(&mut state, Action::SelectTab(Tab::GcContent)));
        assert!(apply_action(&mut state, Action::Paste("GGCC".into())));
        assert!(apply_action(&mut state, Action::InputChar('a')));
        assert_eq!(state.gc.input, "GGCCa");
        assert_eq!(state.gc.result.clone().unwrap().unwrap().to_string(), "80.00%");

        assert!(apply_action(&mut state, Action::NextTab));
        assert_eq!(state.tab, Tab::Database);
        assert!(!apply_action(&mut state, Action::Quit));
    }
}
