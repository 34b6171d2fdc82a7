//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which surface currently receives keys
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Screen {
    #[default]
    List,
    Editor,
    Detail,
}

/// Field focused inside the editor dialog
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum EditorField {
    #[default]
    Title,
    Body,
}

impl EditorField {
    pub fn next(&self) -> EditorField {
        match self {
            EditorField::Title => EditorField::Body,
            EditorField::Body => EditorField::Title,
        }
    }

    pub fn prev(&self) -> EditorField {
        // Two fields, so prev and next coincide
        self.next()
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // List navigation
    SelectPrev,
    SelectNext,
    SelectFirst,
    SelectLast,

    // Row actions
    AddBook,
    EditSelected,
    ShowSelected,
    DeleteSelected,
    Reload,

    // Editor dialog
    EditorChar(char),
    EditorBackspace,
    EditorCursorLeft,
    EditorCursorRight,
    EditorNextField,
    EditorPrevField,
    EditorEnter,
    EditorSave,
    EditorCancel,

    // Detail dialog
    CloseDetail,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    /// Ignored while a dialog is open
    Quit,
    /// Ctrl+C, quits from anywhere
    ForceQuit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, screen: Screen, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global Ctrl shortcuts
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(UiEvent::ForceQuit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match screen {
        Screen::List => handle_list_keys(key),
        Screen::Editor => handle_editor_keys(key, ctrl),
        Screen::Detail => handle_detail_keys(key),
    }
}

fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Home | KeyCode::Char('g') => Some(UiEvent::SelectFirst),
        KeyCode::End | KeyCode::Char('G') => Some(UiEvent::SelectLast),
        KeyCode::Char('a') => Some(UiEvent::AddBook),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditSelected),
        KeyCode::Char('v') | KeyCode::Char(' ') => Some(UiEvent::ShowSelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        _ => None,
    }
}

fn handle_editor_keys(key: KeyEvent, ctrl: bool) -> Option<UiEvent> {
    if ctrl {
        return match key.code {
            KeyCode::Char('s') => Some(UiEvent::EditorSave),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(UiEvent::EditorCancel),
        KeyCode::Tab => Some(UiEvent::EditorNextField),
        KeyCode::BackTab => Some(UiEvent::EditorPrevField),
        KeyCode::Left => Some(UiEvent::EditorCursorLeft),
        KeyCode::Right => Some(UiEvent::EditorCursorRight),
        KeyCode::Backspace => Some(UiEvent::EditorBackspace),
        KeyCode::Enter => Some(UiEvent::EditorEnter),
        KeyCode::Char(c) => Some(UiEvent::EditorChar(c)),
        _ => None,
    }
}

fn handle_detail_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(UiEvent::CloseDetail),
        _ => None,
    }
}
