//! Editor dialog - title/body form bound to a draft or an existing book
//!
//! The dialog never talks to the network and never closes itself. Saving
//! hands a [`SaveRequest`] to the list, which issues the call and closes the
//! dialog once the call succeeds.

use crate::messages::ui_events::EditorField;
use crate::models::{Book, BookPayload, EditorTarget};

/// What the editor hands upward when the user saves
#[derive(Clone, Debug, PartialEq)]
pub struct SaveRequest {
    pub target: EditorTarget,
    pub payload: BookPayload,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditorDialog {
    pub target: EditorTarget,
    pub title: String,
    pub body: String,
    pub field: EditorField,
    /// Byte offset into the focused field
    pub cursor: usize,
    /// Request id of the save in flight
    pub pending_save: Option<u64>,
    pub error: Option<String>,
}

impl EditorDialog {
    /// Open for `book`. Fields are always re-initialized from the record.
    pub fn open(target: EditorTarget, book: &Book) -> Self {
        EditorDialog {
            target,
            title: book.title.clone(),
            body: book.body.clone(),
            field: EditorField::Title,
            cursor: book.title.len(),
            pending_save: None,
            error: None,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    pub fn current_input(&self) -> &str {
        match self.field {
            EditorField::Title => &self.title,
            EditorField::Body => &self.body,
        }
    }

    fn current_input_mut(&mut self) -> &mut String {
        match self.field {
            EditorField::Title => &mut self.title,
            EditorField::Body => &mut self.body,
        }
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
        self.cursor = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
        self.cursor = self.current_input().len();
    }

    /// Enter moves from the title to the body; inside the body it breaks the line
    pub fn enter(&mut self) {
        match self.field {
            EditorField::Title => self.next_field(),
            EditorField::Body => self.enter_char('\n'),
        }
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor > 0 {
            let new_pos = input[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor < input.len() {
            let new_pos = input[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(input.len());
            self.cursor = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor = self.cursor;
        let input = self.current_input_mut();
        if cursor <= input.len() {
            input.insert(cursor, c);
            self.cursor = cursor + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let cursor = self.cursor;
            let input = self.current_input_mut();
            let prev_pos = input[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor = prev_pos;
        }
    }

    /// Cursor as (line, column) within the focused field, in characters
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.current_input()[..self.cursor];
        let line = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|s| s.chars().count())
            .unwrap_or(0);
        (line, col)
    }

    pub fn payload(&self) -> BookPayload {
        BookPayload::new(self.title.clone(), self.body.clone())
    }

    /// Start a save tagged with `request_id`. No-op while one is in flight.
    pub fn begin_save(&mut self, request_id: u64) -> Option<SaveRequest> {
        if self.is_saving() {
            return None;
        }
        self.pending_save = Some(request_id);
        self.error = None;
        Some(SaveRequest {
            target: self.target,
            payload: self.payload(),
        })
    }

    /// Record a failed save. Returns false if `request_id` is not this dialog's save.
    pub fn save_failed(&mut self, request_id: u64, message: &str) -> bool {
        if self.pending_save != Some(request_id) {
            return false;
        }
        self.pending_save = None;
        self.error = Some(message.to_string());
        true
    }

    pub fn owns_save(&self, request_id: u64) -> bool {
        self.pending_save == Some(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Book {
        Book {
            id: 5,
            title: "Dune".into(),
            body: "Spice".into(),
            created_at: "c".into(),
            updated_at: "u".into(),
        }
    }

    #[test]
    fn test_open_initializes_from_record() {
        let editor = EditorDialog::open(EditorTarget::Existing(5), &existing());
        assert_eq!(editor.title, "Dune");
        assert_eq!(editor.body, "Spice");
        assert_eq!(editor.field, EditorField::Title);
        assert_eq!(editor.cursor, 4);
        assert!(!editor.is_saving());
    }

    #[test]
    fn test_editing_is_utf8_aware() {
        let mut editor = EditorDialog::open(EditorTarget::Draft, &Book::draft());
        editor.enter_char('本');
        editor.enter_char('a');
        editor.move_cursor_left();
        editor.move_cursor_left();
        editor.enter_char('x');
        assert_eq!(editor.title, "x本a");
        editor.move_cursor_right();
        editor.delete_char();
        assert_eq!(editor.title, "xa");
    }

    #[test]
    fn test_enter_moves_to_body_then_breaks_lines() {
        let mut editor = EditorDialog::open(EditorTarget::Draft, &Book::draft());
        editor.enter_char('T');
        editor.enter();
        assert_eq!(editor.field, EditorField::Body);
        editor.enter_char('a');
        editor.enter();
        editor.enter_char('b');
        assert_eq!(editor.title, "T");
        assert_eq!(editor.body, "a\nb");
        assert_eq!(editor.cursor_line_col(), (1, 1));
    }

    #[test]
    fn test_second_save_while_in_flight_is_noop() {
        let mut editor = EditorDialog::open(EditorTarget::Existing(5), &existing());
        let first = editor.begin_save(1).unwrap();
        assert_eq!(first.target, EditorTarget::Existing(5));
        assert_eq!(first.payload, BookPayload::new("Dune", "Spice"));
        assert!(editor.begin_save(2).is_none());
        assert_eq!(editor.pending_save, Some(1));
    }

    #[test]
    fn test_failed_save_shows_error_and_allows_retry() {
        let mut editor = EditorDialog::open(EditorTarget::Draft, &Book::draft());
        editor.begin_save(3).unwrap();
        assert!(!editor.save_failed(99, "nope"));
        assert!(editor.save_failed(3, "Failed to save."));
        assert_eq!(editor.error.as_deref(), Some("Failed to save."));
        assert!(!editor.is_saving());

        editor.begin_save(4).unwrap();
        assert!(editor.error.is_none());
    }
}
