//! Command handlers - list view behaviour for UI events and network responses

use crate::app::editor::EditorDialog;
use crate::app::state::{AppState, Dialog};
use crate::constants::SAVE_FAILED_MESSAGE;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Book, EditorTarget, Operation};

impl AppState {
    // ========================
    // Fetching
    // ========================

    /// Initial load. Issued once when the screen starts.
    pub fn mount(&mut self) -> NetworkCommand {
        self.fetch()
    }

    pub fn reload(&mut self) -> Option<NetworkCommand> {
        if !matches!(self.dialog, Dialog::None) {
            return None;
        }
        Some(self.fetch())
    }

    fn fetch(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_fetch = Some(id);
        tracing::debug!(id, "Fetching books");
        NetworkCommand::FetchBooks { id }
    }

    // ========================
    // Navigation
    // ========================

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.books.len() {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.books.len().saturating_sub(1);
    }

    // ========================
    // Row actions
    // ========================

    pub fn add_book(&mut self) {
        if matches!(self.dialog, Dialog::None) {
            self.dialog = Dialog::Editor(EditorDialog::open(EditorTarget::Draft, &Book::draft()));
        }
    }

    pub fn edit_selected(&mut self) {
        if !matches!(self.dialog, Dialog::None) {
            return;
        }
        if let Some(book) = self.selected_book() {
            let editor = EditorDialog::open(EditorTarget::Existing(book.id), book);
            self.dialog = Dialog::Editor(editor);
        }
    }

    /// Open the detail dialog. Reads local state only.
    pub fn show_selected(&mut self) {
        if !matches!(self.dialog, Dialog::None) {
            return;
        }
        if let Some(book) = self.selected_book() {
            self.dialog = Dialog::Detail(book.id);
        }
    }

    pub fn close_detail(&mut self) {
        if matches!(self.dialog, Dialog::Detail(_)) {
            self.dialog = Dialog::None;
        }
    }

    /// Delete right away, no confirmation step
    pub fn delete_selected(&mut self) -> Option<NetworkCommand> {
        if !matches!(self.dialog, Dialog::None) {
            return None;
        }
        let book_id = self.selected_book()?.id;
        let id = self.next_id();
        tracing::debug!(id, book_id, "Deleting book");
        Some(NetworkCommand::DeleteBook { id, book_id })
    }

    // ========================
    // Editor dialog
    // ========================

    pub fn editor_char(&mut self, c: char) {
        if let Some(editor) = self.editor_mut() {
            editor.enter_char(c);
        }
    }

    pub fn editor_backspace(&mut self) {
        if let Some(editor) = self.editor_mut() {
            editor.delete_char();
        }
    }

    pub fn editor_cursor_left(&mut self) {
        if let Some(editor) = self.editor_mut() {
            editor.move_cursor_left();
        }
    }

    pub fn editor_cursor_right(&mut self) {
        if let Some(editor) = self.editor_mut() {
            editor.move_cursor_right();
        }
    }

    pub fn editor_next_field(&mut self) {
        if let Some(editor) = self.editor_mut() {
            editor.next_field();
        }
    }

    pub fn editor_prev_field(&mut self) {
        if let Some(editor) = self.editor_mut() {
            editor.prev_field();
        }
    }

    pub fn editor_enter(&mut self) {
        if let Some(editor) = self.editor_mut() {
            editor.enter();
        }
    }

    /// Turn the editor's save into a create or update call.
    /// Returns None while a save from this dialog is still in flight.
    pub fn save_editor(&mut self) -> Option<NetworkCommand> {
        if self.editor()?.is_saving() {
            return None;
        }
        let id = self.next_id();
        let request = self.editor_mut()?.begin_save(id)?;

        let cmd = match request.target {
            EditorTarget::Draft => {
                tracing::debug!(id, "Creating book");
                NetworkCommand::CreateBook {
                    id,
                    payload: request.payload,
                }
            }
            EditorTarget::Existing(book_id) => {
                tracing::debug!(id, book_id, "Updating book");
                NetworkCommand::UpdateBook {
                    id,
                    book_id,
                    payload: request.payload,
                }
            }
        };
        Some(cmd)
    }

    /// Close without saving. A save already in flight still lands in the list.
    pub fn cancel_editor(&mut self) {
        if matches!(self.dialog, Dialog::Editor(_)) {
            self.dialog = Dialog::None;
        }
    }

    /// Close the editor if the save `request_id` came from it
    fn close_editor_for(&mut self, request_id: u64) -> bool {
        let owns = self.editor().is_some_and(|e| e.owns_save(request_id));
        if owns {
            self.dialog = Dialog::None;
        }
        owns
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    /// A plain quit only ends the session from the list, so an open draft
    /// is never dropped by a key mapped against a stale screen
    pub fn accepts_quit(&self) -> bool {
        self.dialog == Dialog::None
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::BooksFetched { id, books } => {
                if self.pending_fetch != Some(id) {
                    tracing::debug!(id, "Ignoring superseded fetch");
                    return;
                }
                tracing::info!(id, count = books.len(), "Books loaded");
                self.pending_fetch = None;
                self.books = books;
                self.last_synced = Some(chrono::Local::now());
                self.clamp_selection();
            }
            NetworkResponse::BookCreated { id, book } => {
                tracing::info!(id, book_id = book.id, "Book created");
                let index = match self.books.iter().position(|b| b.id == book.id) {
                    // A reload may already have brought the record in
                    Some(index) => {
                        self.books[index] = book;
                        index
                    }
                    None => {
                        self.books.push(book);
                        self.books.len() - 1
                    }
                };
                if self.close_editor_for(id) {
                    self.selected = index;
                }
            }
            NetworkResponse::BookUpdated { id, book_id, payload } => {
                tracing::info!(id, book_id, "Book updated");
                if let Some(book) = self.books.iter_mut().find(|b| b.id == book_id) {
                    book.apply(&payload);
                }
                self.close_editor_for(id);
            }
            NetworkResponse::BookDeleted { id, book_id } => {
                tracing::info!(id, book_id, "Book deleted");
                self.books.retain(|b| b.id != book_id);
                if self.dialog == Dialog::Detail(book_id) {
                    self.dialog = Dialog::None;
                }
                self.clamp_selection();
            }
            NetworkResponse::Failed { id, op, message } => self.handle_failure(id, op, &message),
        }
    }

    fn handle_failure(&mut self, id: u64, op: Operation, message: &str) {
        match op {
            Operation::List => {
                tracing::error!(id, %message, "Error fetching books");
                if self.pending_fetch == Some(id) {
                    self.pending_fetch = None;
                }
            }
            Operation::Create | Operation::Update => {
                tracing::error!(id, op = op.as_str(), %message, "Error saving book");
                if let Some(editor) = self.editor_mut() {
                    editor.save_failed(id, SAVE_FAILED_MESSAGE);
                }
            }
            Operation::Delete => {
                // The row stays; nothing is shown to the user
                tracing::warn!(id, %message, "Error deleting book");
            }
        }
    }
}
