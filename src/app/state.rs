//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};

use crate::app::editor::EditorDialog;
use crate::constants::DEFAULT_BASE_URL;
use crate::messages::{DialogView, RenderState};
use crate::models::{Book, BookId};

/// The one dialog that may be open over the list.
///
/// Detail holds only an id and is resolved against the collection when
/// rendering, so it can never show a stale copy.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Dialog {
    #[default]
    None,
    Detail(BookId),
    Editor(EditorDialog),
}

/// Main application state - pure data, no I/O
pub struct AppState {
    /// Authoritative in-memory collection, in display order
    pub books: Vec<Book>,
    pub selected: usize,

    pub dialog: Dialog,
    pub show_help: bool,

    pub next_request_id: u64,
    /// Latest fetch in flight; older fetch responses are dropped
    pub pending_fetch: Option<u64>,
    pub last_synced: Option<DateTime<Local>>,

    pub base_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        AppState {
            books: Vec::new(),
            selected: 0,
            dialog: Dialog::None,
            show_help: false,
            next_request_id: 1,
            pending_fetch: None,
            last_synced: None,
            base_url: base_url.into(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        self.pending_fetch.is_some()
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    pub fn find_book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn editor(&self) -> Option<&EditorDialog> {
        match &self.dialog {
            Dialog::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorDialog> {
        match &mut self.dialog {
            Dialog::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    /// Keep the row cursor inside the collection
    pub fn clamp_selection(&mut self) {
        if self.books.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.books.len() {
            self.selected = self.books.len() - 1;
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let dialog = match &self.dialog {
            Dialog::None => DialogView::None,
            Dialog::Detail(id) => self
                .find_book(*id)
                .cloned()
                .map(DialogView::Detail)
                .unwrap_or_default(),
            Dialog::Editor(editor) => DialogView::Editor(editor.clone()),
        };

        RenderState {
            books: self.books.clone(),
            selected: self.selected,
            dialog,
            show_help: self.show_help,
            is_loading: self.is_loading(),
            last_synced: self.last_synced,
            base_url: self.base_url.clone(),
        }
    }
}
