//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::app::editor::EditorDialog;
use crate::constants::DEFAULT_BASE_URL;
use crate::messages::ui_events::Screen;
use crate::models::Book;

/// Dialog resolved against the collection, ready to draw
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogView {
    #[default]
    None,
    Detail(Book),
    Editor(EditorDialog),
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub books: Vec<Book>,
    pub selected: usize,
    pub dialog: DialogView,
    pub show_help: bool,

    // Status bar
    pub is_loading: bool,
    pub last_synced: Option<DateTime<Local>>,
    pub base_url: String,
}

impl RenderState {
    /// Surface that should receive key presses
    pub fn screen(&self) -> Screen {
        match self.dialog {
            DialogView::None => Screen::List,
            DialogView::Detail(_) => Screen::Detail,
            DialogView::Editor(_) => Screen::Editor,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            books: Vec::new(),
            selected: 0,
            dialog: DialogView::None,
            show_help: false,
            is_loading: true,
            last_synced: None,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }
}
