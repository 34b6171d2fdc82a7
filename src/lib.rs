//! # Book List TUI
//!
//! A terminal client for a REST books collection.
//!
//! ## Features
//! - Table of all books fetched from `GET /books`
//! - Add, edit, delete and show actions
//! - Editor and detail dialogs
//! - Configurable service address
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine, owns the collection)
//! - Network Layer (Tokio runtime, reqwest)

pub mod config;
pub mod constants;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Settings;
pub use models::{Book, BookId, BookPayload, EditorTarget, Operation};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{BooksClient, NetworkActor};
