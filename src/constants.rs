//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default address of the books service
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Collection path on the books service
pub const BOOKS_PATH: &str = "/books";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "BOOKLIST_BASE_URL";

/// Log file name, created inside the configured log directory
pub const LOG_FILE_NAME: &str = "booklist.log";

/// Inline message shown in the editor when a create or update fails
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save.";

/// Application name
pub const APP_NAME: &str = "Book List";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
