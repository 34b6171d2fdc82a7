//! Network layer - REST calls against the books service
//!
//! The Network actor receives book commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::BooksClient;
