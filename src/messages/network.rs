//! Network messages - communication between App and Network layers

use crate::models::{Book, BookId, BookPayload, Operation};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// GET /books
    FetchBooks { id: u64 },
    /// POST /books
    CreateBook { id: u64, payload: BookPayload },
    /// PATCH /books/{book_id}
    UpdateBook {
        id: u64,
        book_id: BookId,
        payload: BookPayload,
    },
    /// DELETE /books/{book_id}
    DeleteBook { id: u64, book_id: BookId },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// Full collection, in server order
    BooksFetched { id: u64, books: Vec<Book> },
    /// Created record as returned by the server
    BookCreated { id: u64, book: Book },
    /// Update accepted; the payload that was sent is echoed back
    BookUpdated {
        id: u64,
        book_id: BookId,
        payload: BookPayload,
    },
    BookDeleted { id: u64, book_id: BookId },
    /// Any failure. There is one failure kind; `message` is for the log.
    Failed {
        id: u64,
        op: Operation,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::BooksFetched { id, .. } => *id,
            NetworkResponse::BookCreated { id, .. } => *id,
            NetworkResponse::BookUpdated { id, .. } => *id,
            NetworkResponse::BookDeleted { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }

    /// Operation this response answers
    pub fn operation(&self) -> Operation {
        match self {
            NetworkResponse::BooksFetched { .. } => Operation::List,
            NetworkResponse::BookCreated { .. } => Operation::Create,
            NetworkResponse::BookUpdated { .. } => Operation::Update,
            NetworkResponse::BookDeleted { .. } => Operation::Delete,
            NetworkResponse::Failed { op, .. } => *op,
        }
    }
}
