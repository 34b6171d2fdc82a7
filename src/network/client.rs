//! HTTP client wrapper - the four REST calls against `/books`

use std::time::Duration;

use anyhow::{Context, Result};

use crate::constants::BOOKS_PATH;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Book, BookId, BookPayload, Operation};

/// Thin client over the books resource. Cheap to clone.
#[derive(Clone, Debug)]
pub struct BooksClient {
    http: reqwest::Client,
    base_url: String,
}

impl BooksClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        BooksClient {
            http: create_client(timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn books_url(&self) -> String {
        format!("{}{}", self.base_url, BOOKS_PATH)
    }

    pub fn book_url(&self, id: BookId) -> String {
        format!("{}{}/{}", self.base_url, BOOKS_PATH, id)
    }

    /// GET /books
    pub async fn list(&self) -> Result<Vec<Book>> {
        let books = self
            .http
            .get(self.books_url())
            .send()
            .await
            .context("list request failed")?
            .error_for_status()
            .context("list rejected")?
            .json::<Vec<Book>>()
            .await
            .context("list response is not a book array")?;
        Ok(books)
    }

    /// POST /books, returns the record with its assigned id
    pub async fn create(&self, payload: &BookPayload) -> Result<Book> {
        let book = self
            .http
            .post(self.books_url())
            .json(payload)
            .send()
            .await
            .context("create request failed")?
            .error_for_status()
            .context("create rejected")?
            .json::<Book>()
            .await
            .context("create response is not a book")?;
        Ok(book)
    }

    /// PATCH /books/{id}. The response body is ignored.
    pub async fn update(&self, id: BookId, payload: &BookPayload) -> Result<()> {
        self.http
            .patch(self.book_url(id))
            .json(payload)
            .send()
            .await
            .with_context(|| format!("update of book {} failed", id))?
            .error_for_status()
            .with_context(|| format!("update of book {} rejected", id))?;
        Ok(())
    }

    /// DELETE /books/{id}
    pub async fn delete(&self, id: BookId) -> Result<()> {
        self.http
            .delete(self.book_url(id))
            .send()
            .await
            .with_context(|| format!("delete of book {} failed", id))?
            .error_for_status()
            .with_context(|| format!("delete of book {} rejected", id))?;
        Ok(())
    }
}

/// Run one command and flatten the outcome into a response.
/// Returns None for commands that are not REST calls.
pub async fn execute(client: &BooksClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::FetchBooks { id } => match client.list().await {
            Ok(books) => NetworkResponse::BooksFetched { id, books },
            Err(e) => failure(id, Operation::List, e),
        },
        NetworkCommand::CreateBook { id, payload } => match client.create(&payload).await {
            Ok(book) => NetworkResponse::BookCreated { id, book },
            Err(e) => failure(id, Operation::Create, e),
        },
        NetworkCommand::UpdateBook { id, book_id, payload } => {
            match client.update(book_id, &payload).await {
                Ok(()) => NetworkResponse::BookUpdated { id, book_id, payload },
                Err(e) => failure(id, Operation::Update, e),
            }
        }
        NetworkCommand::DeleteBook { id, book_id } => match client.delete(book_id).await {
            Ok(()) => NetworkResponse::BookDeleted { id, book_id },
            Err(e) => failure(id, Operation::Delete, e),
        },
        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}

fn failure(id: u64, op: Operation, error: anyhow::Error) -> NetworkResponse {
    let message = if let Some(e) = error.downcast_ref::<reqwest::Error>() {
        if e.is_timeout() {
            format!("Request timed out: {:#}", error)
        } else if e.is_connect() {
            format!("Connection failed: {:#}", error)
        } else {
            format!("{:#}", error)
        }
    } else {
        format!("{:#}", error)
    };
    NetworkResponse::Failed { id, op, message }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = BooksClient::new("http://localhost:3000/", Duration::from_secs(1));
        assert_eq!(client.books_url(), "http://localhost:3000/books");
        assert_eq!(client.book_url(5), "http://localhost:3000/books/5");
    }

    #[tokio::test]
    async fn test_connection_failure_becomes_failed_response() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = BooksClient::new(format!("http://127.0.0.1:{port}"), Duration::from_secs(2));
        let response = execute(&client, NetworkCommand::DeleteBook { id: 7, book_id: 5 })
            .await
            .unwrap();
        let NetworkResponse::Failed { id, op, .. } = response else {
            panic!("closed port must fail");
        };
        assert_eq!(id, 7);
        assert_eq!(op, Operation::Delete);
    }

    #[tokio::test]
    async fn test_shutdown_is_not_a_request() {
        let client = BooksClient::new("http://127.0.0.1:9", Duration::from_secs(1));
        assert!(execute(&client, NetworkCommand::Shutdown).await.is_none());
    }
}
