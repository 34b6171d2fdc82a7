use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned book identifier
pub type BookId = i64;

/// A book record as exposed by the books service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    /// Server timestamp, kept verbatim for display
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
}

impl Book {
    /// Blank record shown in the editor for a new book
    pub fn draft() -> Self {
        Book::default()
    }

    /// Apply an edit locally. Timestamps are left as the server last reported them.
    pub fn apply(&mut self, payload: &BookPayload) {
        self.title = payload.title.clone();
        self.body = payload.body.clone();
    }
}

/// Request body for create and update calls
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub body: String,
}

impl BookPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        BookPayload {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// What the editor dialog is bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorTarget {
    /// Unsaved record, saving creates it
    Draft,
    /// Existing record, saving updates it
    Existing(BookId),
}

/// REST operation kind, used to route failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
