use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::database::models::{Book, BookField};

/// Response model for book API endpoints
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub edition: String,
    pub pages: String,
    pub year: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            edition: book.edition,
            pages: book.pages,
            year: book.year,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Any JSON scalar sent for a book field; the catalogue stores it as text.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue(pub String);

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Scalar {
            Text(String),
            Integer(i64),
            Unsigned(u64),
            Float(f64),
            Flag(bool),
        }

        let text = match Scalar::deserialize(deserializer)? {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        };
        Ok(FieldValue(text))
    }
}

/// Request body for creating or updating a book.
///
/// Every key is optional at the JSON level; which ones are required depends
/// on the operation. Unknown keys are kept aside and otherwise ignored.
#[derive(Debug, Default, Deserialize)]
pub struct BookRequest {
    pub id: Option<FieldValue>,
    pub title: Option<FieldValue>,
    pub author: Option<FieldValue>,
    pub edition: Option<FieldValue>,
    pub pages: Option<FieldValue>,
    pub year: Option<FieldValue>,
    #[serde(flatten)]
    unknown: HashMap<String, Value>,
}

impl BookRequest {
    pub fn value(&self, field: BookField) -> Option<&str> {
        let value = match field {
            BookField::Id => &self.id,
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Edition => &self.edition,
            BookField::Pages => &self.pages,
            BookField::Year => &self.year,
        };
        value.as_ref().map(|v| v.0.as_str())
    }

    /// True for `{}`: no keys at all, known or not.
    pub fn is_empty(&self) -> bool {
        self.unknown.is_empty() && BookField::ALL.iter().all(|&field| self.value(field).is_none())
    }
}
