use bson::{doc, Bson, Document};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::utils::{lenient_string, lenient_timestamp};

/// Book model for MongoDB
///
/// `_id` is kept as raw BSON: documents inserted by other clients may use
/// strings or numbers there instead of an ObjectId.
///
/// Document keys are the ones the catalogue has always stored (`ID`,
/// `BookName`, ...); the API exposes them under short names, see
/// [`BookField`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Bson>,
    #[serde(rename = "ID", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "BookName", default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "BookAuthor", default, deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(rename = "BookEdition", default, deserialize_with = "lenient_string")]
    pub edition: String,
    #[serde(rename = "BookPages", default, deserialize_with = "lenient_string")]
    pub pages: String,
    #[serde(rename = "BookYear", default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<i64>,
}

impl Book {
    pub fn new(
        id: String,
        title: String,
        author: String,
        edition: String,
        pages: String,
        year: String,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            object_id: None,
            id,
            title,
            author,
            edition,
            pages,
            year,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn field(&self, field: BookField) -> &str {
        match field {
            BookField::Id => &self.id,
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Edition => &self.edition,
            BookField::Pages => &self.pages,
            BookField::Year => &self.year,
        }
    }

    pub fn set_field(&mut self, field: BookField, value: String) {
        match field {
            BookField::Id => self.id = value,
            BookField::Title => self.title = value,
            BookField::Author => self.author = value,
            BookField::Edition => self.edition = value,
            BookField::Pages => self.pages = value,
            BookField::Year => self.year = value,
        }
    }

    /// Every field of the book, suitable for an exact-match lookup.
    pub fn to_query(&self) -> BookQuery {
        BookField::ALL
            .iter()
            .fold(BookQuery::new(), |query, &field| {
                query.with(field, self.field(field))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookField {
    Id,
    Title,
    Author,
    Edition,
    Pages,
    Year,
}

impl BookField {
    pub const ALL: [BookField; 6] = [
        BookField::Id,
        BookField::Title,
        BookField::Author,
        BookField::Edition,
        BookField::Pages,
        BookField::Year,
    ];

    /// Fields a client may change through an update; `id` is the lookup key.
    pub const UPDATABLE: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Edition,
        BookField::Pages,
        BookField::Year,
    ];

    /// Key used in API request and response bodies
    pub fn api_key(self) -> &'static str {
        match self {
            BookField::Id => "id",
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Edition => "edition",
            BookField::Pages => "pages",
            BookField::Year => "year",
        }
    }

    /// Key used in the stored document
    pub fn document_key(self) -> &'static str {
        match self {
            BookField::Id => "ID",
            BookField::Title => "BookName",
            BookField::Author => "BookAuthor",
            BookField::Edition => "BookEdition",
            BookField::Pages => "BookPages",
            BookField::Year => "BookYear",
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_key())
    }
}

/// A set of field values, used both as an equality filter and as a `$set`
/// payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookQuery {
    values: BTreeMap<BookField, String>,
}

impl BookQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: BookField, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn get(&self, field: BookField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// True when the book holds every value of this query
    pub fn matches(&self, book: &Book) -> bool {
        self.iter().all(|(field, value)| book.field(field) == value)
    }

    pub fn apply_to(&self, book: &mut Book) {
        for (field, value) in self.iter() {
            book.set_field(field, value.to_string());
        }
    }

    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        for (field, value) in self.iter() {
            document.insert(field.document_key(), value);
        }
        document
    }

    /// `$set` update document, stamping `updated_at`
    pub fn to_update(&self) -> Document {
        let mut set = self.to_document();
        set.insert("updated_at", Utc::now().timestamp());
        doc! { "$set": set }
    }
}
