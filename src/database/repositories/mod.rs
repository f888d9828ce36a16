pub mod book;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::database::models::{Book, BookField, BookQuery};

pub use book::MongoBookRepository;
pub use memory::InMemoryBookRepository;

/// Storage operations the catalogue needs.
///
/// Lookups by `id` target the client-chosen `ID` key, never MongoDB's `_id`.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books in natural (insertion) order
    async fn find_all(&self) -> Result<Vec<Book>>;

    /// Whether any book matches every value of the query
    async fn exists(&self, query: &BookQuery) -> Result<bool>;

    async fn insert(&self, book: Book) -> Result<()>;

    /// Apply `changes` to every book with this id; returns the matched count
    async fn update_by_id(&self, id: &str, changes: &BookQuery) -> Result<u64>;

    /// Delete the first book with this id; returns the deleted count
    async fn delete_one_by_id(&self, id: &str) -> Result<u64>;

    /// Distinct non-empty values of a field, sorted ascending
    async fn distinct(&self, field: BookField) -> Result<Vec<String>>;

    /// Check the backing store is reachable
    async fn ping(&self) -> Result<()>;
}

/// Shared post-processing for `distinct` implementations
pub(crate) fn sorted_distinct<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let set: std::collections::BTreeSet<String> =
        values.into_iter().filter(|v| !v.is_empty()).collect();
    set.into_iter().collect()
}
