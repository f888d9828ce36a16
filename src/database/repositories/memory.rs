use crate::database::models::{Book, BookField, BookQuery};
use crate::database::repositories::{sorted_distinct, BookRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::sync::RwLock;

/// Book repository kept in process memory.
///
/// Used when the service runs with `--in-memory` and by the HTTP tests.
/// Preserves insertion order the way a MongoDB collection scan does.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn exists(&self, query: &BookQuery) -> Result<bool> {
        Ok(self.books.read().await.iter().any(|book| query.matches(book)))
    }

    async fn insert(&self, book: Book) -> Result<()> {
        debug!("Inserting book {} in memory", book.id);
        self.books.write().await.push(book);
        Ok(())
    }

    async fn update_by_id(&self, id: &str, changes: &BookQuery) -> Result<u64> {
        let now = Utc::now().timestamp();
        let mut books = self.books.write().await;
        let mut matched = 0;

        for book in books.iter_mut().filter(|book| book.id == id) {
            changes.apply_to(book);
            book.updated_at = Some(now);
            matched += 1;
        }

        Ok(matched)
    }

    async fn delete_one_by_id(&self, id: &str) -> Result<u64> {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn distinct(&self, field: BookField) -> Result<Vec<String>> {
        let books = self.books.read().await;
        Ok(sorted_distinct(
            books.iter().map(|book| book.field(field).to_string()),
        ))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
