use crate::database::models::{bson_to_string, Book, BookField, BookQuery};
use crate::database::mongodb::MongoDbClient;
use crate::database::repositories::{sorted_distinct, BookRepository};
use anyhow::{Context, Result};
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::Collection;
use std::sync::Arc;

/// Book repository for MongoDB operations
#[derive(Debug, Clone)]
pub struct MongoBookRepository {
    client: Arc<MongoDbClient>,
    collection_name: String,
}

impl MongoBookRepository {
    /// Create a new MongoBookRepository instance
    pub fn new(client: Arc<MongoDbClient>, collection_name: impl Into<String>) -> Self {
        Self {
            client,
            collection_name: collection_name.into(),
        }
    }

    fn collection(&self) -> Collection<Book> {
        self.client.collection::<Book>(&self.collection_name)
    }
}

fn id_filter(id: &str) -> bson::Document {
    BookQuery::new().with(BookField::Id, id).to_document()
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>> {
        let mut cursor = self
            .collection()
            .find(doc! {})
            .await
            .context("Failed to query books")?;
        let mut books = Vec::new();

        while let Some(book) = cursor.try_next().await? {
            books.push(book);
        }

        debug!("Retrieved {} books from '{}'", books.len(), self.collection_name);
        Ok(books)
    }

    async fn exists(&self, query: &BookQuery) -> Result<bool> {
        let book = self
            .collection()
            .find_one(query.to_document())
            .await
            .context("Failed to look up book")?;

        Ok(book.is_some())
    }

    async fn insert(&self, book: Book) -> Result<()> {
        let id = book.id.clone();
        self.collection()
            .insert_one(book)
            .await
            .with_context(|| format!("Failed to insert book '{}'", id))?;
        info!("Inserted new book: {}", id);

        Ok(())
    }

    async fn update_by_id(&self, id: &str, changes: &BookQuery) -> Result<u64> {
        let filter = id_filter(id);
        let result = self
            .collection()
            .update_many(filter, changes.to_update())
            .await
            .with_context(|| format!("Failed to update book '{}'", id))?;

        debug!(
            "Updated book {}: matched {}, modified {}",
            id, result.matched_count, result.modified_count
        );
        Ok(result.matched_count)
    }

    async fn delete_one_by_id(&self, id: &str) -> Result<u64> {
        let filter = id_filter(id);
        let result = self
            .collection()
            .delete_one(filter)
            .await
            .with_context(|| format!("Failed to delete book '{}'", id))?;

        if result.deleted_count > 0 {
            info!("Deleted book {}", id);
        } else {
            debug!("Book {} not found", id);
        }
        Ok(result.deleted_count)
    }

    async fn distinct(&self, field: BookField) -> Result<Vec<String>> {
        let values = self
            .collection()
            .distinct(field.document_key(), doc! {})
            .await
            .with_context(|| format!("Failed to list distinct {} values", field))?;

        Ok(sorted_distinct(values.iter().map(bson_to_string)))
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database()
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }
}
