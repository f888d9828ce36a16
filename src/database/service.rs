use anyhow::Result;
use std::sync::Arc;

use super::mongodb::MongoDbClient;
use super::repositories::{BookRepository, MongoBookRepository};
use crate::config::MongoDbConfig;

/// MongoDB service for managing database operations
///
/// Owns the client and hands out the book repository; the HTTP layer only
/// ever sees the repository trait.
#[derive(Debug, Clone)]
pub struct MongoDbService {
    _client: Arc<MongoDbClient>,
    book_repo: Arc<MongoBookRepository>,
}

impl MongoDbService {
    /// Create a new MongoDB service
    pub async fn new(config: &MongoDbConfig) -> Result<Self> {
        config.validate()?;
        let client = MongoDbClient::init(config).await?;

        let book_repo = Arc::new(MongoBookRepository::new(
            client.clone(),
            config.collection.clone(),
        ));

        Ok(Self {
            _client: client,
            book_repo,
        })
    }

    /// Get the book repository behind the storage trait
    pub fn book_repository(&self) -> Arc<dyn BookRepository> {
        self.book_repo.clone()
    }
}
