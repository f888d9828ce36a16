use crate::config::MongoDbConfig;
use anyhow::{anyhow, Result};
use log::{error, info};
use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client, Collection, Database as MongoDatabase, IndexModel,
};
use std::sync::Arc;
use std::time::Duration;

/// MongoDB client wrapper for managing database connections and operations
#[derive(Debug, Clone)]
pub struct MongoDbClient {
    _client: Client,
    database: MongoDatabase,
}

impl MongoDbClient {
    /// Initialize the MongoDB client with configuration
    ///
    /// Fails when the server cannot be reached within the configured
    /// timeout, so a misconfigured deployment stops at startup instead of
    /// on the first request.
    pub async fn init(config: &MongoDbConfig) -> Result<Arc<Self>> {
        let connection_string = config.uri.clone();

        info!("Connecting to MongoDB at {}", connection_string);

        let mut client_options = ClientOptions::parse(&connection_string)
            .await
            .map_err(|e| anyhow!("Failed to parse MongoDB connection string: {}", e))?;

        let timeout = Duration::from_millis(config.connection_timeout_ms);
        client_options.connect_timeout = Some(timeout);
        client_options.server_selection_timeout = Some(timeout);
        if let Some(max_pool_size) = config.max_pool_size {
            client_options.max_pool_size = Some(max_pool_size);
        }

        let database_name = resolve_database_name(config, client_options.default_database.as_deref())?;

        let client = Client::with_options(client_options)
            .map_err(|e| anyhow!("Failed to create MongoDB client: {}", e))?;

        let database = client.database(&database_name);

        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => info!(
                "Successfully connected to MongoDB database: {}",
                database_name
            ),
            Err(e) => {
                error!("Failed to connect to MongoDB: {}", e);
                return Err(anyhow!(
                    "Failed to connect to MongoDB at '{}': {}",
                    connection_string,
                    e
                ));
            }
        }

        let db_client = Arc::new(Self {
            _client: client,
            database,
        });

        db_client.create_book_indexes(&config.collection).await?;

        Ok(db_client)
    }

    /// Get a collection with the given name
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    /// Get database reference
    pub fn database(&self) -> MongoDatabase {
        self.database.clone()
    }

    /// Create indexes for the books collection
    async fn create_book_indexes(&self, collection_name: &str) -> Result<()> {
        info!("Creating MongoDB indexes on '{}'...", collection_name);

        let collection = self.collection::<mongodb::bson::Document>(collection_name);

        // `ID` is chosen by clients and is not guaranteed unique.
        let indexes = [
            (doc! { "ID": 1 }, IndexOptions::default()),
            (doc! { "BookAuthor": 1 }, IndexOptions::default()),
            (doc! { "BookYear": 1 }, IndexOptions::default()),
        ];

        for (keys, options) in indexes {
            let index = IndexModel::builder().keys(keys).options(options).build();
            collection
                .create_index(index)
                .await
                .map_err(|e| anyhow!("Failed to create book index: {}", e))?;
        }

        info!("MongoDB indexes created successfully");
        Ok(())
    }
}

/// An explicitly configured name wins over the one in the connection string.
fn resolve_database_name(config: &MongoDbConfig, uri_default: Option<&str>) -> Result<String> {
    if !config.database.is_empty() {
        return Ok(config.database.clone());
    }

    match uri_default {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(anyhow!(
            "No database name: set MONGODB_DATABASE or add one to the connection string"
        )),
    }
}
