// MongoDB modules
pub mod models;
pub mod mongodb;
pub mod repositories;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use self::mongodb::MongoDbClient;
pub use repositories::{BookRepository, InMemoryBookRepository, MongoBookRepository};
pub use service::MongoDbService;
