use log::debug;
use thiserror::Error;

use crate::{
    database::{
        models::{Book, BookField, BookQuery},
        repositories::BookRepository,
    },
    handlers::book::dto::{BookRequest, BookResponse},
};

/// Fields a create request must carry, checked in this order
const REQUIRED_FIELDS: [BookField; 3] = [BookField::Id, BookField::Title, BookField::Author];

#[derive(Debug, Error)]
pub enum BookError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Book with characteristics already exists.")]
    Conflict,

    #[error("Book not found.")]
    NotFound,

    #[error("Invalid JSON body.")]
    InvalidBody,

    #[error("No valid fields to update")]
    NoUpdatableFields,

    #[error("Storage error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Service layer for book-related business logic
pub struct BookService;

impl BookService {
    /// Get all books
    ///
    /// # Arguments
    /// * `repo` - Book storage
    ///
    /// # Returns
    /// * `Ok(Vec<BookResponse>)` - Books in storage order
    /// * `Err(BookError::Store)` - Error if the storage operation fails
    pub async fn get_all_books(repo: &dyn BookRepository) -> Result<Vec<BookResponse>, BookError> {
        debug!("Fetching all books");

        let books = repo.find_all().await?;

        debug!("Retrieved {} books", books.len());
        Ok(books.into_iter().map(BookResponse::from).collect())
    }

    /// Distinct authors, sorted
    pub async fn list_authors(repo: &dyn BookRepository) -> Result<Vec<String>, BookError> {
        Ok(repo.distinct(BookField::Author).await?)
    }

    /// Distinct publication years, sorted as text
    pub async fn list_years(repo: &dyn BookRepository) -> Result<Vec<String>, BookError> {
        Ok(repo.distinct(BookField::Year).await?)
    }

    /// Create a new book
    ///
    /// `id`, `title` and `author` are required; the other fields default to
    /// an empty string. A book identical on every field is a conflict.
    ///
    /// # Arguments
    /// * `repo` - Book storage
    /// * `request` - BookRequest containing book data
    pub async fn create_book(
        repo: &dyn BookRepository,
        request: BookRequest,
    ) -> Result<(), BookError> {
        for field in REQUIRED_FIELDS {
            if request.value(field).is_none() {
                return Err(BookError::MissingField(field.api_key()));
            }
        }

        let value = |field| request.value(field).unwrap_or_default().to_string();
        let book = Book::new(
            value(BookField::Id),
            value(BookField::Title),
            value(BookField::Author),
            value(BookField::Edition),
            value(BookField::Pages),
            value(BookField::Year),
        );

        debug!("Creating book with id: {}", book.id);

        if repo.exists(&book.to_query()).await? {
            return Err(BookError::Conflict);
        }

        repo.insert(book).await?;
        Ok(())
    }

    /// Update every book carrying `book_id`
    ///
    /// Only title, author, edition, pages and year are updatable; an `id` in
    /// the body is ignored. The update is a conflict when a book with this id
    /// already looks like the result:
    /// * with both `title` and `author` in the body, every field must match,
    ///   absent ones counting as ""
    /// * otherwise only the fields in the body must match
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of books matched
    /// * `Err(BookError)` - Validation, conflict, not-found or storage error
    pub async fn update_book(
        repo: &dyn BookRepository,
        book_id: &str,
        request: BookRequest,
    ) -> Result<u64, BookError> {
        if request.is_empty() {
            return Err(BookError::InvalidBody);
        }

        let changes = BookField::UPDATABLE
            .iter()
            .filter_map(|&field| request.value(field).map(|value| (field, value)))
            .fold(BookQuery::new(), |query, (field, value)| {
                query.with(field, value)
            });

        if changes.is_empty() {
            return Err(BookError::NoUpdatableFields);
        }

        debug!("Updating book {} with {} field(s)", book_id, changes.len());

        if repo.exists(&Self::conflict_query(book_id, &request, &changes)).await? {
            return Err(BookError::Conflict);
        }

        let matched = repo.update_by_id(book_id, &changes).await?;
        if matched == 0 {
            return Err(BookError::NotFound);
        }

        Ok(matched)
    }

    fn conflict_query(book_id: &str, request: &BookRequest, changes: &BookQuery) -> BookQuery {
        let complete = request.value(BookField::Title).is_some()
            && request.value(BookField::Author).is_some();

        if !complete {
            return changes.clone().with(BookField::Id, book_id);
        }

        BookField::UPDATABLE
            .iter()
            .fold(BookQuery::new().with(BookField::Id, book_id), |query, &field| {
                query.with(field, request.value(field).unwrap_or_default())
            })
    }

    /// Delete one book carrying `book_id`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of books deleted, 0 when none matched
    pub async fn delete_book(repo: &dyn BookRepository, book_id: &str) -> Result<u64, BookError> {
        debug!("Deleting book {}", book_id);
        Ok(repo.delete_one_by_id(book_id).await?)
    }
}
