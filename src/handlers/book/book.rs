use actix_web::{web, HttpResponse};
use log::{error, info};

use crate::{
    database::repositories::BookRepository,
    errors::ApiError,
    handlers::book::{
        dto::{BookRequest, MessageResponse},
        service::{BookError, BookService},
    },
};

/// GET /api/books - Returns all books
///
/// # Returns
/// JSON array of BookResponse objects
pub async fn get_books_handler(
    repo: web::Data<dyn BookRepository>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /api/books request");

    match BookService::get_all_books(repo.get_ref()).await {
        Ok(books) => {
            info!("Successfully retrieved {} books", books.len());
            Ok(HttpResponse::Ok().json(books))
        }
        Err(e) => {
            error!("Failed to retrieve books: {}", e);
            Err(e.into())
        }
    }
}

/// POST /api/books - Creates a new book
///
/// # Arguments
/// * `repo` - Book storage
/// * `body` - BookRequest with at least id, title and author
///
/// # Returns
/// 201 with a confirmation message
pub async fn create_book_handler(
    repo: web::Data<dyn BookRepository>,
    body: web::Json<BookRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /api/books request");

    match BookService::create_book(repo.get_ref(), body.into_inner()).await {
        Ok(()) => {
            info!("Successfully created book");
            Ok(HttpResponse::Created().json(MessageResponse::new("Book created successfully.")))
        }
        Err(e @ BookError::Store(_)) => {
            error!("Failed to create book: {}", e);
            Err(e.into())
        }
        Err(e) => {
            info!("Rejected book creation: {}", e);
            Err(e.into())
        }
    }
}

/// PUT|UPDATE /api/books/{book_id} - Updates every book with this id
///
/// # Arguments
/// * `repo` - Book storage
/// * `path` - Path parameters containing book_id
/// * `body` - BookRequest containing fields to update
pub async fn update_book_handler(
    repo: web::Data<dyn BookRepository>,
    path: web::Path<String>,
    body: web::Json<BookRequest>,
) -> Result<HttpResponse, ApiError> {
    let book_id = path.into_inner();
    info!("Handling update of /api/books/{}", book_id);

    match BookService::update_book(repo.get_ref(), &book_id, body.into_inner()).await {
        Ok(matched) => {
            info!("Successfully updated {} book(s) with id: {}", matched, book_id);
            Ok(HttpResponse::Ok().json(MessageResponse::new("Book updated successfully.")))
        }
        Err(e @ BookError::Store(_)) => {
            error!("Failed to update book {}: {}", book_id, e);
            Err(e.into())
        }
        Err(e) => {
            info!("Rejected update of book {}: {}", book_id, e);
            Err(e.into())
        }
    }
}

/// DELETE /api/books/{book_id} - Deletes one book with this id
///
/// # Arguments
/// * `repo` - Book storage
/// * `path` - Path parameters containing book_id
pub async fn delete_book_handler(
    repo: web::Data<dyn BookRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let book_id = path.into_inner();
    info!("Handling DELETE /api/books/{} request", book_id);

    match BookService::delete_book(repo.get_ref(), &book_id).await {
        Ok(0) => {
            info!("Book {} not found", book_id);
            Err(ApiError::NotFound("Book not found".to_string()))
        }
        Ok(deleted) => {
            info!("Successfully deleted book with id: {}", book_id);
            Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
                "Deleted {} book(s) with ID '{}'",
                deleted, book_id
            ))))
        }
        Err(e) => {
            error!("Failed to delete book {}: {}", book_id, e);
            Err(e.into())
        }
    }
}
