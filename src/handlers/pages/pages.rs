use actix_web::{http::header::ContentType, web, HttpResponse};
use log::{error, info};

use crate::{
    database::repositories::BookRepository,
    errors::ApiError,
    handlers::{book::BookService, pages::render::PageRenderer},
};

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// GET / - Landing page
pub async fn index_handler(renderer: web::Data<PageRenderer>) -> Result<HttpResponse, ApiError> {
    Ok(html(renderer.index_page()?))
}

/// GET /books - Table of every book
pub async fn books_page_handler(
    repo: web::Data<dyn BookRepository>,
    renderer: web::Data<PageRenderer>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /books request");

    match BookService::get_all_books(repo.get_ref()).await {
        Ok(books) => Ok(html(renderer.book_table_page(&books)?)),
        Err(e) => {
            error!("Failed to render book table: {}", e);
            Err(e.into())
        }
    }
}

/// GET /authors - Distinct authors
pub async fn authors_page_handler(
    repo: web::Data<dyn BookRepository>,
    renderer: web::Data<PageRenderer>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /authors request");

    match BookService::list_authors(repo.get_ref()).await {
        Ok(authors) => Ok(html(renderer.authors_page(&authors)?)),
        Err(e) => {
            error!("Failed to list authors: {}", e);
            Err(e.into())
        }
    }
}

/// GET /years - Distinct publication years
pub async fn years_page_handler(
    repo: web::Data<dyn BookRepository>,
    renderer: web::Data<PageRenderer>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /years request");

    match BookService::list_years(repo.get_ref()).await {
        Ok(years) => Ok(html(renderer.years_page(&years)?)),
        Err(e) => {
            error!("Failed to list years: {}", e);
            Err(e.into())
        }
    }
}

/// GET /search - Client-side search page
pub async fn search_handler(renderer: web::Data<PageRenderer>) -> Result<HttpResponse, ApiError> {
    Ok(html(renderer.search_page()?))
}
