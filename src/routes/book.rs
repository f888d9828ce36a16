use actix_web::{error::JsonPayloadError, http::Method, web, HttpRequest};
use log::warn;

use crate::errors::ApiError;
use crate::handlers::book::{
    create_book_handler, delete_book_handler, get_books_handler, update_book_handler,
};

/// Extension method accepted alongside PUT for updates
pub fn update_method() -> Method {
    Method::from_bytes(b"UPDATE").expect("UPDATE is a valid method token")
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    ApiError::BadRequest("Invalid JSON body.".to_string()).into()
}

pub fn configure_book_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/books", web::get().to(get_books_handler))
            .route("/books", web::post().to(create_book_handler))
            .route("/books/{book_id}", web::put().to(update_book_handler))
            .route(
                "/books/{book_id}",
                web::method(update_method()).to(update_book_handler),
            )
            .route("/books/{book_id}", web::delete().to(delete_book_handler)),
    );
}
