use actix_web::web;

use crate::handlers::pages::{
    authors_page_handler, books_page_handler, index_handler, search_handler, years_page_handler,
};

pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_handler))
        .route("/books", web::get().to(books_page_handler))
        .route("/authors", web::get().to(authors_page_handler))
        .route("/years", web::get().to(years_page_handler))
        .route("/search", web::get().to(search_handler));
}
