use actix_web::{web, HttpResponse, Result};
use log::warn;

use crate::database::repositories::BookRepository;
use crate::routes::{book::configure_book_routes, pages::configure_page_routes};

/// Health check endpoint, reporting whether storage answers a ping
async fn health_check(repo: web::Data<dyn BookRepository>) -> Result<HttpResponse> {
    match repo.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))),
        Err(e) => {
            warn!("Health check failed: {:#}", e);
            Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({"status": "unavailable"})))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .configure(configure_book_routes)
        .configure(configure_page_routes);
}
