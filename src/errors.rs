use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use derive_more::Display;
use handlebars::RenderError;
use serde_json::json;

use crate::handlers::book::BookError;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Internal server error")]
    InternalError,

    #[display(fmt = "Bad request: {}", _0)]
    BadRequest(String),

    #[display(fmt = "Not found: {}", _0)]
    NotFound(String),

    #[display(fmt = "Conflict: {}", _0)]
    Conflict(String),

    #[display(fmt = "Database error: {}", _0)]
    DatabaseError(String),
}

impl From<RenderError> for ApiError {
    fn from(error: RenderError) -> Self {
        log::error!("Template error: {}", error);
        ApiError::InternalError
    }
}

impl From<BookError> for ApiError {
    fn from(error: BookError) -> Self {
        match error {
            BookError::MissingField(_)
            | BookError::InvalidBody
            | BookError::NoUpdatableFields => {
                ApiError::BadRequest(error.to_string())
            }
            BookError::NotFound => ApiError::NotFound(error.to_string()),
            BookError::Conflict => ApiError::Conflict(error.to_string()),
            BookError::Store(e) => {
                log::error!("Storage error: {:#}", e);
                ApiError::DatabaseError(e.to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalError | ApiError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::InternalError => "Internal server error".to_string(),
            ApiError::BadRequest(ref message)
            | ApiError::NotFound(ref message)
            | ApiError::Conflict(ref message) => message.clone(),
            ApiError::DatabaseError(ref message) => format!("Database error: {}", message),
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_book_errors_map_to_status_codes() {
        let (status, body) = body_of(BookError::MissingField("title").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing field: title");

        let (status, body) = body_of(BookError::Conflict.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Book with characteristics already exists.");

        let (status, _) = body_of(BookError::NotFound.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = body_of(BookError::InvalidBody.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid JSON body.");
    }

    #[actix_web::test]
    async fn test_database_error_is_prefixed() {
        let (status, body) = body_of(ApiError::DatabaseError("timeout".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database error: timeout");
    }
}
