use actix_web::{
    dev::{Service, ServiceResponse},
    http::{header, Method, StatusCode},
    test, web, App, Error,
};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use book_catalog_api::database::{
    models::{Book, BookField, BookQuery},
    seed::starter_books,
    BookRepository, InMemoryBookRepository,
};
use book_catalog_api::handlers::{book::BookResponse, pages::PageRenderer};
use book_catalog_api::routes::configure_routes;

/// Build the full route table over the given repository
macro_rules! app_with {
    ($repo:expr) => {{
        let repo: Arc<dyn BookRepository> = $repo;
        let data: web::Data<dyn BookRepository> = web::Data::from(repo);
        let renderer = web::Data::new(PageRenderer::new().unwrap());
        test::init_service(
            App::new()
                .app_data(data)
                .app_data(renderer)
                .configure(configure_routes),
        )
        .await
    }};
}

/// Storage that answers reads but fails its ping
struct UnreachableRepository(InMemoryBookRepository);

#[async_trait]
impl BookRepository for UnreachableRepository {
    async fn find_all(&self) -> Result<Vec<Book>> {
        self.0.find_all().await
    }

    async fn exists(&self, query: &BookQuery) -> Result<bool> {
        self.0.exists(query).await
    }

    async fn insert(&self, book: Book) -> Result<()> {
        self.0.insert(book).await
    }

    async fn update_by_id(&self, id: &str, changes: &BookQuery) -> Result<u64> {
        self.0.update_by_id(id, changes).await
    }

    async fn delete_one_by_id(&self, id: &str) -> Result<u64> {
        self.0.delete_one_by_id(id).await
    }

    async fn distinct(&self, field: BookField) -> Result<Vec<String>> {
        self.0.distinct(field).await
    }

    async fn ping(&self) -> Result<()> {
        Err(anyhow::anyhow!("server selection timeout"))
    }
}

fn seeded_repo() -> Arc<InMemoryBookRepository> {
    Arc::new(InMemoryBookRepository::with_books(starter_books()))
}

fn json_request(method: Method, uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::default()
        .method(method)
        .uri(uri)
        .set_json(body)
}

async fn send<S, R>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn test_list_books_returns_api_shape() {
    let app = app_with!(seeded_repo());

    let req = test::TestRequest::get().uri("/api/books").to_request();
    let books: Vec<BookResponse> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(books.len(), 3);
    assert_eq!(books[0].id, "example1");
    assert_eq!(books[0].title, "The Vortex");
    assert_eq!(books[1].author, "Mary Shelley");
    assert_eq!(books[2].year, "1843");
}

#[actix_web::test]
async fn test_create_book_then_duplicate_conflicts() {
    let repo = Arc::new(InMemoryBookRepository::new());
    let app = app_with!(repo.clone());
    let book = json!({"id": "b1", "title": "Dune", "author": "Frank Herbert", "year": 1965});

    let req = json_request(Method::POST, "/api/books", book.clone()).to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Book created successfully.");

    let req = json_request(Method::POST, "/api/books", book).to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Book with characteristics already exists.");

    let stored = repo.find_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].year, "1965");
    assert_eq!(stored[0].pages, "");
}

#[actix_web::test]
async fn test_create_book_reports_first_missing_field() {
    let app = app_with!(seeded_repo());

    let req = json_request(
        Method::POST,
        "/api/books",
        json!({"id": "b2", "author": "X"}),
    )
    .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing field: title");
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = app_with!(seeded_repo());

    let req = test::TestRequest::post()
        .uri("/api/books")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid JSON body.");

    let req = json_request(Method::PUT, "/api/books/example1", json!("text")).to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_book_with_put_and_update_methods() {
    let repo = seeded_repo();
    let app = app_with!(repo.clone());

    let req = json_request(
        Method::PUT,
        "/api/books/example2",
        json!({"title": "Frankenstein; or, The Modern Prometheus"}),
    )
    .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book updated successfully.");

    let update = Method::from_bytes(b"UPDATE").unwrap();
    let req = json_request(update, "/api/books/example3", json!({"pages": 300})).to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let books = repo.find_all().await.unwrap();
    assert_eq!(books[1].title, "Frankenstein; or, The Modern Prometheus");
    assert_eq!(books[2].pages, "300");
}

#[actix_web::test]
async fn test_update_error_cases() {
    let app = app_with!(seeded_repo());

    let req = json_request(
        Method::PUT,
        "/api/books/example1",
        json!({"id": "renamed"}),
    )
    .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No valid fields to update");

    let req = json_request(Method::PUT, "/api/books/nope", json!({"title": "T"})).to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found.");

    let req = json_request(
        Method::PUT,
        "/api/books/example1",
        json!({"year": "1924"}),
    )
    .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let req = json_request(Method::PUT, "/api/books/example2", json!({})).to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body.");
}

#[actix_web::test]
async fn test_update_title_and_author_of_a_fuller_book() {
    let repo = seeded_repo();
    let app = app_with!(repo.clone());

    let req = json_request(
        Method::PUT,
        "/api/books/example2",
        json!({"title": "Frankenstein", "author": "Mary Shelley"}),
    )
    .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book updated successfully.");

    let req = json_request(
        Method::PUT,
        "/api/books/example2",
        json!({
            "title": "Frankenstein",
            "author": "Mary Shelley",
            "edition": "978-3-649-64609-9",
            "pages": 280,
            "year": 1818
        }),
    )
    .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Book with characteristics already exists.");
}

#[actix_web::test]
async fn test_delete_book() {
    let app = app_with!(seeded_repo());

    let req = test::TestRequest::delete().uri("/api/books/example1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Deleted 1 book(s) with ID 'example1'");

    let req = test::TestRequest::delete().uri("/api/books/example1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Book not found");
}

#[actix_web::test]
async fn test_book_can_be_recreated_after_delete() {
    let repo = Arc::new(InMemoryBookRepository::new());
    let app = app_with!(repo.clone());
    let book = json!({"id": "b1", "title": "Dune", "author": "Frank Herbert"});

    let req = json_request(Method::POST, "/api/books", book.clone()).to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = test::TestRequest::delete().uri("/api/books/b1").to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let req = json_request(Method::POST, "/api/books", book).to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Book created successfully.");
    assert_eq!(repo.len().await, 1);
}

#[actix_web::test]
async fn test_html_pages() {
    let app = app_with!(seeded_repo());

    let req = test::TestRequest::get().uri("/books").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("<td>The Black Cat</td>"));

    let req = test::TestRequest::get().uri("/authors").to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    let poe = html.find("Edgar Allan Poe").unwrap();
    let rivera = html.find("José Eustasio Rivera").unwrap();
    let shelley = html.find("Mary Shelley").unwrap();
    assert!(poe < rivera && rivera < shelley);

    let req = test::TestRequest::get().uri("/years").to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(html.find("1818").unwrap() < html.find("1924").unwrap());

    for uri in ["/", "/search"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", uri);
    }
}

#[actix_web::test]
async fn test_health_check() {
    let app = app_with!(seeded_repo());

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_health_check_reports_unreachable_storage() {
    let app = app_with!(Arc::new(UnreachableRepository(InMemoryBookRepository::new())));

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}
