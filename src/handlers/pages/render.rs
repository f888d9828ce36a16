use anyhow::{Context, Result};
use handlebars::{Handlebars, RenderError};
use serde_json::json;

use crate::handlers::book::BookResponse;

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("templates/header.hbs")),
    ("footer", include_str!("templates/footer.hbs")),
];

const PAGES: [(&str, &str); 5] = [
    ("index", include_str!("templates/index.hbs")),
    ("book-table", include_str!("templates/book-table.hbs")),
    ("authors", include_str!("templates/authors.hbs")),
    ("years", include_str!("templates/years.hbs")),
    ("search-bar", include_str!("templates/search-bar.hbs")),
];

/// HTML page renderer backed by Handlebars.
///
/// Templates are compiled into the binary; values are HTML-escaped by the
/// default escape function.
#[derive(Debug)]
pub struct PageRenderer {
    engine: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);

        for (name, source) in PARTIALS {
            engine
                .register_partial(name, source)
                .with_context(|| format!("Failed to register partial '{}'", name))?;
        }

        for (name, source) in PAGES {
            engine
                .register_template_string(name, source)
                .with_context(|| format!("Failed to register template '{}'", name))?;
        }

        Ok(Self { engine })
    }

    pub fn index_page(&self) -> Result<String, RenderError> {
        self.engine
            .render("index", &json!({ "title": "Book Catalogue" }))
    }

    pub fn book_table_page(&self, books: &[BookResponse]) -> Result<String, RenderError> {
        self.engine
            .render("book-table", &json!({ "title": "Books", "books": books }))
    }

    pub fn authors_page(&self, authors: &[String]) -> Result<String, RenderError> {
        self.engine
            .render("authors", &json!({ "title": "Authors", "authors": authors }))
    }

    pub fn years_page(&self, years: &[String]) -> Result<String, RenderError> {
        self.engine
            .render("years", &json!({ "title": "Years", "years": years }))
    }

    /// Search runs in the browser against `/api/books`.
    pub fn search_page(&self) -> Result<String, RenderError> {
        self.engine
            .render("search-bar", &json!({ "title": "Search" }))
    }
}
