use anyhow::{Context, Result};
use log::{debug, info};

use crate::database::models::{Book, BookField, BookQuery};
use crate::database::repositories::BookRepository;

/// Books the catalogue starts with
pub fn starter_books() -> Vec<Book> {
    [
        (
            "example1",
            "The Vortex",
            "José Eustasio Rivera",
            "958-30-0804-4",
            "292",
            "1924",
        ),
        (
            "example2",
            "Frankenstein",
            "Mary Shelley",
            "978-3-649-64609-9",
            "280",
            "1818",
        ),
        (
            "example3",
            "The Black Cat",
            "Edgar Allan Poe",
            "978-3-99168-238-7",
            "280",
            "1843",
        ),
    ]
    .into_iter()
    .map(|(id, title, author, edition, pages, year)| {
        Book::new(
            id.to_string(),
            title.to_string(),
            author.to_string(),
            edition.to_string(),
            pages.to_string(),
            year.to_string(),
        )
    })
    .collect()
}

/// Insert every starter book whose id is not stored yet.
///
/// Returns the number of books inserted.
pub async fn prepare_data(repo: &dyn BookRepository) -> Result<usize> {
    let mut inserted = 0;

    for book in starter_books() {
        let query = BookQuery::new().with(BookField::Id, book.id.as_str());
        if repo.exists(&query).await? {
            debug!("Book '{}' ({}) already exists", book.title, book.id);
            continue;
        }

        let title = book.title.clone();
        repo.insert(book)
            .await
            .with_context(|| format!("Failed to seed book '{}'", title))?;
        inserted += 1;
    }

    info!("Seeded {} starter book(s)", inserted);
    Ok(inserted)
}
