pub mod book;
pub mod dto;
pub mod service;

pub use book::*;
pub use dto::{BookRequest, BookResponse, FieldValue, MessageResponse};
pub use service::{BookError, BookService};
