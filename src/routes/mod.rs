pub mod book;
pub mod pages;
pub mod routes;

pub use routes::*;
