pub mod book;
pub mod utils;

pub use book::{Book, BookField, BookQuery};
pub use utils::{bson_to_string, lenient_string, lenient_timestamp};
