pub mod pages;
pub mod render;

pub use pages::*;
pub use render::PageRenderer;
