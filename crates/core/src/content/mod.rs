//! Page content model shared by document parsers and the spatial index.

pub mod element;
pub mod loader;
pub mod page;

pub use element::{Block, Char, ElementKind, Line, TextElement};
pub use loader::ContentFile;
pub use page::PageContent;
