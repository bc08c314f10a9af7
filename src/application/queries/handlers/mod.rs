//! Query Handlers

mod novel_handlers;

pub use novel_handlers::{BrowseNovelsHandler, GetNovelHandler, MyNovelsHandler};
