//! Content module - handles posts and their parsing and rendering

pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::PostRepository;
pub use markdown::{
    HighlightingCodeRenderer, MarkdownRenderer, SyntectHighlighter, DEFAULT_HIGHLIGHT_THEME,
};
pub use post::{href_for, slugify, Body, Post, DATE_SLUG_FORMAT, DISPLAY_DATE_FORMAT, POSTS_OUTPUT_DIR};
