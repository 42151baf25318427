//! Post repository - loads posts from the posts directory

use std::path::Path;
use walkdir::WalkDir;

use super::{MarkdownRenderer, Post};
use crate::error::{Error, Result};

/// Loads every post file found directly inside a directory
pub struct PostRepository {
    renderer: MarkdownRenderer,
}

impl PostRepository {
    /// Create a repository rendering with the default highlighter
    pub fn new() -> Self {
        Self::with_renderer(MarkdownRenderer::new())
    }

    pub fn with_renderer(renderer: MarkdownRenderer) -> Self {
        Self { renderer }
    }

    /// Load all `*.md` files in `posts_dir`, not descending into subdirectories
    ///
    /// Posts come back in directory enumeration order. A missing directory
    /// yields no posts.
    pub fn load_all(&self, posts_dir: &Path) -> Result<Vec<Post>> {
        if !posts_dir.exists() {
            tracing::warn!("Posts directory {:?} does not exist", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(posts_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(posts_dir).to_path_buf();
                match e.into_io_error() {
                    Some(io) => Error::io(path, io),
                    None => Error::io(path, std::io::Error::other("filesystem loop")),
                }
            })?;

            let path = entry.path();
            if entry.file_type().is_file() && is_markdown_file(path) {
                let post = Post::load(path, &self.renderer)?;
                tracing::debug!("Loaded post {:?} -> {}", path, post.href);
                posts.push(post);
            }
        }

        Ok(posts)
    }
}

impl Default for PostRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Order posts by `date_slug`, newest first
///
/// Slug breaks ties so the order never depends on directory enumeration.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.date_slug
            .cmp(&a.date_slug)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

/// Check if a file is a markdown post
fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
