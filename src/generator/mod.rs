//! Generator module - builds the static site from posts and theme templates
//!
//! A build runs these stages in order, aborting on the first error:
//!
//! 1. load every post from `_posts/`
//! 2. render `post.html` once per post into `dist/post/<slug>.html`
//! 3. render `index.html` into `dist/index.html`
//! 4. render every other template into the mirrored path under `dist/`
//! 5. copy the theme's `bower_components/` into `dist/bower_components/`
//!
//! Outputs from stages that already ran stay on disk after a failure.
//! Re-running overwrites them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::content::loader::sort_newest_first;
use crate::content::{Post, PostRepository, POSTS_OUTPUT_DIR};
use crate::error::{BuildStage, Error, Result};
use crate::templates::{
    context_from, ExtraPageData, IndexPageData, PostPageData, TemplateRenderer, INDEX_TEMPLATE,
    POST_TEMPLATE,
};
use crate::theme::Theme;
use crate::Mot;

/// Counts reported after a successful build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub posts: usize,
    pub extra_pages: usize,
    pub static_files: usize,
}

/// Static site builder
pub struct SiteBuilder<'a> {
    mot: &'a Mot,
    repository: PostRepository,
    theme: Theme,
    renderer: TemplateRenderer,
    stage: BuildStage,
    posts: Vec<Post>,
}

impl<'a> SiteBuilder<'a> {
    /// Resolve the configured theme and load its templates
    pub fn new(mot: &'a Mot) -> Result<Self> {
        Self::with_repository(mot, mot.repository()?)
    }

    pub fn with_repository(mot: &'a Mot, repository: PostRepository) -> Result<Self> {
        let theme = Theme::load(&mot.themes_dir, &mot.config.theme)?;
        let renderer = TemplateRenderer::load(theme.templates_dir())?;
        tracing::debug!("Using theme `{}`", theme.name());

        Ok(Self {
            mot,
            repository,
            theme,
            renderer,
            stage: BuildStage::Idle,
            posts: Vec::new(),
        })
    }

    /// Last stage that completed
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Posts loaded by the current build, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Run every stage
    pub fn build(&mut self) -> Result<BuildSummary> {
        let start = std::time::Instant::now();
        self.stage = BuildStage::Idle;
        let mut summary = BuildSummary::default();

        self.advance(BuildStage::PostsLoaded, |b| b.load_posts())?;
        summary.posts = self.posts.len();
        tracing::info!("Loaded {} posts", summary.posts);

        self.advance(BuildStage::PostsRendered, |b| b.render_posts())?;
        self.advance(BuildStage::IndexRendered, |b| b.render_index())?;

        let mut extra_pages = 0;
        self.advance(BuildStage::ExtrasRendered, |b| {
            extra_pages = b.render_extras()?;
            Ok(())
        })?;
        summary.extra_pages = extra_pages;

        let mut static_files = 0;
        self.advance(BuildStage::StaticsCopied, |b| {
            static_files = b.theme.copy_statics(&b.mot.dist_dir)?;
            Ok(())
        })?;
        summary.static_files = static_files;

        tracing::info!(
            "Built {} posts, {} extra pages, {} static files in {:.2}s",
            summary.posts,
            summary.extra_pages,
            summary.static_files,
            start.elapsed().as_secs_f64()
        );

        Ok(summary)
    }

    fn advance<F>(&mut self, next: BuildStage, step: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        tracing::debug!("Stage: {}", next);
        step(self).map_err(|e| e.in_stage(next))?;
        self.stage = next;
        Ok(())
    }

    fn load_posts(&mut self) -> Result<()> {
        let mut posts = self.repository.load_all(&self.mot.posts_dir)?;
        sort_newest_first(&mut posts);
        self.posts = posts;
        Ok(())
    }

    fn render_posts(&self) -> Result<()> {
        let posts_dir = self.mot.dist_dir.join(POSTS_OUTPUT_DIR);
        create_dir(&posts_dir)?;

        for post in &self.posts {
            let data = PostPageData {
                post,
                config: &self.mot.config,
            };
            let html = self
                .renderer
                .render(POST_TEMPLATE, &context_from(&data, POST_TEMPLATE)?)?;

            let output_path = self.mot.dist_dir.join(&post.href);
            write_file(&output_path, &html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(())
    }

    fn render_index(&self) -> Result<()> {
        let data = IndexPageData {
            config: &self.mot.config,
            posts: &self.posts,
        };
        let html = self
            .renderer
            .render(INDEX_TEMPLATE, &context_from(&data, INDEX_TEMPLATE)?)?;

        create_dir(&self.mot.dist_dir)?;
        write_file(&self.mot.dist_dir.join(INDEX_TEMPLATE), &html)?;
        tracing::info!("Generated index.html");

        Ok(())
    }

    fn render_extras(&self) -> Result<usize> {
        let data = ExtraPageData {
            config: &self.mot.config,
        };

        let mut count = 0;
        for name in self.renderer.names() {
            if !is_extra_page(&name) {
                continue;
            }

            let html = self.renderer.render(&name, &context_from(&data, &name)?)?;
            let output_path: PathBuf = self.mot.dist_dir.join(&name);
            if let Some(parent) = output_path.parent() {
                create_dir(parent)?;
            }
            write_file(&output_path, &html)?;
            tracing::debug!("Generated page: {:?}", output_path);
            count += 1;
        }

        Ok(count)
    }
}

/// Whether a template is rendered as a standalone page
///
/// `index.html` and `post.html` have their own stages; any path component
/// starting with `_` or `.` marks a partial or layout.
fn is_extra_page(name: &str) -> bool {
    if name == INDEX_TEMPLATE || name == POST_TEMPLATE {
        return false;
    }
    !name
        .split('/')
        .any(|part| part.starts_with('_') || part.starts_with('.'))
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}
