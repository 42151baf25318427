//! mot: just an ordinary static blog engine
//!
//! Posts are Markdown files with a small `key: value` header, rendered
//! through a theme's Tera templates into a static `dist/` directory.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod server;
pub mod templates;
pub mod theme;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// Posts directory under the site root
pub const POSTS_DIR: &str = "_posts";

/// Themes directory under the site root
pub const THEMES_DIR: &str = "_themes";

/// Output directory under the site root
pub const DIST_DIR: &str = "dist";

/// A site on disk, with its configuration loaded once
#[derive(Debug, Clone)]
pub struct Mot {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts directory
    pub posts_dir: PathBuf,
    /// Directory holding all themes
    pub themes_dir: PathBuf,
    /// Output directory
    pub dist_dir: PathBuf,
}

impl Mot {
    /// Open the site rooted at `base_dir`, reading its `config.json`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::load(base_dir.join(config::CONFIG_FILE))?;
        Ok(Self::with_config(base_dir, config))
    }

    /// Use an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        Self {
            config,
            posts_dir: base_dir.join(POSTS_DIR),
            themes_dir: base_dir.join(THEMES_DIR),
            dist_dir: base_dir.join(DIST_DIR),
            base_dir,
        }
    }

    /// Directory of the configured theme
    pub fn theme_dir(&self) -> PathBuf {
        self.themes_dir.join(&self.config.theme)
    }

    /// Build the static site
    pub fn build(&self) -> Result<generator::BuildSummary> {
        generator::SiteBuilder::new(self)?.build()
    }

    /// Post repository rendering code blocks with the configured highlight theme
    pub fn repository(&self) -> Result<content::PostRepository> {
        let highlighter = match self.config.highlight_theme() {
            Some(name) => content::SyntectHighlighter::with_theme(name).ok_or_else(|| {
                Error::InvalidConfig {
                    path: self.base_dir.join(config::CONFIG_FILE),
                    message: format!("unknown `{}` `{}`", config::HIGHLIGHT_THEME_KEY, name),
                }
            })?,
            None => content::SyntectHighlighter::new(),
        };
        Ok(content::PostRepository::with_renderer(
            content::MarkdownRenderer::with_highlighter(highlighter),
        ))
    }

    /// Load all posts, newest first
    pub fn posts(&self) -> Result<Vec<content::Post>> {
        let mut posts = self.repository()?.load_all(&self.posts_dir)?;
        content::loader::sort_newest_first(&mut posts);
        Ok(posts)
    }
}

/// Write `config.json` and create the site directories under `base_dir`
pub fn bootstrap(base_dir: &Path, config: &config::SiteConfig) -> Result<Mot> {
    config.validate(&base_dir.join(config::CONFIG_FILE))?;

    for dir in [
        base_dir.to_path_buf(),
        base_dir.join(POSTS_DIR),
        base_dir.join(THEMES_DIR),
        base_dir.join(DIST_DIR),
    ] {
        std::fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    }
    config.save(base_dir.join(config::CONFIG_FILE))?;

    Ok(Mot::with_config(base_dir.to_path_buf(), config.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::SiteConfig {
            sitename: "Fresh".to_string(),
            ..Default::default()
        };
        let created = bootstrap(dir.path(), &config).unwrap();
        assert!(created.posts_dir.is_dir());
        assert!(created.themes_dir.is_dir());
        assert!(created.dist_dir.is_dir());

        let opened = Mot::new(dir.path()).unwrap();
        assert_eq!(opened.config, config);
        assert_eq!(opened.theme_dir(), dir.path().join("_themes/default"));
    }

    #[test]
    fn test_repository_uses_highlight_theme() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config::SiteConfig::default();
        config
            .extra
            .insert(config::HIGHLIGHT_THEME_KEY.to_string(), "InspiredGitHub".into());
        let mot = bootstrap(dir.path(), &config).unwrap();
        std::fs::write(
            mot.posts_dir.join("code.md"),
            "title: Code\n------\n```python\nprint(1)\n```\n",
        )
        .unwrap();

        // InspiredGitHub has a white background, base16-ocean.dark does not
        let posts = mot.posts().unwrap();
        assert!(posts[0].body.html.contains("background-color:#ffffff"));

        let mut unknown = mot.clone();
        unknown
            .config
            .extra
            .insert(config::HIGHLIGHT_THEME_KEY.to_string(), "no-such-theme".into());
        assert!(matches!(unknown.repository(), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_open_without_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(Mot::new(dir.path()), Err(Error::ConfigNotFound(_))));
    }
}
