//! Theme templates using the Tera template engine
//!
//! Every file under a theme's `templates/` directory is registered under its
//! path relative to that directory, with `/` separators, so templates can
//! `{% extends %}` and `{% include %}` each other by that name.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::{Error, Result};

/// Template rendering each post page
pub const POST_TEMPLATE: &str = "post.html";

/// Template rendering the site index
pub const INDEX_TEMPLATE: &str = "index.html";

/// Template renderer loaded from a theme directory
pub struct TemplateRenderer {
    tera: Tera,
    dir: PathBuf,
}

impl TemplateRenderer {
    /// Load all templates below `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(Error::TemplateNotFound {
                name: String::from("templates/"),
                dir,
            });
        }

        let files: Vec<(PathBuf, Option<String>)> = template_names(&dir)?
            .into_iter()
            .map(|name| (dir.join(&name), Some(name)))
            .collect();

        let mut tera = Tera::default();
        // Output is HTML we produced ourselves; `post.body.html` must pass through
        tera.autoescape_on(vec![]);
        tera.add_template_files(files).map_err(|e| Error::Template {
            name: dir.display().to_string(),
            source: e,
        })?;

        tracing::debug!("Loaded {} templates from {:?}", tera.get_template_names().count(), dir);

        Ok(Self { tera, dir })
    }

    /// Names of all registered templates, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render a template with given context
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        if !self.contains(name) {
            return Err(Error::TemplateNotFound {
                name: name.to_string(),
                dir: self.dir.clone(),
            });
        }

        self.tera.render(name, context).map_err(|e| Error::Template {
            name: name.to_string(),
            source: e,
        })
    }
}

/// Relative names of every file below `dir`
fn template_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let io = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            Error::io(path, io)
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(dir) {
            let name: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();
            names.push(name.join("/"));
        }
    }
    Ok(names)
}

// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData<'a> {
    pub post: &'a Post,
    pub config: &'a SiteConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexPageData<'a> {
    pub config: &'a SiteConfig,
    pub posts: &'a [Post],
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtraPageData<'a> {
    pub config: &'a SiteConfig,
}

/// Build a Tera context from one of the page data structs
pub fn context_from<T: Serialize>(data: &T, name: &str) -> Result<Context> {
    Context::from_serialize(data).map_err(|e| Error::Template {
        name: name.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn templates(root: &Path) -> PathBuf {
        let dir = root.join("templates");
        fs::create_dir_all(dir.join("_partials")).unwrap();
        fs::write(
            dir.join("_partials/head.html"),
            "<title>{{ config.sitename }}</title>",
        )
        .unwrap();
        fs::write(
            dir.join(INDEX_TEMPLATE),
            "{% include \"_partials/head.html\" %}{% for p in posts %}[{{ p.title }}]{% endfor %}",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_names_are_relative() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::load(templates(dir.path())).unwrap();
        assert_eq!(renderer.names(), vec!["_partials/head.html", "index.html"]);
    }

    #[test]
    fn test_render_index_with_include() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::load(templates(dir.path())).unwrap();

        let config = SiteConfig::default();
        let mut post = Post::new();
        post.set_title("A <b>bold</b> title");
        let posts = vec![post];
        let data = IndexPageData {
            config: &config,
            posts: &posts,
        };
        let html = renderer
            .render(INDEX_TEMPLATE, &context_from(&data, INDEX_TEMPLATE).unwrap())
            .unwrap();
        // Autoescape is off
        assert_eq!(html, "<title>Untitled</title>[A <b>bold</b> title]");
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::load(templates(dir.path())).unwrap();
        let err = renderer.render(POST_TEMPLATE, &Context::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { ref name, .. } if name == POST_TEMPLATE));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateRenderer::load(dir.path().join("templates")).err().unwrap();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }
}
