//! Post model

use chrono::{Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::frontmatter::{FrontMatter, DIVIDER};
use super::MarkdownRenderer;
use crate::config::SiteConfig;
use crate::error::{Error, Result};

/// Sortable timestamp used as the file name prefix
pub const DATE_SLUG_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Human readable timestamp stored in the `date` header
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y - %H:%M:%S";

/// Directory (relative to the output root) holding rendered posts
pub const POSTS_OUTPUT_DIR: &str = "post";

/// Body written into newly created posts
const PLACEHOLDER_BODY: &str = r#"
# Lorem Ipsum

Lorem ipsum dolor sit amet, dolores noluisse nam et. Ex wisi volumus duo. Choro
scribentur sea et, pri et essent viderer appetere. Eu mel wisi error mollis.

```python
def generated_by(engine):
    print(engine)

generated_by('mot')
```

Est te veri euismod. At qui soleat discere offendit, diceret consulatu ad qui,
vide tractatos quo. No simul laoreet tibique eam, est ad putant nusquam.
"#;

/// Markdown source and its rendered HTML
#[derive(Debug, Clone, Default, Serialize)]
pub struct Body {
    pub md: String,
    pub html: String,
}

/// A blog post
#[derive(Debug, Clone, Default, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Author name
    pub author: String,

    /// Display date
    pub date: String,

    /// Sortable timestamp, also the file name prefix
    pub date_slug: String,

    /// Slug (URL-friendly name)
    pub slug: String,

    /// Free-form tags
    pub tags: String,

    pub body: Body,

    /// Output path relative to the site root
    pub href: String,

    /// Header keys with no dedicated field
    pub extra: IndexMap<String, String>,

    /// Source file, when loaded from disk
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Post {
    /// Create an empty post to be filled in with `set_title` and `set_date`
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a post from a file and render its body
    pub fn load(path: &Path, renderer: &MarkdownRenderer) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::MalformedPost {
            path: path.to_path_buf(),
            message: format!("cannot read file: {}", e),
        })?;
        let malformed = |message: String| Error::MalformedPost {
            path: path.to_path_buf(),
            message,
        };

        let (mut fm, body) = FrontMatter::parse(&content).map_err(|e| malformed(e.to_string()))?;

        let title = fm.take("title").unwrap_or_default();
        let slug = match fm.take("slug").filter(|s| !s.is_empty()) {
            Some(slug) => slug,
            None if !title.is_empty() => slugify(&title),
            None => return Err(malformed("neither `slug` nor `title` is set".to_string())),
        };
        let date_slug = fm
            .take("date_slug")
            .filter(|s| !s.is_empty())
            .or_else(|| date_slug_from_path(path))
            .unwrap_or_default();

        let html = renderer.render(body).map_err(|e| Error::PostRender {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        Ok(Self {
            author: fm.take("author").unwrap_or_default(),
            date: fm.take("date").unwrap_or_default(),
            tags: fm.take("tags").unwrap_or_default(),
            href: href_for(&slug),
            title,
            date_slug,
            slug,
            body: Body {
                md: body.to_string(),
                html,
            },
            extra: fm.into_fields(),
            source: Some(path.to_path_buf()),
        })
    }

    /// Set the title and derive the slug from it
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.slug = slugify(title);
        self.href = href_for(&self.slug);
    }

    /// Set both timestamps, using the current local time when `date` is `None`
    pub fn set_date(&mut self, date: Option<NaiveDateTime>) {
        let date = date.unwrap_or_else(|| Local::now().naive_local());
        self.date_slug = date.format(DATE_SLUG_FORMAT).to_string();
        self.date = date.format(DISPLAY_DATE_FORMAT).to_string();
    }

    /// File name this post is saved under
    pub fn filename(&self) -> String {
        format!("{}-{}.md", self.date_slug, self.slug)
    }

    /// Write a new post file into `posts_dir` and return its path
    ///
    /// An existing file with the same name is overwritten.
    pub fn save(&mut self, posts_dir: &Path, config: &SiteConfig) -> Result<PathBuf> {
        if self.title.is_empty() {
            return Err(Error::IncompletePost("title"));
        }
        if self.date_slug.is_empty() {
            return Err(Error::IncompletePost("date"));
        }

        if self.author.is_empty() {
            self.author = config.author.clone();
        }
        self.body.md = PLACEHOLDER_BODY.to_string();

        let path = posts_dir.join(self.filename());
        fs::write(&path, self.to_front_matter()).map_err(|e| Error::io(&path, e))?;
        tracing::info!("Created post {:?}", path);

        Ok(path)
    }

    /// Serialize to the on-disk post format
    pub fn to_front_matter(&self) -> String {
        let mut out = String::from("\n");
        for (key, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("date", &self.date),
            ("slug", &self.slug),
            ("tags", &self.tags),
        ] {
            push_field(&mut out, key, value);
        }
        for (key, value) in &self.extra {
            push_field(&mut out, key, value);
        }
        out.push('\n');
        out.push_str(DIVIDER);
        out.push('\n');
        out.push_str(&self.body.md);
        out
    }
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push(':');
    if !value.is_empty() {
        out.push(' ');
        out.push_str(value);
    }
    out.push('\n');
}

/// Derive a slug: lowercase, spaces to hyphens, quotes removed
///
/// Other punctuation is kept as is.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .replace(['\'', '"'], "")
}

/// Output path of a post relative to the site root
pub fn href_for(slug: &str) -> String {
    format!("{}/{}.html", POSTS_OUTPUT_DIR, slug)
}

/// Recover the timestamp prefix from a `<date_slug>-<slug>.md` file name
fn date_slug_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let prefix = stem.get(..19)?;
    NaiveDateTime::parse_from_str(prefix, DATE_SLUG_FORMAT).ok()?;
    Some(prefix.to_string())
}
