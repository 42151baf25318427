//! Initialize a new site

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{InitOptions, CONFIG_FILE};
use crate::theme::{STATICS_DIR, TEMPLATES_DIR};
use crate::Mot;

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{% block title %}{{ config.sitename }}{% endblock %}</title>
  <link rel="stylesheet" href="/bower_components/style.css">
</head>
<body>
  <header>
    <h1><a href="/index.html">{{ config.sitename }}</a></h1>
    <p>{{ config.payoff }}</p>
  </header>
  <main>{% block content %}{% endblock %}</main>
  <footer>
    {{ config.author }} &middot;
    <a href="{{ config.github }}">GitHub</a> &middot;
    <a href="{{ config.twitter }}">Twitter</a>
  </footer>
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"{% extends "_base.html" %}
{% block content %}
<ul class="posts">
{% for post in posts %}
  <li><a href="/{{ post.href }}">{{ post.title }}</a> <small>{{ post.date }}</small></li>
{% endfor %}
</ul>
{% endblock %}
"#;

const POST_TEMPLATE: &str = r#"{% extends "_base.html" %}
{% block title %}{{ post.title }} - {{ config.sitename }}{% endblock %}
{% block content %}
<article>
  <h2>{{ post.title }}</h2>
  <p class="meta">{{ post.author }}, {{ post.date }}</p>
  {{ post.body.html }}
</article>
{% endblock %}
"#;

const STYLESHEET: &str = r#"body { max-width: 42em; margin: 2em auto; font-family: sans-serif; line-height: 1.5; }
.highlight pre { padding: 1em; overflow-x: auto; }
.meta { color: #777; }
"#;

/// Initialize a new site in the given directory
///
/// An existing `config.json` is only replaced when `force` is set.
pub fn init_site(target_dir: &Path, options: InitOptions, force: bool) -> Result<Mot> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        bail!(
            "{:?} already exists, pass --force to overwrite it",
            config_path
        );
    }

    let config = options.into_config();
    let mot = crate::bootstrap(target_dir, &config)
        .with_context(|| format!("Failed to initialize site in {:?}", target_dir))?;

    let theme_dir = mot.theme_dir();
    if theme_dir.exists() {
        tracing::info!("Keeping existing theme {:?}", theme_dir);
    } else {
        scaffold_theme(&theme_dir)
            .with_context(|| format!("Failed to create theme {:?}", theme_dir))?;
        tracing::info!("Created theme {:?}", theme_dir);
    }

    Ok(mot)
}

/// Write a minimal working theme
fn scaffold_theme(theme_dir: &Path) -> Result<()> {
    let templates = theme_dir.join(TEMPLATES_DIR);
    let statics = theme_dir.join(STATICS_DIR);
    fs::create_dir_all(&templates)?;
    fs::create_dir_all(&statics)?;

    fs::write(templates.join("_base.html"), BASE_TEMPLATE)?;
    fs::write(templates.join("index.html"), INDEX_TEMPLATE)?;
    fs::write(templates.join("post.html"), POST_TEMPLATE)?;
    fs::write(statics.join("style.css"), STYLESHEET)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;

    #[test]
    fn test_init_then_build() {
        let dir = tempfile::tempdir().unwrap();
        let mot = init_site(
            dir.path(),
            InitOptions {
                sitename: Some("Fresh Blog".to_string()),
                ..Default::default()
            },
            false,
        )
        .unwrap();

        let mut post = Post::new();
        post.set_title("First Steps");
        post.set_date(None);
        post.save(&mot.posts_dir, &mot.config).unwrap();

        let summary = mot.build().unwrap();
        assert_eq!(summary.posts, 1);
        assert_eq!(summary.extra_pages, 0);

        let index = fs::read_to_string(mot.dist_dir.join("index.html")).unwrap();
        assert!(index.contains("Fresh Blog"));
        assert!(index.contains(r#"<a href="/post/first-steps.html">First Steps</a>"#));

        let page = fs::read_to_string(mot.dist_dir.join("post/first-steps.html")).unwrap();
        assert!(page.contains("<title>First Steps - Fresh Blog</title>"));
        assert!(page.contains(r#"<div class="highlight">"#));
        assert!(mot.dist_dir.join("bower_components/style.css").exists());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path(), InitOptions::default(), false).unwrap();
        assert!(init_site(dir.path(), InitOptions::default(), false).is_err());

        let mot = init_site(
            dir.path(),
            InitOptions {
                author: Some("Someone".to_string()),
                ..Default::default()
            },
            true,
        )
        .unwrap();
        assert_eq!(Mot::new(dir.path()).unwrap().config.author, "Someone");
        assert_eq!(mot.config.author, "Someone");
    }
}
