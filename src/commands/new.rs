//! Create a new post

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

use crate::content::Post;
use crate::Mot;

/// Formats accepted by `post new --date`
const DATE_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a `--date` value; a bare date means midnight
pub fn parse_date(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    for fmt in DATE_INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    bail!(
        "Invalid date {:?}, expected YYYY-MM-DD [HH:MM[:SS]]",
        input
    )
}

/// Create a post file in the posts directory and return its path
pub fn create_post(
    mot: &Mot,
    title: &str,
    date: Option<NaiveDateTime>,
    author: Option<&str>,
) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        bail!("A post needs a title");
    }

    fs::create_dir_all(&mot.posts_dir)
        .with_context(|| format!("Failed to create {:?}", mot.posts_dir))?;

    let mut post = Post::new();
    post.set_title(title);
    post.set_date(date);
    if let Some(author) = author {
        post.author = author.to_string();
    }

    let path = post.save(&mot.posts_dir, &mot.config)?;
    Ok(path)
}

/// Run the new command; title words are joined with spaces
pub fn run(mot: &Mot, words: &[String], date: Option<&str>, author: Option<&str>) -> Result<PathBuf> {
    let date = date.map(parse_date).transpose()?;
    create_post(mot, &words.join(" "), date, author)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_parse_date() {
        let dt = parse_date("2026-10-18 07:08:09").unwrap();
        assert_eq!(dt.format("%Y-%m-%d-%H-%M-%S").to_string(), "2026-10-18-07-08-09");
        let dt = parse_date("2026-10-18").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_run_creates_post() {
        let dir = tempfile::tempdir().unwrap();
        let mot = Mot::with_config(dir.path().to_path_buf(), SiteConfig::default());

        let words = vec!["Hello".to_string(), "World".to_string()];
        let path = run(&mot, &words, Some("2026-10-18 07:08:09"), Some("Guest")).unwrap();
        assert_eq!(path, mot.posts_dir.join("2026-10-18-07-08-09-hello-world.md"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("title: Hello World\n"));
        assert!(text.contains("author: Guest\n"));
        assert!(text.contains("slug: hello-world\n"));
    }

    #[test]
    fn test_empty_title() {
        let dir = tempfile::tempdir().unwrap();
        let mot = Mot::with_config(dir.path().to_path_buf(), SiteConfig::default());
        assert!(run(&mot, &[], None, None).is_err());
    }
}
