//! Front-matter parsing
//!
//! A post file is a block of `key: value` lines, a divider line of six
//! hyphens, and the Markdown body:
//!
//! ```text
//! title: Hello World
//! author: anonymuse
//! ------
//! # Hello
//! ```

use indexmap::IndexMap;
use thiserror::Error;

/// Literal token separating the header block from the body
pub const DIVIDER: &str = "------";

/// Header fields of a post, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: IndexMap<String, String>,
}

/// Reasons a file cannot be split into header and body
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    #[error("missing `{}` divider", DIVIDER)]
    MissingDivider,

    #[error("`{}` divider appears {} times, expected once", DIVIDER, .0)]
    RepeatedDivider(usize),
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body) where body is everything after the divider
    pub fn parse(content: &str) -> Result<(Self, &str), SplitError> {
        let mut parts = content.split(DIVIDER);
        let (header, body) = match (parts.next(), parts.next()) {
            (Some(header), Some(body)) => (header, body),
            _ => return Err(SplitError::MissingDivider),
        };
        let extra = parts.count();
        if extra > 0 {
            return Err(SplitError::RepeatedDivider(extra + 1));
        }

        let mut fields = IndexMap::new();
        for line in header.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = line.split_once(':').unwrap_or((line, ""));
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok((Self { fields }, body))
    }

    /// Look up a header value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Remove a header value, returning it
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.fields.shift_remove(key)
    }

    /// Consume into the remaining fields, in file order
    pub fn into_fields(self) -> IndexMap<String, String> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_body() {
        let content = "\ntitle:  Hello World \nauthor: anonymuse\ndate: 18/10/2026 - 10:30:00\n\n------\n\n# Hi\n\ntext  \n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("title"), Some("Hello World"));
        assert_eq!(fm.get("author"), Some("anonymuse"));
        // Only the first colon splits
        assert_eq!(fm.get("date"), Some("18/10/2026 - 10:30:00"));
        assert_eq!(body, "\n\n# Hi\n\ntext  \n");
    }

    #[test]
    fn test_line_without_colon_has_empty_value() {
        let (fm, _) = FrontMatter::parse("title: x\ndraft\n------\nbody").unwrap();
        assert_eq!(fm.get("draft"), Some(""));
        assert_eq!(fm.into_fields().len(), 2);
    }

    #[test]
    fn test_empty_value_kept() {
        let (fm, _) = FrontMatter::parse("tags:\n------\n").unwrap();
        assert_eq!(fm.get("tags"), Some(""));
    }

    #[test]
    fn test_missing_divider() {
        let err = FrontMatter::parse("title: x\n---\nbody").unwrap_err();
        assert_eq!(err, SplitError::MissingDivider);
        assert_eq!(err.to_string(), "missing `------` divider");
    }

    #[test]
    fn test_repeated_divider() {
        let err = FrontMatter::parse("title: x\n------\nbody\n------\nmore").unwrap_err();
        assert_eq!(err, SplitError::RepeatedDivider(2));
        assert_eq!(err.to_string(), "`------` divider appears 2 times, expected once");
    }

    #[test]
    fn test_crlf_header() {
        let (fm, body) = FrontMatter::parse("title: Windows\r\nslug: windows\r\n------\r\nbody").unwrap();
        assert_eq!(fm.get("title"), Some("Windows"));
        assert_eq!(fm.get("slug"), Some("windows"));
        assert_eq!(body, "\r\nbody");
    }

    #[test]
    fn test_take_removes_field() {
        let (mut fm, _) = FrontMatter::parse("a: 1\nb: 2\n------\n").unwrap();
        assert_eq!(fm.take("a"), Some("1".to_string()));
        assert_eq!(fm.get("a"), None);
        assert_eq!(fm.into_fields().len(), 1);
    }
}
