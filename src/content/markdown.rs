//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::error::{Error, Result};

/// Colour theme used when none is requested
pub const DEFAULT_HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Renders the contents of a code block to HTML
///
/// `lang` is the first word of a fenced block's info string, or `None` for
/// untagged and indented blocks.
pub trait HighlightingCodeRenderer {
    fn render_fenced_block(&self, text: &str, lang: Option<&str>) -> Result<String>;
}

/// Highlighter backed by syntect's bundled syntaxes
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Create a highlighter using [`DEFAULT_HIGHLIGHT_THEME`]
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: themes.remove(DEFAULT_HIGHLIGHT_THEME).unwrap_or_default(),
        }
    }

    /// Create with one of syntect's default themes, if it exists
    pub fn with_theme(name: &str) -> Option<Self> {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes.remove(name)?;
        Some(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        match lang.to_ascii_lowercase().as_str() {
            "text" | "plain" | "plaintext" => Some(self.syntax_set.find_syntax_plain_text()),
            token => self.syntax_set.find_syntax_by_token(token),
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightingCodeRenderer for SyntectHighlighter {
    fn render_fenced_block(&self, text: &str, lang: Option<&str>) -> Result<String> {
        let lang = match lang {
            Some(lang) => lang,
            None => return Ok(format!("\n<pre><code>{}</code></pre>\n", html_escape(text.trim()))),
        };

        let syntax = self
            .find_syntax(lang)
            .ok_or_else(|| Error::UnknownLanguage(lang.to_string()))?;

        let code = format!("{}\n", text.trim());
        let highlighted = highlighted_html_for_string(&code, &self.syntax_set, syntax, &self.theme)
            .map_err(|e| Error::Highlight {
                lang: lang.to_string(),
                source: e,
            })?;

        Ok(format!("<div class=\"highlight\">{}</div>\n", highlighted))
    }
}

/// Markdown renderer with pluggable code block highlighting
pub struct MarkdownRenderer {
    highlighter: Box<dyn HighlightingCodeRenderer>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer using syntect
    pub fn new() -> Self {
        Self::with_highlighter(SyntectHighlighter::new())
    }

    /// Create with a custom code block renderer
    pub fn with_highlighter<H: HighlightingCodeRenderer + 'static>(highlighter: H) -> Self {
        Self {
            highlighter: Box::new(highlighter),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Plain CommonMark; fenced code is part of it
        let parser = Parser::new_ext(markdown, Options::empty());

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, text)) = code_block.take() {
                        let html = self.highlighter.render_fenced_block(&text, lang.as_deref())?;
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, buf)) => buf.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
