//! Site configuration (config.json)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// Name of the configuration file at the site root
pub const CONFIG_FILE: &str = "config.json";

const GITHUB_BASE: &str = "https://github.com/";
const TWITTER_BASE: &str = "https://twitter.com/";

/// Optional extra key selecting the code highlighting theme
pub const HIGHLIGHT_THEME_KEY: &str = "highlight_theme";

/// Main site configuration
///
/// Field order is the serialization order, and matches the order `init`
/// asks for the values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub sitename: String,
    pub payoff: String,
    pub author: String,
    pub theme: String,
    pub github: String,
    pub twitter: String,

    /// Any additional keys, kept in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            sitename: "Untitled".to_string(),
            payoff: "Payoff".to_string(),
            author: "anonymuse".to_string(),
            theme: "default".to_string(),
            github: GITHUB_BASE.to_string(),
            twitter: TWITTER_BASE.to_string(),
            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
            _ => Error::io(path, e),
        })?;
        let config: SiteConfig = serde_json::from_str(&content).map_err(|e| Error::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Write configuration as four-space indented JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json().map_err(|e| Error::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Name of the syntect colour theme for code blocks, from the
    /// optional `highlight_theme` key
    pub fn highlight_theme(&self) -> Option<&str> {
        self.extra.get(HIGHLIGHT_THEME_KEY).and_then(serde_json::Value::as_str)
    }

    /// Check the fields the build depends on
    pub fn validate(&self, path: &Path) -> Result<()> {
        let theme = self.theme.as_str();
        let invalid = |message: &str| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        if theme.trim().is_empty() {
            return Err(invalid("`theme` must not be empty"));
        }
        if theme.trim() != theme {
            return Err(invalid("`theme` must not have leading or trailing whitespace"));
        }
        if theme.contains(['/', '\\']) || theme == "." || theme == ".." {
            return Err(invalid("`theme` must be a directory name under _themes"));
        }
        if let Some(value) = self.extra.get(HIGHLIGHT_THEME_KEY) {
            if !value.is_string() {
                return Err(invalid("`highlight_theme` must be a string"));
            }
        }

        Ok(())
    }
}

/// Values for a new site, typically from `mot init` flags
///
/// Every unset field falls back to the [`SiteConfig`] default.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub sitename: Option<String>,
    pub payoff: Option<String>,
    pub author: Option<String>,
    pub theme: Option<String>,
    /// GitHub user name, appended to the profile base URL
    pub github: Option<String>,
    /// Twitter handle, appended to the profile base URL
    pub twitter: Option<String>,
}

impl InitOptions {
    /// Apply defaults and produce the configuration to persist
    pub fn into_config(self) -> SiteConfig {
        let defaults = SiteConfig::default();
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        SiteConfig {
            sitename: non_empty(self.sitename).unwrap_or(defaults.sitename),
            payoff: non_empty(self.payoff).unwrap_or(defaults.payoff),
            author: non_empty(self.author).unwrap_or(defaults.author),
            theme: non_empty(self.theme).unwrap_or(defaults.theme),
            github: profile_url(GITHUB_BASE, non_empty(self.github)),
            twitter: profile_url(TWITTER_BASE, non_empty(self.twitter)),
            extra: IndexMap::new(),
        }
    }
}

fn profile_url(base: &str, handle: Option<String>) -> String {
    match handle {
        Some(h) => format!("{}{}", base, h.trim_start_matches('@')),
        None => base.to_string(),
    }
}
