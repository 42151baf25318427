//! Configuration module

mod site;

pub use site::{InitOptions, SiteConfig, CONFIG_FILE, HIGHLIGHT_THEME_KEY};
