//! Error types for the build pipeline

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Stages of a site build, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Idle,
    PostsLoaded,
    PostsRendered,
    IndexRendered,
    ExtrasRendered,
    StaticsCopied,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Idle => "idle",
            BuildStage::PostsLoaded => "load posts",
            BuildStage::PostsRendered => "render posts",
            BuildStage::IndexRendered => "render index",
            BuildStage::ExtrasRendered => "render extra pages",
            BuildStage::StaticsCopied => "copy static assets",
        };
        f.write_str(name)
    }
}

/// Errors raised while loading configuration, parsing posts or building
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config file not found: {0:?} (run `mot init` first)")]
    ConfigNotFound(PathBuf),

    #[error("Invalid config {path:?}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Malformed post {path:?}: {message}")]
    MalformedPost { path: PathBuf, message: String },

    #[error("Cannot save post: `{0}` is not set")]
    IncompletePost(&'static str),

    #[error("Failed to render post {path:?}")]
    PostRender {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Unknown language in fenced code block: `{0}`")]
    UnknownLanguage(String),

    #[error("Failed to highlight `{lang}` code block: {source}")]
    Highlight {
        lang: String,
        #[source]
        source: syntect::Error,
    },

    #[error("Theme directory not found: {0:?}")]
    ThemeNotFound(PathBuf),

    #[error("Template `{name}` not found in {dir:?}")]
    TemplateNotFound { name: String, dir: PathBuf },

    #[error("Failed to render template `{name}`")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Static assets directory not found: {0:?}")]
    StaticAssetsMissing(PathBuf),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Build failed during `{stage}` stage")]
    Build {
        stage: BuildStage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an IO error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the build stage that was running when this error occurred
    pub fn in_stage(self, stage: BuildStage) -> Self {
        Error::Build {
            stage,
            source: Box::new(self),
        }
    }
}
