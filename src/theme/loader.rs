//! Theme loader - resolves a theme directory and copies its assets
//!
//! A theme lives in `_themes/<name>/` and contains:
//! - `templates/`: Tera templates, `index.html` and `post.html` required
//! - `bower_components/`: static assets copied verbatim into the output

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Template directory inside a theme
pub const TEMPLATES_DIR: &str = "templates";

/// Static assets directory inside a theme, mirrored under the output root
pub const STATICS_DIR: &str = "bower_components";

/// A theme on disk
#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    dir: PathBuf,
}

impl Theme {
    /// Load the theme `name` from the themes directory
    pub fn load<P: AsRef<Path>>(themes_dir: P, name: &str) -> Result<Self> {
        let dir = themes_dir.as_ref().join(name);
        if !dir.is_dir() {
            return Err(Error::ThemeNotFound(dir));
        }

        Ok(Self {
            name: name.to_string(),
            dir,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.dir.join(TEMPLATES_DIR)
    }

    pub fn statics_dir(&self) -> PathBuf {
        self.dir.join(STATICS_DIR)
    }

    /// Copy the static assets into `<output_dir>/bower_components`
    ///
    /// Existing files are overwritten; files no longer in the theme are left
    /// in place. Returns the number of files copied.
    pub fn copy_statics(&self, output_dir: &Path) -> Result<usize> {
        let source_dir = self.statics_dir();
        if !source_dir.is_dir() {
            return Err(Error::StaticAssetsMissing(source_dir));
        }
        let target_dir = output_dir.join(STATICS_DIR);

        let mut copied = 0;
        for entry in WalkDir::new(&source_dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&source_dir).to_path_buf();
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                Error::io(path, io)
            })?;
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(&source_dir) else {
                continue;
            };
            let dest = target_dir.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest).map_err(|e| Error::io(&dest, e))?;
            } else {
                fs::copy(path, &dest).map_err(|e| Error::io(path, e))?;
                tracing::debug!("Copied: {:?} -> {:?}", path, dest);
                copied += 1;
            }
        }

        Ok(copied)
    }
}
