//! Generate static files

use anyhow::{Context, Result};

use crate::generator::{BuildSummary, SiteBuilder};
use crate::Mot;

/// Build the whole site into the output directory
pub fn run(mot: &Mot) -> Result<BuildSummary> {
    let mut builder = SiteBuilder::new(mot)
        .with_context(|| format!("Failed to prepare theme `{}`", mot.config.theme))?;
    let summary = builder
        .build()
        .with_context(|| format!("Failed to build site into {:?}", mot.dist_dir))?;
    Ok(summary)
}
