//! Clean the output directory

use anyhow::{Context, Result};
use std::fs;

use crate::Mot;

/// Delete the output directory
pub fn run(mot: &Mot) -> Result<()> {
    if mot.dist_dir.exists() {
        fs::remove_dir_all(&mot.dist_dir)
            .with_context(|| format!("Failed to delete {:?}", mot.dist_dir))?;
        tracing::info!("Deleted: {:?}", mot.dist_dir);
    }

    Ok(())
}
