//! Theme module - locates theme templates and copies theme assets

mod loader;

pub use loader::{Theme, STATICS_DIR, TEMPLATES_DIR};
