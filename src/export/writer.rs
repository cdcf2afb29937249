//! Output directory management
//!
//! Writes tagged items into a single delivery directory. Output names are
//! written as-is; when two items share a name the later one wins.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::TaggedItem;
use crate::error::{AppError, Result};

/// Writes tagged items into an output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    /// Create a writer, creating the output directory if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(AppError::Output {
                path: output_dir,
                reason: "exists and is not a directory".to_string(),
            });
        }

        fs::create_dir_all(&output_dir).map_err(|e| AppError::Output {
            path: output_dir.clone(),
            reason: format!("Failed to create output directory: {}", e),
        })?;

        log::debug!("Output directory: {}", output_dir.display());
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every item, returning the paths in item order
    pub fn write_items(&self, items: &[TaggedItem]) -> Result<Vec<PathBuf>> {
        let mut written = HashSet::new();
        let mut paths = Vec::with_capacity(items.len());

        for item in items {
            let path = self.output_dir.join(&item.filename);

            if !written.insert(item.filename.as_str()) {
                log::warn!(
                    "Overwriting {} with track {} ({})",
                    item.filename,
                    item.track_number,
                    item.source_filename
                );
            }

            fs::write(&path, &item.bytes).map_err(|e| AppError::Output {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            log::debug!("Wrote {} ({} bytes)", path.display(), item.bytes.len());
            paths.push(path);
        }

        Ok(paths)
    }
}
