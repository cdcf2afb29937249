use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::batch::Batch;
use crate::error::{AppError, Result};

/// Check if a file is a taggable audio file based on its extension
pub fn is_audio_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "mp3" | "mp2" | "mp1" | "mpga" | "wav" | "aiff" | "aif")
    } else {
        false
    }
}

/// Expand command-line inputs into an ordered list of audio files
///
/// Files are kept as given, whatever their extension. Directories are walked
/// recursively in file-name order and filtered to audio extensions.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            let before = files.len();
            for entry in WalkDir::new(input)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_audio_file(path) {
                    files.push(path.to_path_buf());
                }
            }
            log::debug!(
                "Found {} audio file(s) in {}",
                files.len() - before,
                input.display()
            );
        } else {
            return Err(AppError::InputNotFound(input.clone()));
        }
    }

    if files.is_empty() {
        return Err(AppError::NoInputs);
    }

    Ok(files)
}

/// Read files into a batch, keeping their order
pub fn read_batch(paths: &[PathBuf]) -> Result<Batch> {
    let mut batch = Batch::new();

    for path in paths {
        let bytes = fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        batch.push(filename, bytes);
    }

    Ok(batch)
}
