//! Metadata storage for loading and saving batch metadata as JSON

use super::record::{MetadataRecord, RawMetadata, RawYear, UNKNOWN};
use crate::error::{AppError, Result};
use std::fs;
use std::path::Path;

/// Save a metadata record to a JSON file
pub fn save_metadata(record: &MetadataRecord, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&record.to_raw())?;

    fs::write(path, json).map_err(|e| AppError::Output {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::debug!("Saved metadata to {}", path.display());
    Ok(())
}

/// Load a metadata record from a JSON file
///
/// Invalid year and rating values are corrected, not rejected.
pub fn load_metadata(path: &Path) -> Result<MetadataRecord> {
    let contents = fs::read_to_string(path).map_err(|source| AppError::MetadataRead {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawMetadata =
        serde_json::from_str(&contents).map_err(|source| AppError::MetadataParse {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("Loaded metadata from {}", path.display());
    Ok(MetadataRecord::from_raw(raw))
}

/// A metadata document with every key present, for users to fill in
pub fn template() -> RawMetadata {
    let empty = || Some(String::new());
    RawMetadata {
        album_title: Some(UNKNOWN.to_string()),
        subtitle: empty(),
        rating: Some(1),
        comment: empty(),
        contributing_artists: empty(),
        album_artist: Some(UNKNOWN.to_string()),
        year: Some(RawYear::Text(UNKNOWN.to_string())),
        genre: empty(),
        publisher: empty(),
        copyright: empty(),
        author_url: empty(),
        publisher_url: empty(),
        composers: empty(),
        conductors: empty(),
        group_description: empty(),
        mood: empty(),
        part_of_set: empty(),
        original_key: empty(),
        protected: empty(),
        keywords: empty(),
    }
}

/// Write the template document to a file
pub fn write_template(path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&template())?;

    fs::write(path, json).map_err(|e| AppError::Output {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(())
}
