//! SEO Tagger - album metadata rewriting and search-friendly file naming
//!
//! Takes one album-level metadata record and an ordered list of MP3, WAV or
//! AIFF files, replaces every file's tags with a fresh ID3v2.3 tag and renames
//! it to `NN-artist-title-keywords.ext`.
//!
//! The library is organized into:
//!
//! - `metadata`: the typed metadata record and its JSON storage
//! - `tagging`: frame mapping table, container inspection, tag rewrite engine
//! - `naming`: output filename generation
//! - `batch`: sequential, partial-success batch processing
//! - `audio`: input discovery
//! - `export`: output directory and JSON batch report
//!
//! # Example
//!
//! ```no_run
//! use seo_tagger::batch::{Batch, process};
//! use seo_tagger::metadata::MetadataRecord;
//!
//! let record = MetadataRecord {
//!     album_artist: "The Band".to_string(),
//!     ..Default::default()
//! };
//! let mut batch = Batch::new();
//! batch.push("Song A.mp3", std::fs::read("Song A.mp3").unwrap());
//!
//! let outcome = process(batch, &record);
//! for item in &outcome.tagged {
//!     println!("{} ({} bytes)", item.filename, item.bytes.len());
//! }
//! ```

pub mod audio;
pub mod batch;
pub mod cli;
pub mod error;
pub mod export;
pub mod logging;
pub mod metadata;
pub mod naming;
pub mod tagging;

#[cfg(test)]
mod test_fixtures;

pub use error::{AppError, FieldError, Result, TagError};
pub use metadata::MetadataRecord;
