//! Sequential batch processing
//!
//! Every item is rewritten and renamed in input order. A failing item is
//! recorded and skipped; the rest of the batch still runs.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::TagError;
use crate::metadata::MetadataRecord;
use crate::naming::slug;
use crate::tagging::rewrite;

/// One input file waiting to be tagged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioItem {
    /// 1-based position in the batch, used as the track number
    pub position: u32,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Ordered collection of input items
#[derive(Debug, Clone, Default)]
pub struct Batch {
    items: Vec<AudioItem>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return its 1-based position
    pub fn push(&mut self, filename: impl Into<String>, bytes: Vec<u8>) -> u32 {
        let position = self.items.len() as u32 + 1;
        self.items.push(AudioItem {
            position,
            filename: filename.into(),
            bytes,
        });
        position
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[AudioItem] {
        &self.items
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<u8>)> for Batch {
    fn from_iter<I: IntoIterator<Item = (S, Vec<u8>)>>(iter: I) -> Self {
        let mut batch = Batch::new();
        for (filename, bytes) in iter {
            batch.push(filename, bytes);
        }
        batch
    }
}

/// A successfully tagged and renamed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedItem {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub track_number: u32,
    pub source_filename: String,
}

/// An item the engine could not tag
#[derive(Debug)]
pub struct ItemFailure {
    pub position: u32,
    pub filename: String,
    pub error: TagError,
}

/// Several tagged items that ended up with the same output name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCollision {
    pub filename: String,
    /// Track numbers sharing the name, ascending
    pub track_numbers: Vec<u32>,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub tagged: Vec<TaggedItem>,
    pub failures: Vec<ItemFailure>,
    pub collisions: Vec<NameCollision>,
}

impl BatchOutcome {
    /// True when no item failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.tagged.len() + self.failures.len()
    }
}

/// Tag and rename every item of the batch in input order
pub fn process(batch: Batch, record: &MetadataRecord) -> BatchOutcome {
    let total = batch.len();
    let mut outcome = BatchOutcome::default();

    log::info!(
        "Processing {} file(s) for album '{}' by '{}'",
        total,
        record.album_title,
        record.album_artist
    );

    for item in batch.items {
        match rewrite(&item.bytes, record, item.position) {
            Ok(bytes) => {
                let filename = slug(
                    item.position,
                    &record.album_artist,
                    &item.filename,
                    record.keywords.as_deref(),
                );
                log::info!(
                    "[{}/{}] {} -> {}",
                    item.position,
                    total,
                    item.filename,
                    filename
                );
                outcome.tagged.push(TaggedItem {
                    filename,
                    bytes,
                    track_number: item.position,
                    source_filename: item.filename,
                });
            }
            Err(error) => {
                log::warn!(
                    "[{}/{}] {} failed: {}",
                    item.position,
                    total,
                    item.filename,
                    error
                );
                outcome.failures.push(ItemFailure {
                    position: item.position,
                    filename: item.filename,
                    error,
                });
            }
        }
    }

    outcome.collisions = find_collisions(&outcome.tagged);
    for collision in &outcome.collisions {
        log::warn!(
            "Output name '{}' is shared by tracks {:?}",
            collision.filename,
            collision.track_numbers
        );
    }

    log::info!(
        "Batch finished: {} tagged, {} failed",
        outcome.tagged.len(),
        outcome.failures.len()
    );

    outcome
}

/// Output names used by more than one item, in order of first use
fn find_collisions(tagged: &[TaggedItem]) -> Vec<NameCollision> {
    let mut by_name: HashMap<&str, Vec<u32>> = HashMap::new();
    let mut order = Vec::new();

    for item in tagged {
        let tracks = by_name.entry(item.filename.as_str()).or_default();
        if tracks.is_empty() {
            order.push(item.filename.as_str());
        }
        tracks.push(item.track_number);
    }

    order
        .into_iter()
        .filter_map(|name| {
            let tracks = by_name.remove(name)?;
            (tracks.len() > 1).then(|| NameCollision {
                filename: name.to_string(),
                track_numbers: tracks,
            })
        })
        .collect()
}
