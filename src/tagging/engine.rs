//! Tag rewrite engine
//!
//! Replaces whatever tags an audio buffer carries with a fresh ID3v2.3 tag
//! built from a [`MetadataRecord`]. Works on bytes only: the caller owns any
//! file handling.

use std::io::Cursor;

use id3::{Tag, TagLike, Version};

use super::container;
use super::frames;
use crate::error::TagError;
use crate::metadata::MetadataRecord;

/// ID3v2 minor version written by the engine
pub const OUTPUT_VERSION: Version = Version::Id3v23;

/// Rewrite the metadata of one audio buffer.
///
/// Every existing tag is discarded. MPEG output is the new tag followed by the
/// untouched audio payload. WAV and AIFF output keeps every chunk and carries
/// the new tag in a single `ID3 ` chunk. Either way, rewriting the output
/// again yields identical bytes.
pub fn rewrite(
    audio: &[u8],
    record: &MetadataRecord,
    track_number: u32,
) -> Result<Vec<u8>, TagError> {
    let view = container::inspect(audio)?;
    let tag = build_tag(record, track_number);

    let output = if view.kind.is_chunked() {
        // Replaces an existing ID3 chunk or appends one to the root chunk
        let mut file = Cursor::new(view.payload.to_vec());
        tag.write_to_file(&mut file, OUTPUT_VERSION)?;
        file.into_inner()
    } else {
        let mut output = Vec::with_capacity(view.payload.len() + 1024);
        tag.write_to(&mut output, OUTPUT_VERSION)?;
        output.extend_from_slice(view.payload);
        output
    };

    log::debug!(
        "Track {}: wrote {} frame(s) to {:?} container, {} -> {} bytes, replaced {} stale tag(s)",
        track_number,
        tag.frames().count(),
        view.kind,
        audio.len(),
        output.len(),
        view.leading_tags + usize::from(view.trailing_tag)
    );

    Ok(output)
}

/// Assemble a fresh tag holding every frame the record calls for
pub fn build_tag(record: &MetadataRecord, track_number: u32) -> Tag {
    let mut tag = Tag::with_version(OUTPUT_VERSION);
    for frame in frames::frames_for(record, track_number) {
        if let Some(replaced) = tag.add_frame(frame) {
            log::warn!("Frame {} was emitted twice", replaced.id());
        }
    }
    tag
}
