//! Audio container inspection
//!
//! Decides how an input buffer gets its new tag:
//! - MPEG audio streams lose their leading ID3v2 tags (possibly several) and
//!   trailing ID3v1 block; only the payload between them survives
//! - WAV and AIFF files keep every chunk; their `ID3 ` chunk is replaced in place
//!
//! Anything else that decodes as audio is unsupported.

use std::io::Cursor;

use symphonia::core::codecs::{CODEC_TYPE_MP1, CODEC_TYPE_MP2, CODEC_TYPE_MP3, CodecType};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::TagError;

const ID3V1_LEN: usize = 128;
const ID3V2_FOOTER_LEN: usize = 10;

/// How the tag is stored in the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Bare MPEG audio frames, tag prepended
    Mpeg,
    /// RIFF/WAVE, tag in an `ID3 ` chunk
    Wav,
    /// FORM/AIFF, tag in an `ID3 ` chunk
    Aiff,
}

impl ContainerKind {
    /// Chunk containers carry the tag inside the file rather than in front of it
    pub fn is_chunked(self) -> bool {
        matches!(self, ContainerKind::Wav | ContainerKind::Aiff)
    }

    fn from_magic(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(&b"WAVE"[..]) {
            ContainerKind::Wav
        } else if bytes.starts_with(b"FORM") {
            ContainerKind::Aiff
        } else {
            ContainerKind::Mpeg
        }
    }
}

/// An input buffer split into stale tag regions and audio payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerView<'a> {
    pub kind: ContainerKind,
    /// MPEG: audio frames with every tag region removed.
    /// WAV/AIFF: the whole file.
    pub payload: &'a [u8],
    /// Number of leading ID3v2 tags that were skipped
    pub leading_tags: usize,
    /// Whether a trailing ID3v1 block was dropped
    pub trailing_tag: bool,
    /// Short codec name reported by symphonia, e.g. `mp3`
    pub codec: &'static str,
}

/// Parse a buffer as a taggable audio file
pub fn inspect(bytes: &[u8]) -> Result<ContainerView<'_>, TagError> {
    let kind = ContainerKind::from_magic(bytes);
    let view = if kind.is_chunked() {
        ContainerView {
            kind,
            payload: bytes,
            leading_tags: 0,
            trailing_tag: false,
            codec: codec_name(identify_codec(bytes)?),
        }
    } else {
        inspect_mpeg(bytes)?
    };

    log::debug!(
        "Container: {:?}, {} byte payload, {} leading tag(s), ID3v1 trailer: {}, codec {}",
        view.kind,
        view.payload.len(),
        view.leading_tags,
        view.trailing_tag,
        view.codec
    );

    Ok(view)
}

fn inspect_mpeg(bytes: &[u8]) -> Result<ContainerView<'_>, TagError> {
    let (start, leading_tags) = skip_id3v2(bytes)?;
    let mut body = &bytes[start..];

    let trailing_tag = id3::v1::Tag::is_candidate(Cursor::new(body)).unwrap_or(false);
    if trailing_tag {
        body = &body[..body.len() - ID3V1_LEN];
    }

    let codec = identify_codec(body)?;
    if !is_mpeg_audio(codec) {
        return Err(TagError::UnsupportedFormat {
            format: codec_name(codec).to_string(),
        });
    }

    // First frame must sit at offset 0 of the payload
    if !starts_with_frame_sync(body) {
        return Err(TagError::UnreadableContainer(
            "MPEG audio does not start at the beginning of the stream".to_string(),
        ));
    }

    Ok(ContainerView {
        kind: ContainerKind::Mpeg,
        payload: body,
        leading_tags,
        trailing_tag,
        codec: codec_name(codec),
    })
}

/// Offset of the first byte after all leading ID3v2 tags, and how many there were
fn skip_id3v2(bytes: &[u8]) -> Result<(usize, usize), TagError> {
    let mut offset = 0;
    let mut count = 0;

    loop {
        let rest = &bytes[offset..];
        let mut cursor = Cursor::new(rest);

        let found = id3::Tag::skip(&mut cursor)
            .map_err(|e| TagError::UnreadableContainer(format!("ID3v2 tag: {}", e)))?;
        if !found {
            if rest.starts_with(b"ID3") {
                return Err(TagError::UnreadableContainer(
                    "truncated ID3v2 header".to_string(),
                ));
            }
            break;
        }

        // A tag claiming more bytes than remain is clamped to the end of the buffer
        let mut skipped = cursor.position() as usize;
        if skipped >= rest.len() {
            return Err(TagError::UnreadableContainer(
                "ID3v2 tag runs past the end of the data".to_string(),
            ));
        }
        if rest[skipped..].starts_with(b"3DI") {
            skipped += ID3V2_FOOTER_LEN;
        }

        offset += skipped;
        count += 1;
    }

    Ok((offset, count))
}

fn starts_with_frame_sync(payload: &[u8]) -> bool {
    matches!(payload, [0xFF, second, ..] if second & 0xE0 == 0xE0)
}

/// Decode the container headers and return the codec of the default track
fn identify_codec(payload: &[u8]) -> Result<CodecType, TagError> {
    if payload.is_empty() {
        return Err(TagError::UnreadableContainer("no audio data".to_string()));
    }

    let mss = MediaSourceStream::new(Box::new(Cursor::new(payload.to_vec())), Default::default());

    let decoded = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| TagError::UnreadableContainer(e.to_string()))?;

    let track = decoded
        .format
        .default_track()
        .ok_or_else(|| TagError::UnreadableContainer("no audio track".to_string()))?;

    Ok(track.codec_params.codec)
}

fn is_mpeg_audio(codec: CodecType) -> bool {
    codec == CODEC_TYPE_MP1 || codec == CODEC_TYPE_MP2 || codec == CODEC_TYPE_MP3
}

fn codec_name(codec: CodecType) -> &'static str {
    symphonia::default::get_codecs()
        .get_codec(codec)
        .map(|d| d.short_name)
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{
        aiff_file, flac_header, id3v1_trailer, id3v2_tag, mpeg_stream, wav_file,
    };

    #[test]
    fn test_plain_mpeg_stream() {
        let audio = mpeg_stream(20);
        let view = inspect(&audio).unwrap();
        assert_eq!(view.kind, ContainerKind::Mpeg);
        assert_eq!(view.payload, &audio[..]);
        assert_eq!(view.leading_tags, 0);
        assert!(!view.trailing_tag);
        assert_eq!(view.codec, "mp3");
    }

    #[test]
    fn test_strips_stacked_tags_and_trailer() {
        let audio = mpeg_stream(20);
        let mut bytes = id3v2_tag(3, 64, false);
        bytes.extend(id3v2_tag(4, 32, true));
        bytes.extend_from_slice(&audio);
        bytes.extend(id3v1_trailer());

        let view = inspect(&bytes).unwrap();
        assert_eq!(view.payload, &audio[..]);
        assert_eq!(view.leading_tags, 2);
        assert!(view.trailing_tag);
    }

    #[test]
    fn test_truncated_tag_is_unreadable() {
        let mut bytes = id3v2_tag(3, 4096, false);
        bytes.truncate(100);
        assert!(matches!(
            inspect(&bytes),
            Err(TagError::UnreadableContainer(_))
        ));

        assert!(matches!(
            inspect(b"ID3\x03"),
            Err(TagError::UnreadableContainer(_))
        ));
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let garbage = b"this is definitely not an audio file".repeat(20);
        assert!(matches!(
            inspect(&garbage),
            Err(TagError::UnreadableContainer(_))
        ));
        assert!(matches!(inspect(&[]), Err(TagError::UnreadableContainer(_))));
    }

    #[test]
    fn test_frames_buried_in_junk_are_unreadable() {
        let mut bytes = b"%PDF-1.4\n%junk object stream\n".repeat(40);
        bytes.extend(mpeg_stream(3));
        bytes.extend_from_slice(&b"trailer junk".repeat(20));

        assert!(matches!(
            inspect(&bytes),
            Err(TagError::UnreadableContainer(_))
        ));
    }

    #[test]
    fn test_wav_keeps_whole_file() {
        let wav = wav_file(4410);
        let view = inspect(&wav).unwrap();
        assert_eq!(view.kind, ContainerKind::Wav);
        assert_eq!(view.payload, &wav[..]);
        assert_eq!(view.codec, "pcm_s16le");
    }

    #[test]
    fn test_aiff_is_chunked() {
        let file = aiff_file(4410);
        let view = inspect(&file).unwrap();
        assert_eq!(view.kind, ContainerKind::Aiff);
        assert!(view.kind.is_chunked());
    }

    #[test]
    fn test_flac_is_unsupported() {
        match inspect(&flac_header()) {
            Err(TagError::UnsupportedFormat { format }) => assert_eq!(format, "flac"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }
}
