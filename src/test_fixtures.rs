//! Test fixtures for tagging tests
//!
//! Audio is synthesised in memory so tests need no external encoder:
//! - `mpeg_stream` builds silent MPEG-1 Layer III frames
//! - `wav_file` and `aiff_file` build PCM chunk containers
//! - `flac_header` builds a frameless FLAC stream for the unsupported path
//! - the stale tag helpers build ID3v2 and ID3v1 regions to strip

#![cfg(test)]

use std::path::{Path, PathBuf};

use id3::frame::{Content, ExtendedText};
use id3::{Frame, Tag, TagLike, Version};

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, no padding, no CRC
const MPEG_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// 144 * 128000 / 44100, rounded down
const MPEG_FRAME_LEN: usize = 417;

/// A single silent MPEG audio frame
pub fn mpeg_frame() -> Vec<u8> {
    let mut frame = vec![0u8; MPEG_FRAME_LEN];
    frame[..4].copy_from_slice(&MPEG_HEADER);
    frame
}

/// A stream of `frames` back-to-back silent MPEG audio frames
pub fn mpeg_stream(frames: usize) -> Vec<u8> {
    mpeg_frame().repeat(frames)
}

/// A mono 16-bit 44.1 kHz PCM WAV file of `samples` silent samples
pub fn wav_file(samples: u32) -> Vec<u8> {
    let data_len = samples * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // channels
    wav.extend_from_slice(&44_100u32.to_le_bytes());
    wav.extend_from_slice(&88_200u32.to_le_bytes()); // byte rate
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(wav.len() + data_len as usize, 0);

    wav
}

/// A mono 16-bit 44.1 kHz PCM AIFF file of `samples` silent samples
pub fn aiff_file(samples: u32) -> Vec<u8> {
    let data_len = samples * 2;
    let mut aiff = Vec::with_capacity(54 + data_len as usize);

    aiff.extend_from_slice(b"FORM");
    aiff.extend_from_slice(&(46 + data_len).to_be_bytes());
    aiff.extend_from_slice(b"AIFF");

    aiff.extend_from_slice(b"COMM");
    aiff.extend_from_slice(&18u32.to_be_bytes());
    aiff.extend_from_slice(&1u16.to_be_bytes()); // channels
    aiff.extend_from_slice(&samples.to_be_bytes());
    aiff.extend_from_slice(&16u16.to_be_bytes());
    // 44100 as an 80-bit extended float
    aiff.extend_from_slice(&[0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]);

    aiff.extend_from_slice(b"SSND");
    aiff.extend_from_slice(&(8 + data_len).to_be_bytes());
    aiff.extend_from_slice(&0u32.to_be_bytes()); // offset
    aiff.extend_from_slice(&0u32.to_be_bytes()); // block size
    aiff.resize(aiff.len() + data_len as usize, 0);

    aiff
}

/// A FLAC stream marker and STREAMINFO block with no audio frames
pub fn flac_header() -> Vec<u8> {
    let mut flac = b"fLaC".to_vec();
    flac.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]); // last block, STREAMINFO, 34 bytes
    flac.extend_from_slice(&4096u16.to_be_bytes());
    flac.extend_from_slice(&4096u16.to_be_bytes());
    flac.extend_from_slice(&[0; 6]); // frame sizes unknown
    // 44100 Hz, mono, 16 bits, unknown length
    flac.extend_from_slice(&[0x0A, 0xC4, 0x40, 0xF0, 0, 0, 0, 0]);
    flac.extend_from_slice(&[0; 16]); // MD5
    flac
}

/// Bytes of the first chunk with the given ID, for RIFF or FORM containers
pub fn chunk_body<'a>(container: &'a [u8], id: &[u8; 4]) -> Option<&'a [u8]> {
    let big_endian = container.starts_with(b"FORM");
    let mut pos = 12;

    while pos + 8 <= container.len() {
        let size_bytes: [u8; 4] = container[pos + 4..pos + 8].try_into().ok()?;
        let size = if big_endian {
            u32::from_be_bytes(size_bytes)
        } else {
            u32::from_le_bytes(size_bytes)
        } as usize;

        let body = container.get(pos + 8..pos + 8 + size)?;
        if &container[pos..pos + 4] == id {
            return Some(body);
        }
        pos += 8 + size + (size & 1);
    }
    None
}

fn syncsafe_bytes(value: usize) -> [u8; 4] {
    let v = value as u32;
    [
        ((v >> 21) & 0x7f) as u8,
        ((v >> 14) & 0x7f) as u8,
        ((v >> 7) & 0x7f) as u8,
        (v & 0x7f) as u8,
    ]
}

/// A raw ID3v2 tag whose body is `body_len` bytes of padding
pub fn id3v2_tag(major: u8, body_len: usize, footer: bool) -> Vec<u8> {
    let flags = if footer { 0x10 } else { 0x00 };
    let size = syncsafe_bytes(body_len);

    let mut tag = vec![b'I', b'D', b'3', major, 0, flags];
    tag.extend_from_slice(&size);
    tag.resize(tag.len() + body_len, 0);

    if footer {
        tag.extend_from_slice(&[b'3', b'D', b'I', major, 0, flags]);
        tag.extend_from_slice(&size);
    }
    tag
}

/// A real ID3v2.4 tag with frames the engine never writes
pub fn stale_id3v2_tag() -> Vec<u8> {
    let mut tag = Tag::new();
    tag.add_frame(Frame::with_content(
        "TIT2",
        Content::Text("Stale Title".to_string()),
    ));
    tag.add_frame(ExtendedText {
        description: "Mood".to_string(),
        value: "Stale".to_string(),
    });

    let mut bytes = Vec::new();
    tag.write_to(&mut bytes, Version::Id3v24)
        .expect("Failed to write stale tag");
    bytes
}

/// A 128-byte ID3v1 trailer
pub fn id3v1_trailer() -> Vec<u8> {
    let mut trailer = vec![0u8; 128];
    trailer[..3].copy_from_slice(b"TAG");
    trailer[3..14].copy_from_slice(b"Stale Title");
    trailer
}

/// Create an album folder of silent MP3 files with the given names
pub fn create_test_album(root: &Path, name: &str, files: &[&str]) -> PathBuf {
    let album_dir = root.join(name);
    std::fs::create_dir_all(&album_dir).expect("Failed to create album directory");

    for file in files {
        std::fs::write(album_dir.join(file), mpeg_stream(20)).expect("Failed to write track");
    }

    album_dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mpeg_stream_length() {
        let stream = mpeg_stream(3);
        assert_eq!(stream.len(), 3 * MPEG_FRAME_LEN);
        assert_eq!(&stream[MPEG_FRAME_LEN..MPEG_FRAME_LEN + 4], &MPEG_HEADER);
    }

    #[test]
    fn test_wav_header() {
        let wav = wav_file(10);
        assert_eq!(&wav[..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 20);
    }

    #[test]
    fn test_aiff_header() {
        let aiff = aiff_file(10);
        assert_eq!(&aiff[..4], b"FORM");
        assert_eq!(&aiff[8..12], b"AIFF");
        assert_eq!(aiff.len(), 54 + 20);
        assert_eq!(u32::from_be_bytes(aiff[4..8].try_into().unwrap()) as usize, aiff.len() - 8);
    }

    #[test]
    fn test_chunk_body() {
        let wav = wav_file(10);
        assert_eq!(chunk_body(&wav, b"data"), Some(&[0u8; 20][..]));
        assert_eq!(chunk_body(&wav, b"fmt ").map(<[u8]>::len), Some(16));
        assert_eq!(chunk_body(&aiff_file(10), b"SSND").map(<[u8]>::len), Some(28));
        assert!(chunk_body(&wav, b"ID3 ").is_none());
    }

    #[test]
    fn test_flac_header_length() {
        assert_eq!(flac_header().len(), 4 + 4 + 34);
    }

    #[test]
    fn test_id3v2_tag_with_footer() {
        let tag = id3v2_tag(4, 16, true);
        assert_eq!(tag.len(), 10 + 16 + 10);
        assert_eq!(&tag[tag.len() - 10..tag.len() - 7], b"3DI");
    }

    #[test]
    fn test_stale_tag_reads_back() {
        let bytes = stale_id3v2_tag();
        let tag = Tag::read_from2(std::io::Cursor::new(&bytes)).unwrap();
        assert_eq!(tag.title(), Some("Stale Title"));
    }

    #[test]
    fn test_create_test_album() {
        let temp_dir = TempDir::new().unwrap();
        let album = create_test_album(temp_dir.path(), "Album", &["a.mp3", "b.mp3"]);
        assert!(album.join("a.mp3").exists());
        assert!(album.join("b.mp3").exists());
    }
}
