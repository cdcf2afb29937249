//! Output filename generation
//!
//! Names look like `07-the-band-night-drive-live-acoustic.mp3`: zero-padded
//! track number, album artist, original stem, up to three keywords, original
//! extension.

/// Keywords kept in a filename
pub const MAX_KEYWORDS: usize = 3;

/// Length cap of the joined keyword part, in characters
pub const MAX_KEYWORD_CHARS: usize = 60;

/// Build the output filename for one item
pub fn slug(
    track_number: u32,
    album_artist: &str,
    original_filename: &str,
    keywords: Option<&str>,
) -> String {
    let (stem, ext) = split_extension(original_filename);

    let mut name = format!(
        "{:02}-{}-{}",
        track_number,
        slugify(album_artist),
        slugify(stem)
    );

    if let Some(keywords) = keywords.filter(|k| !k.trim().is_empty()) {
        name.push('-');
        name.push_str(&keyword_slug(keywords));
    }

    name.push_str(ext);
    name
}

/// Lower-case and hyphenate one name component
fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '-',
            other => other,
        })
        .collect()
}

/// Clean, join and truncate a comma-separated keyword list
pub fn keyword_slug(keywords: &str) -> String {
    let joined = keywords
        .split(',')
        .take(MAX_KEYWORDS)
        .map(clean_keyword)
        .collect::<Vec<_>>()
        .join("-");

    joined.chars().take(MAX_KEYWORD_CHARS).collect()
}

fn clean_keyword(token: &str) -> String {
    token
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Split a filename into stem and extension.
///
/// The extension keeps its dot and case. Leading dots belong to the stem, so
/// `.hidden` has no extension.
pub fn split_extension(filename: &str) -> (&str, &str) {
    let leading_dots = filename.len() - filename.trim_start_matches('.').len();

    match filename[leading_dots..].rfind('.') {
        Some(pos) => filename.split_at(leading_dots + pos),
        None => (filename, ""),
    }
}
