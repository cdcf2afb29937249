//! Static field to ID3v2.3 frame mapping
//!
//! Each row names a metadata field, the frame it is written to and the rule
//! deciding whether the frame is emitted. The engine walks the table in order
//! once per item; every row targets a distinct frame identity, so the order
//! never changes what a reader sees.

use id3::Frame;
use id3::frame::{Comment, Content, ExtendedText, Popularimeter};

use crate::metadata::{Field, MetadataRecord};

/// Reviewer address stored in the POPM frame
pub const RATING_EMAIL: &str = "rating@example.com";

/// Play counter stored in the POPM frame
pub const RATING_PLAY_COUNT: u64 = 1;

const COMMENT_LANG: &str = "eng";
const COMMENT_DESCRIPTION: &str = "comment";

/// Shape of the frame a field is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Standard text frame (`T***`)
    Text(&'static str),
    /// URL frame (`W***`)
    Link(&'static str),
    /// User-defined text frame (`TXXX`) keyed by description
    UserText(&'static str),
    /// Comment frame (`COMM`)
    Comment {
        lang: &'static str,
        description: &'static str,
    },
    /// Popularimeter (`POPM`)
    Popularimeter { email: &'static str, counter: u64 },
}

impl FrameKind {
    /// Four-character frame ID
    pub fn frame_id(&self) -> &'static str {
        match self {
            FrameKind::Text(id) | FrameKind::Link(id) => *id,
            FrameKind::UserText(_) => "TXXX",
            FrameKind::Comment { .. } => "COMM",
            FrameKind::Popularimeter { .. } => "POPM",
        }
    }

    /// Identity that must be unique within a tag, e.g. `TXXX:Mood`
    pub fn identity(&self) -> String {
        match self {
            FrameKind::Text(id) | FrameKind::Link(id) => id.to_string(),
            FrameKind::UserText(description) => format!("TXXX:{}", description),
            FrameKind::Comment { lang, description } => format!("COMM:{}:{}", lang, description),
            FrameKind::Popularimeter { email, .. } => format!("POPM:{}", email),
        }
    }
}

/// When a row produces a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionRule {
    /// Required field, always written
    Always,
    /// Optional field, written only when it holds non-empty text
    IfNonEmpty,
    /// Year, written unless it is the `Unknown` sentinel
    IfKnown,
}

impl EmissionRule {
    fn admits(self, value: Option<&str>) -> bool {
        match self {
            EmissionRule::Always | EmissionRule::IfKnown => value.is_some(),
            EmissionRule::IfNonEmpty => value.is_some_and(|v| !v.trim().is_empty()),
        }
    }
}

/// One row of the mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMapping {
    pub field: Field,
    pub kind: FrameKind,
    pub rule: EmissionRule,
}

const fn row(field: Field, kind: FrameKind, rule: EmissionRule) -> FrameMapping {
    FrameMapping { field, kind, rule }
}

pub static FRAME_TABLE: &[FrameMapping] = &[
    row(Field::AlbumTitle, FrameKind::Text("TALB"), EmissionRule::Always),
    row(Field::Subtitle, FrameKind::Text("TIT3"), EmissionRule::IfNonEmpty),
    row(
        Field::Rating,
        FrameKind::Popularimeter {
            email: RATING_EMAIL,
            counter: RATING_PLAY_COUNT,
        },
        EmissionRule::Always,
    ),
    row(
        Field::Comment,
        FrameKind::Comment {
            lang: COMMENT_LANG,
            description: COMMENT_DESCRIPTION,
        },
        EmissionRule::IfNonEmpty,
    ),
    row(Field::ContributingArtists, FrameKind::Text("TPE1"), EmissionRule::IfNonEmpty),
    row(Field::AlbumArtist, FrameKind::Text("TPE2"), EmissionRule::Always),
    row(Field::ReleaseYear, FrameKind::Text("TYER"), EmissionRule::IfKnown),
    row(Field::TrackNumber, FrameKind::Text("TRCK"), EmissionRule::Always),
    row(Field::Genre, FrameKind::Text("TCON"), EmissionRule::IfNonEmpty),
    row(Field::Publisher, FrameKind::Text("TPUB"), EmissionRule::IfNonEmpty),
    row(Field::Copyright, FrameKind::Text("TCOP"), EmissionRule::IfNonEmpty),
    row(Field::AuthorUrl, FrameKind::Link("WOAR"), EmissionRule::IfNonEmpty),
    row(Field::PublisherUrl, FrameKind::Link("WPUB"), EmissionRule::IfNonEmpty),
    row(Field::Composers, FrameKind::UserText("Composers"), EmissionRule::IfNonEmpty),
    row(Field::Conductors, FrameKind::UserText("Conductors"), EmissionRule::IfNonEmpty),
    row(
        Field::GroupDescription,
        FrameKind::UserText("Group Description"),
        EmissionRule::IfNonEmpty,
    ),
    row(Field::Mood, FrameKind::UserText("Mood"), EmissionRule::IfNonEmpty),
    row(Field::PartOfSet, FrameKind::UserText("Part of a Set"), EmissionRule::IfNonEmpty),
    row(Field::OriginalKey, FrameKind::UserText("Original Key"), EmissionRule::IfNonEmpty),
    row(Field::Protected, FrameKind::UserText("Protected"), EmissionRule::IfNonEmpty),
];

impl FrameMapping {
    /// Value this row would write for the given record and track
    fn resolve(&self, record: &MetadataRecord, track_number: u32) -> Option<String> {
        match self.field {
            Field::Rating => Some(record.rating.value().to_string()),
            Field::ReleaseYear => record.year.value().map(|y| y.to_string()),
            Field::TrackNumber => Some(track_number.to_string()),
            field => record.text(field).map(str::to_string),
        }
    }

    /// Build the frame for this row, or `None` when the rule rejects the value
    pub fn build(&self, record: &MetadataRecord, track_number: u32) -> Option<Frame> {
        let value = self.resolve(record, track_number);
        if !self.rule.admits(value.as_deref()) {
            return None;
        }
        let value = value?;

        let content = match self.kind {
            FrameKind::Text(_) => Content::Text(value),
            FrameKind::Link(_) => Content::Link(value),
            FrameKind::UserText(description) => Content::ExtendedText(ExtendedText {
                description: description.to_string(),
                value,
            }),
            FrameKind::Comment { lang, description } => Content::Comment(Comment {
                lang: lang.to_string(),
                description: description.to_string(),
                text: value,
            }),
            FrameKind::Popularimeter { email, counter } => {
                Content::Popularimeter(Popularimeter {
                    user: email.to_string(),
                    rating: record.rating.value(),
                    counter,
                })
            }
        };

        Some(Frame::with_content(self.kind.frame_id(), content))
    }
}

/// Frames for one item, in table order
pub fn frames_for(record: &MetadataRecord, track_number: u32) -> Vec<Frame> {
    FRAME_TABLE
        .iter()
        .filter_map(|mapping| mapping.build(record, track_number))
        .collect()
}
