//! Typed metadata record shared by every item of a batch
//!
//! Input arrives as a loosely typed [`RawMetadata`] (every key optional, year as
//! number or string). [`MetadataRecord::from_raw`] applies the field rules once:
//! - required text fields fall back to `"Unknown"`
//! - blank optional text fields become `None`, everything else is kept verbatim
//! - an unparseable year becomes [`Year::Unknown`]
//! - a rating outside 1..=5 is clamped

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::FieldError;

/// Placeholder for unset required text and for an unknown year
pub const UNKNOWN: &str = "Unknown";

/// Release year, either a parsed integer or the `Unknown` sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Year {
    Known(i32),
    #[default]
    Unknown,
}

impl Year {
    /// Parse user-supplied year text.
    ///
    /// Empty text and the literal sentinel map to `Unknown`; anything else
    /// must be an integer in 1..=9999.
    pub fn parse(input: &str) -> Result<Self, FieldError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNKNOWN) {
            return Ok(Year::Unknown);
        }

        match trimmed.parse::<i64>() {
            Ok(n) => Self::from_number(n),
            Err(_) => Err(FieldError::InvalidYear(trimmed.to_string())),
        }
    }

    pub fn from_number(n: i64) -> Result<Self, FieldError> {
        if (1..=9999).contains(&n) {
            Ok(Year::Known(n as i32))
        } else {
            Err(FieldError::InvalidYear(n.to_string()))
        }
    }

    pub fn value(self) -> Option<i32> {
        match self {
            Year::Known(y) => Some(y),
            Year::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Year::Known(_))
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Known(y) => write!(f, "{}", y),
            Year::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl Serialize for Year {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Year::Known(y) => serializer.serialize_i32(*y),
            Year::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// Star rating in 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, FieldError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(FieldError::InvalidRating(value))
        }
    }

    /// Clamp an arbitrary value into range
    pub fn clamped(value: i64) -> Self {
        Rating(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating(Self::MIN)
    }
}

/// Every metadata field the tag engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AlbumTitle,
    Subtitle,
    Rating,
    Comment,
    ContributingArtists,
    AlbumArtist,
    ReleaseYear,
    TrackNumber,
    Genre,
    Publisher,
    Copyright,
    AuthorUrl,
    PublisherUrl,
    Composers,
    Conductors,
    GroupDescription,
    Mood,
    PartOfSet,
    OriginalKey,
    Protected,
}

impl Field {
    /// Key used in metadata JSON and in logs
    pub fn name(self) -> &'static str {
        match self {
            Field::AlbumTitle => "album_title",
            Field::Subtitle => "subtitle",
            Field::Rating => "rating",
            Field::Comment => "comment",
            Field::ContributingArtists => "contributing_artists",
            Field::AlbumArtist => "album_artist",
            Field::ReleaseYear => "year",
            Field::TrackNumber => "track_number",
            Field::Genre => "genre",
            Field::Publisher => "publisher",
            Field::Copyright => "copyright",
            Field::AuthorUrl => "author_url",
            Field::PublisherUrl => "publisher_url",
            Field::Composers => "composers",
            Field::Conductors => "conductors",
            Field::GroupDescription => "group_description",
            Field::Mood => "mood",
            Field::PartOfSet => "part_of_set",
            Field::OriginalKey => "original_key",
            Field::Protected => "protected",
        }
    }
}

/// Year as it appears in metadata JSON: `2021`, `"2021"` or `"Unknown"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawYear {
    Number(i64),
    Text(String),
}

/// Metadata as supplied by the caller, before any field rules are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMetadata {
    #[serde(alias = "title")]
    pub album_title: Option<String>,
    pub subtitle: Option<String>,
    pub rating: Option<i64>,
    #[serde(alias = "comments")]
    pub comment: Option<String>,
    pub contributing_artists: Option<String>,
    pub album_artist: Option<String>,
    pub year: Option<RawYear>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub copyright: Option<String>,
    pub author_url: Option<String>,
    #[serde(alias = "website_publisher")]
    pub publisher_url: Option<String>,
    pub composers: Option<String>,
    pub conductors: Option<String>,
    pub group_description: Option<String>,
    pub mood: Option<String>,
    pub part_of_set: Option<String>,
    pub original_key: Option<String>,
    pub protected: Option<String>,
    pub keywords: Option<String>,
}

/// Album-level metadata applied to every item of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub album_title: String,
    pub subtitle: Option<String>,
    pub rating: Rating,
    pub comment: Option<String>,
    pub contributing_artists: Option<String>,
    pub album_artist: String,
    pub year: Year,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub copyright: Option<String>,
    pub author_url: Option<String>,
    pub publisher_url: Option<String>,
    pub composers: Option<String>,
    pub conductors: Option<String>,
    pub group_description: Option<String>,
    pub mood: Option<String>,
    pub part_of_set: Option<String>,
    pub original_key: Option<String>,
    pub protected: Option<String>,
    /// Comma-separated free text, only used for file naming
    pub keywords: Option<String>,
}

impl Default for MetadataRecord {
    fn default() -> Self {
        Self {
            album_title: UNKNOWN.to_string(),
            subtitle: None,
            rating: Rating::default(),
            comment: None,
            contributing_artists: None,
            album_artist: UNKNOWN.to_string(),
            year: Year::Unknown,
            genre: None,
            publisher: None,
            copyright: None,
            author_url: None,
            publisher_url: None,
            composers: None,
            conductors: None,
            group_description: None,
            mood: None,
            part_of_set: None,
            original_key: None,
            protected: None,
            keywords: None,
        }
    }
}

impl MetadataRecord {
    /// Build a record from caller input, correcting invalid fields
    pub fn from_raw(raw: RawMetadata) -> Self {
        let year = match raw.year {
            None => Ok(Year::Unknown),
            Some(RawYear::Number(n)) => Year::from_number(n),
            Some(RawYear::Text(s)) => Year::parse(&s),
        }
        .unwrap_or_else(|e| {
            log::warn!("{}; using '{}'", e, UNKNOWN);
            Year::Unknown
        });

        let rating = match raw.rating {
            None => Rating::default(),
            Some(r) => Rating::new(r).unwrap_or_else(|e| {
                let clamped = Rating::clamped(r);
                log::warn!("{}; using {}", e, clamped.value());
                clamped
            }),
        };

        Self {
            album_title: required(raw.album_title),
            subtitle: optional(raw.subtitle),
            rating,
            comment: optional(raw.comment),
            contributing_artists: optional(raw.contributing_artists),
            album_artist: required(raw.album_artist),
            year,
            genre: optional(raw.genre),
            publisher: optional(raw.publisher),
            copyright: optional(raw.copyright),
            author_url: optional(raw.author_url),
            publisher_url: optional(raw.publisher_url),
            composers: optional(raw.composers),
            conductors: optional(raw.conductors),
            group_description: optional(raw.group_description),
            mood: optional(raw.mood),
            part_of_set: optional(raw.part_of_set),
            original_key: optional(raw.original_key),
            protected: optional(raw.protected),
            keywords: optional(raw.keywords),
        }
    }

    /// Convert back to the JSON-facing form
    pub fn to_raw(&self) -> RawMetadata {
        RawMetadata {
            album_title: Some(self.album_title.clone()),
            subtitle: self.subtitle.clone(),
            rating: Some(self.rating.value() as i64),
            comment: self.comment.clone(),
            contributing_artists: self.contributing_artists.clone(),
            album_artist: Some(self.album_artist.clone()),
            year: Some(match self.year {
                Year::Known(y) => RawYear::Number(y as i64),
                Year::Unknown => RawYear::Text(UNKNOWN.to_string()),
            }),
            genre: self.genre.clone(),
            publisher: self.publisher.clone(),
            copyright: self.copyright.clone(),
            author_url: self.author_url.clone(),
            publisher_url: self.publisher_url.clone(),
            composers: self.composers.clone(),
            conductors: self.conductors.clone(),
            group_description: self.group_description.clone(),
            mood: self.mood.clone(),
            part_of_set: self.part_of_set.clone(),
            original_key: self.original_key.clone(),
            protected: self.protected.clone(),
            keywords: self.keywords.clone(),
        }
    }

    /// Re-apply the text field rules after the record was edited in code
    pub fn normalized(self) -> Self {
        let year = self.year;
        let rating = self.rating;
        Self {
            year,
            rating,
            ..Self::from_raw(RawMetadata {
                year: None,
                rating: None,
                ..self.to_raw()
            })
        }
    }

    /// Text value of a field, if it holds any.
    ///
    /// Rating, year and track number are not text fields and return `None`.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::AlbumTitle => Some(&self.album_title),
            Field::AlbumArtist => Some(&self.album_artist),
            Field::Subtitle => self.subtitle.as_ref(),
            Field::Comment => self.comment.as_ref(),
            Field::ContributingArtists => self.contributing_artists.as_ref(),
            Field::Genre => self.genre.as_ref(),
            Field::Publisher => self.publisher.as_ref(),
            Field::Copyright => self.copyright.as_ref(),
            Field::AuthorUrl => self.author_url.as_ref(),
            Field::PublisherUrl => self.publisher_url.as_ref(),
            Field::Composers => self.composers.as_ref(),
            Field::Conductors => self.conductors.as_ref(),
            Field::GroupDescription => self.group_description.as_ref(),
            Field::Mood => self.mood.as_ref(),
            Field::PartOfSet => self.part_of_set.as_ref(),
            Field::OriginalKey => self.original_key.as_ref(),
            Field::Protected => self.protected.as_ref(),
            Field::Rating | Field::ReleaseYear | Field::TrackNumber => None,
        };
        value.map(String::as_str)
    }
}

impl From<RawMetadata> for MetadataRecord {
    fn from(raw: RawMetadata) -> Self {
        Self::from_raw(raw)
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn required(value: Option<String>) -> String {
    optional(value).unwrap_or_else(|| UNKNOWN.to_string())
}
