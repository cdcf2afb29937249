// Metadata module - the album-level record applied to a batch

pub mod record;
pub mod storage;

pub use record::{Field, MetadataRecord, Rating, RawMetadata, RawYear, UNKNOWN, Year};
pub use storage::{load_metadata, save_metadata, template, write_template};
