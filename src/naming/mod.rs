// Naming module - search-friendly output filenames

pub mod slug;

pub use slug::{keyword_slug, slug, split_extension};
