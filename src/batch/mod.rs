// Batch module - ordered, partial-success processing of a set of files

pub mod orchestrator;

pub use orchestrator::{
    AudioItem, Batch, BatchOutcome, ItemFailure, NameCollision, TaggedItem, process,
};
