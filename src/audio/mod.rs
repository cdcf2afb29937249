// Audio module - discovery and loading of input files

pub mod detection;

pub use detection::{collect_inputs, is_audio_file, read_batch};
