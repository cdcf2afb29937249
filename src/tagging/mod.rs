// Tagging module - frame mapping, container inspection and tag rewriting

pub mod container;
pub mod engine;
pub mod frames;

pub use container::{ContainerKind, ContainerView, inspect};
pub use engine::{OUTPUT_VERSION, build_tag, rewrite};
pub use frames::{EmissionRule, FRAME_TABLE, FrameKind, FrameMapping};
