//! Entities module - serializable session data types.
//!
//! The sum types (`Track`, `TimelineElement`) follow the enum-wrapper
//! pattern: variant structs plus a closed enum with match delegation,
//! so every consumption site is exhaustiveness-checked.

pub mod element;
pub mod media;
pub mod project;
pub mod scene;
pub mod track;
pub mod transform;

pub use element::{
    AudioElement, AudioSource, ElementKind, ImageElement, StickerElement, TextElement,
    TimelineElement, VideoElement,
};
pub use media::{MediaAsset, MediaKind};
pub use project::{
    Background, CanvasSize, Project, ProjectMetadata, ProjectSettings, PROJECT_SCHEMA_VERSION,
};
pub use scene::Scene;
pub use track::{AudioTrack, StickerTrack, TextTrack, Track, TrackKind, VideoTrack};
pub use transform::{Position, Transform};
