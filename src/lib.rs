//! REELKIT - session engine for a short-form video editor.
//!
//! Owns the editable project's structural state (scenes, typed tracks,
//! timed elements), a drift-resistant playback clock, a media pool, a
//! selection set and the project persistence lifecycle. Rendering,
//! transcoding and UI are out of scope; a host embeds a [`Session`],
//! drives [`Session::tick`] from its frame loop and subscribes once to
//! [`SessionEvent`] for re-renders.

// Core engine (event bus, clock, managers)
pub mod core;

// Serializable data types
pub mod entities;

// Composition root, persistence, helpers
pub mod session;
pub mod store;
pub mod utils;

// Re-export commonly used types from core
pub use crate::core::clock::PlaybackClock;
pub use crate::core::event_bus::{downcast_event, BoxedEvent, EventBus, EventEmitter};
pub use crate::core::events::{SessionEvent, SessionEventEmitter};
pub use crate::core::media_pool::MediaPool;
pub use crate::core::project_man::{ProjectManager, ProjectState, SortOption};
pub use crate::core::scenes::SceneRegistry;
pub use crate::core::selection::SelectionManager;
pub use crate::core::timeline::{ElementRef, Placement, SplitSide, TimelineEngine};

// Re-export entities
pub use crate::entities::{
    AudioElement, AudioSource, Background, CanvasSize, ElementKind, ImageElement, MediaAsset,
    MediaKind, Position, Project, ProjectMetadata, ProjectSettings, Scene, StickerElement,
    TextElement, TimelineElement, Track, TrackKind, Transform, VideoElement,
};

pub use crate::session::Session;
pub use crate::store::{JsonDirStore, MemoryStore, ProjectStore, StoreError};
