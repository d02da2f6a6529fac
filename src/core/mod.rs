//! Core engine - the cooperating session managers.
//!
//! Ownership runs one way: `Session` owns every manager; the timeline
//! engine and project manager receive the registries they mutate by
//! reference per call. All change notifications fan into the single
//! `SessionEvent` channel on the session bus.

pub mod clock;
pub mod event_bus;
pub mod events;
pub mod media_pool;
pub mod project_man;
pub mod scenes;
pub mod selection;
pub mod timeline;

pub use clock::PlaybackClock;
pub use event_bus::{downcast_event, BoxedEvent, EventBus, EventEmitter};
pub use events::{SessionEvent, SessionEventEmitter};
pub use media_pool::MediaPool;
pub use project_man::{ProjectManager, ProjectState, SortOption};
pub use scenes::SceneRegistry;
pub use selection::SelectionManager;
pub use timeline::{ElementRef, Placement, SplitSide, TimelineEngine};
