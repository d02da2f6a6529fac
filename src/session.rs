//! Session: the composition root owning every manager.
//!
//! There is no global session. Whatever composes the application
//! constructs a `Session`, owns its lifetime, and drops it to reset -
//! tests build one per case. Convenience methods wire the
//! cross-manager parameters (scene registry, media pool, selection)
//! so callers get a single editing surface.

use uuid::Uuid;

use crate::core::clock::PlaybackClock;
use crate::core::event_bus::EventBus;
use crate::core::events::SessionEventEmitter;
use crate::core::media_pool::MediaPool;
use crate::core::project_man::ProjectManager;
use crate::core::scenes::SceneRegistry;
use crate::core::selection::SelectionManager;
use crate::core::timeline::{ElementRef, Placement, SplitSide, TimelineEngine};
use crate::entities::{TimelineElement, Track, TrackKind};
use crate::store::{MemoryStore, ProjectStore, StoreError};

pub struct Session {
    bus: EventBus,
    pub clock: PlaybackClock,
    pub media: MediaPool,
    pub selection: SelectionManager,
    pub scenes: SceneRegistry,
    pub timeline: TimelineEngine,
    pub projects: ProjectManager,
}

impl Session {
    /// Build a session over the given storage collaborator.
    pub fn new(store: Box<dyn ProjectStore>) -> Self {
        let bus = EventBus::new();
        let events = SessionEventEmitter::from_bus(&bus);
        Self {
            clock: PlaybackClock::new(events.clone()),
            media: MediaPool::new(events.clone()),
            selection: SelectionManager::new(events.clone()),
            scenes: SceneRegistry::new(events.clone()),
            timeline: TimelineEngine::new(events.clone()),
            projects: ProjectManager::new(store, events),
            bus,
        }
    }

    /// Session over an in-memory store (tests, ephemeral editing).
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// The session bus. Subscribe once to `SessionEvent` to observe
    /// every manager, or `poll()` for batched processing.
    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Advance the playback clock; call once per host frame.
    pub fn tick(&mut self) -> Option<f64> {
        self.clock.tick()
    }

    // === Project lifecycle (clears selection on active-project change) ===

    pub fn create_project(&mut self, name: &str) -> Result<Uuid, StoreError> {
        self.selection.clear();
        self.projects.create_project(name, &mut self.scenes, &mut self.media)
    }

    pub fn load_project(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.selection.clear();
        self.projects.load_project(id, &mut self.scenes, &mut self.media)
    }

    pub fn save_project(&mut self) -> Result<(), StoreError> {
        self.projects.save_active(&self.scenes)
    }

    pub fn delete_projects(&mut self, ids: &[Uuid]) -> Result<(), StoreError> {
        let active_deleted = self
            .projects
            .active_project()
            .map(|p| ids.contains(&p.id()))
            .unwrap_or(false);
        if active_deleted {
            self.selection.clear();
        }
        self.projects.delete_projects(ids, &mut self.scenes, &mut self.media)
    }

    pub fn rename_project(&mut self, id: Uuid, name: &str) -> Result<(), StoreError> {
        self.projects.rename_project(id, name)
    }

    pub fn close_project(&mut self) {
        self.selection.clear();
        self.projects.close_project(&mut self.scenes, &mut self.media);
    }

    // === Timeline operations on the active scene ===

    pub fn tracks(&self) -> &[Track] {
        self.timeline.tracks(&self.scenes)
    }

    pub fn total_duration(&self) -> f64 {
        self.timeline.total_duration(&self.scenes)
    }

    pub fn add_track(&mut self, kind: TrackKind, index: Option<usize>) -> Option<Uuid> {
        self.timeline.add_track(&mut self.scenes, kind, index)
    }

    pub fn insert_element(&mut self, element: TimelineElement, placement: Placement) {
        self.timeline.insert_element(&mut self.scenes, element, placement)
    }

    pub fn delete_elements(&mut self, refs: &[ElementRef]) {
        self.timeline.delete_elements(&mut self.scenes, refs)
    }

    pub fn split_elements(&mut self, refs: &[ElementRef], split_time: f64, retain: Option<SplitSide>) {
        self.timeline.split_elements(&mut self.scenes, refs, split_time, retain)
    }
}
