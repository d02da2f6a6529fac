//! Scene registry: the live scene list and active-scene pointer.
//!
//! Owns the scenes of the active project. `ProjectManager` replaces the
//! whole list on create/load and clears it on close/delete; the
//! timeline engine mutates tracks inside the active scene.

use log::{debug, trace};
use uuid::Uuid;

use crate::entities::Scene;

use super::events::{SessionEvent, SessionEventEmitter};

#[derive(Debug, Default)]
pub struct SceneRegistry {
    scenes: Vec<Scene>,
    active_scene_id: Option<Uuid>,
    events: SessionEventEmitter,
}

impl SceneRegistry {
    pub fn new(events: SessionEventEmitter) -> Self {
        Self {
            scenes: Vec::new(),
            active_scene_id: None,
            events,
        }
    }

    /// Replace state wholesale (project create/load).
    ///
    /// If `current` is absent the first scene becomes active; an empty
    /// list leaves no active scene.
    pub fn initialize(&mut self, scenes: Vec<Scene>, current: Option<Uuid>) {
        let active = current.or_else(|| scenes.first().map(|s| s.id));
        debug!("Scene registry initialized: {} scene(s), active={:?}", scenes.len(), active);
        self.scenes = scenes;
        self.active_scene_id = active;
        self.events.emit(SessionEvent::ScenesChanged);
    }

    pub fn all(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn active_scene_id(&self) -> Option<Uuid> {
        self.active_scene_id
    }

    /// Resolve the active pointer against the list. None when the
    /// pointer is unset or does not resolve to a member.
    pub fn active_scene(&self) -> Option<&Scene> {
        let id = self.active_scene_id?;
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        let id = self.active_scene_id?;
        self.scenes.iter_mut().find(|s| s.id == id)
    }

    /// Move the active pointer.
    ///
    /// Membership is NOT validated: callers switch only to ids they
    /// obtained from this registry. An unknown id leaves
    /// `active_scene()` resolving to None until corrected.
    pub fn set_active_scene(&mut self, id: Uuid) {
        trace!("Active scene -> {}", id);
        self.active_scene_id = Some(id);
        self.events.emit(SessionEvent::ScenesChanged);
    }

    /// Empty the list and active pointer (project close/delete).
    pub fn clear(&mut self) {
        self.scenes.clear();
        self.active_scene_id = None;
        self.events.emit(SessionEvent::ScenesChanged);
    }

    /// Toggle a bookmark on the active scene: an exact-value match is
    /// removed, otherwise the time is inserted and the set re-sorted
    /// ascending. No-op without an active scene.
    pub fn toggle_bookmark(&mut self, time: f64) {
        let Some(scene) = self.active_scene_mut() else {
            trace!("toggle_bookmark: no active scene");
            return;
        };
        if let Some(pos) = scene.bookmarks.iter().position(|&b| b == time) {
            scene.bookmarks.remove(pos);
        } else {
            scene.bookmarks.push(time);
            scene.bookmarks.sort_by(|a, b| a.total_cmp(b));
        }
        self.events.emit(SessionEvent::ScenesChanged);
    }

    /// Exact-value bookmark membership on the active scene.
    pub fn is_bookmarked(&self, time: f64) -> bool {
        self.active_scene()
            .map(|s| s.bookmarks.iter().any(|&b| b == time))
            .unwrap_or(false)
    }
}
