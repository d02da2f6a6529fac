//! Timeline engine: track and element mutations on the active scene.
//!
//! **Architecture**: the engine does NOT own the scenes. It receives
//! `&mut SceneRegistry` per call and operates on whatever scene is
//! active; with no active scene every mutating operation is a silent
//! no-op that raises no notification.
//!
//! References issued by a UI can race with deletions, so missing
//! track/element references are benign no-ops throughout, never errors.
//! Each mutating call raises exactly one `TimelineChanged` after the
//! full operation completes, so observers see a consistent post-state.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Scene, TimelineElement, Track, TrackKind};

use super::events::{SessionEvent, SessionEventEmitter};
use super::scenes::SceneRegistry;

/// Reference to one element on one track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRef {
    pub track_id: Uuid,
    pub element_id: Uuid,
}

impl ElementRef {
    pub fn new(track_id: Uuid, element_id: Uuid) -> Self {
        Self { track_id, element_id }
    }
}

/// Target choice for `insert_element`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Insert into this track. A missing or type-incompatible target is
    /// a silent no-op.
    Explicit(Uuid),
    /// Insert into the first track whose kind matches the element,
    /// creating one when none exists.
    Auto,
}

/// Which half survives a split. With no side given the element is
/// replaced by both halves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitSide {
    Left,
    Right,
}

pub struct TimelineEngine {
    events: SessionEventEmitter,
}

impl TimelineEngine {
    pub fn new(events: SessionEventEmitter) -> Self {
        Self { events }
    }

    /// Tracks of the active scene, empty when no scene is active.
    pub fn tracks<'a>(&self, scenes: &'a SceneRegistry) -> &'a [Track] {
        scenes.active_scene().map(|s| s.tracks.as_slice()).unwrap_or(&[])
    }

    /// Latest end time over the active scene, 0 when empty or inactive.
    /// Always recomputed; mutations arrive through several entry points.
    pub fn total_duration(&self, scenes: &SceneRegistry) -> f64 {
        scenes.active_scene().map(|s| s.total_duration()).unwrap_or(0.0)
    }

    /// Create a track of the requested kind in the active scene.
    ///
    /// Inserted at `index` when given (out-of-range appends), else
    /// appended. Returns the new track id, or None without an active
    /// scene.
    pub fn add_track(
        &self,
        scenes: &mut SceneRegistry,
        kind: TrackKind,
        index: Option<usize>,
    ) -> Option<Uuid> {
        let Some(scene) = scenes.active_scene_mut() else {
            trace!("add_track: no active scene");
            return None;
        };
        let scene_id = scene.id;
        let track = Track::new(kind, default_track_name(scene, kind));
        let id = track.id();
        match index {
            Some(i) if i <= scene.tracks.len() => scene.tracks.insert(i, track),
            _ => scene.tracks.push(track),
        }
        debug!("Added {} track {} to scene {}", kind.label(), id, scene_id);
        self.events.emit(SessionEvent::TimelineChanged { scene_id });
        Some(id)
    }

    /// Insert an element into the active scene.
    ///
    /// The element keeps whatever id the caller constructed it with.
    pub fn insert_element(
        &self,
        scenes: &mut SceneRegistry,
        element: TimelineElement,
        placement: Placement,
    ) {
        let Some(scene) = scenes.active_scene_mut() else {
            trace!("insert_element: no active scene");
            return;
        };
        let scene_id = scene.id;

        match placement {
            Placement::Explicit(track_id) => match scene.track_mut(track_id) {
                Some(track) if track.accepts(&element) => {
                    track.elements_mut().push(element);
                }
                Some(track) => {
                    warn!(
                        "Dropping {:?} element: track {} is {:?}",
                        element.kind(),
                        track_id,
                        track.kind()
                    );
                }
                None => trace!("insert_element: track {} not found", track_id),
            },
            Placement::Auto => {
                let kind = TrackKind::for_element(&element);
                match scene.tracks.iter().position(|t| t.kind() == kind) {
                    Some(idx) => scene.tracks[idx].elements_mut().push(element),
                    None => {
                        let mut track = Track::new(kind, default_track_name(scene, kind));
                        debug!("Auto-created {} track {} for element", kind.label(), track.id());
                        track.elements_mut().push(element);
                        scene.tracks.push(track);
                    }
                }
            }
        }
        self.events.emit(SessionEvent::TimelineChanged { scene_id });
    }

    /// Remove each referenced element. Missing tracks or elements are
    /// skipped, so the operation is idempotent.
    pub fn delete_elements(&self, scenes: &mut SceneRegistry, refs: &[ElementRef]) {
        let Some(scene) = scenes.active_scene_mut() else {
            trace!("delete_elements: no active scene");
            return;
        };
        let scene_id = scene.id;
        for r in refs {
            let Some(track) = scene.track_mut(r.track_id) else {
                trace!("delete_elements: track {} not found", r.track_id);
                continue;
            };
            track.elements_mut().retain(|e| e.id() != r.element_id);
        }
        self.events.emit(SessionEvent::TimelineChanged { scene_id });
    }

    /// Split each referenced element at `split_time`.
    ///
    /// Split times at or outside an element's occupied interval leave
    /// that element untouched. `trim_start` of the surviving right half
    /// advances by exactly the left-part duration: it is the seconds of
    /// source media consumed before the half's visible start, and any
    /// later re-split or trim depends on that offset staying true.
    pub fn split_elements(
        &self,
        scenes: &mut SceneRegistry,
        refs: &[ElementRef],
        split_time: f64,
        retain: Option<SplitSide>,
    ) {
        let Some(scene) = scenes.active_scene_mut() else {
            trace!("split_elements: no active scene");
            return;
        };
        let scene_id = scene.id;
        for r in refs {
            let Some(track) = scene.track_mut(r.track_id) else {
                trace!("split_elements: track {} not found", r.track_id);
                continue;
            };
            let elements = track.elements_mut();
            let Some(idx) = elements.iter().position(|e| e.id() == r.element_id) else {
                trace!("split_elements: element {} not found", r.element_id);
                continue;
            };

            let start = elements[idx].start_time();
            let end = elements[idx].end_time();
            // Strictly interior only; edge-exact splits are no-ops.
            if split_time <= start || split_time >= end {
                continue;
            }
            let left_duration = split_time - start;
            let right_duration = end - split_time;

            match retain {
                Some(SplitSide::Left) => {
                    elements[idx].set_duration(left_duration);
                }
                Some(SplitSide::Right) => {
                    let el = &mut elements[idx];
                    el.set_start_time(split_time);
                    el.set_duration(right_duration);
                    el.set_trim_start(el.trim_start() + left_duration);
                }
                None => {
                    let mut right = elements[idx].clone();
                    right.reassign_id();
                    right.set_start_time(split_time);
                    right.set_duration(right_duration);
                    right.set_trim_start(right.trim_start() + left_duration);
                    elements[idx].set_duration(left_duration);
                    elements.insert(idx + 1, right);
                }
            }
            debug!(
                "Split element {} at {:.3}s (retain {:?})",
                r.element_id, split_time, retain
            );
        }
        self.events.emit(SessionEvent::TimelineChanged { scene_id });
    }
}

/// Default display name: kind label plus the count of same-kind tracks.
fn default_track_name(scene: &Scene, kind: TrackKind) -> String {
    let count = scene.tracks.iter().filter(|t| t.kind() == kind).count();
    format!("{} {}", kind.label(), count + 1)
}
