//! Scenes: independently addressable track collections within a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::track::Track;

/// A named collection of tracks sharing one timeline.
///
/// `bookmarks` is a sorted, deduplicated sequence of timestamps in
/// seconds. Older persisted records predate the field, so it defaults
/// to empty on deserialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: Uuid,
    pub name: String,
    pub is_main: bool,
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub bookmarks: Vec<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scene {
    pub fn new(name: impl Into<String>, is_main: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_main,
            tracks: Vec::new(),
            bookmarks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn track(&self, id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    pub fn track_mut(&mut self, id: Uuid) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id() == id)
    }

    /// Latest end time over all tracks and elements, 0 if empty.
    /// Recomputed on every call; mutations can arrive through several
    /// entry points so a cached value would go stale.
    pub fn total_duration(&self) -> f64 {
        self.tracks.iter().map(|t| t.end_time()).fold(0.0, f64::max)
    }
}
