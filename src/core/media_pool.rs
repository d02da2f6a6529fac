//! Media pool: imported media references for the active project.
//!
//! Keyed by asset id with stable insertion order. The pool is scoped to
//! the active project and cleared whenever it changes, so assets never
//! leak between projects.

use indexmap::IndexMap;
use log::{debug, trace};
use uuid::Uuid;

use crate::entities::MediaAsset;

use super::events::{SessionEvent, SessionEventEmitter};

#[derive(Debug, Default)]
pub struct MediaPool {
    assets: IndexMap<Uuid, MediaAsset>,
    events: SessionEventEmitter,
}

impl MediaPool {
    pub fn new(events: SessionEventEmitter) -> Self {
        Self {
            assets: IndexMap::new(),
            events,
        }
    }

    /// Add an asset, returning its id. An asset with the same id
    /// replaces the existing entry.
    pub fn add(&mut self, asset: MediaAsset) -> Uuid {
        let id = asset.id;
        debug!("Media pool: added {:?} '{}' ({})", asset.kind, asset.name, id);
        self.assets.insert(id, asset);
        self.events.emit(SessionEvent::MediaChanged);
        id
    }

    /// Remove an asset. Missing ids are a silent no-op.
    pub fn remove(&mut self, id: Uuid) -> Option<MediaAsset> {
        let removed = self.assets.shift_remove(&id);
        if removed.is_some() {
            self.events.emit(SessionEvent::MediaChanged);
        } else {
            trace!("Media pool: remove of unknown asset {}", id);
        }
        removed
    }

    pub fn get(&self, id: Uuid) -> Option<&MediaAsset> {
        self.assets.get(&id)
    }

    /// All assets in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &MediaAsset> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Drop every asset (active project changed).
    pub fn clear(&mut self) {
        if self.assets.is_empty() {
            return;
        }
        debug!("Media pool: cleared {} asset(s)", self.assets.len());
        self.assets.clear();
        self.events.emit(SessionEvent::MediaChanged);
    }
}
