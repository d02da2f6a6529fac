//! Session-level change notifications.
//!
//! Every manager emits `SessionEvent` through a shared emitter, so a UI
//! layer subscribes once (`bus.subscribe::<SessionEvent, _>`) and
//! observes the whole session; `bus.poll()` is the batched form.

use uuid::Uuid;

use super::event_bus::{EventBus, EventEmitter};

/// Aggregated change notification raised by the session managers.
///
/// Payloads identify what changed; subscribers re-read the session
/// state they care about rather than diffing event data.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Play/pause flips, seeks and per-tick advances of the clock.
    PlaybackChanged { playing: bool, time: f64 },
    /// Scene list replaced, cleared, active pointer moved or bookmarks
    /// toggled.
    ScenesChanged,
    /// Tracks/elements of the given scene mutated. Exactly one per
    /// timeline operation, raised after the full operation completes.
    TimelineChanged { scene_id: Uuid },
    /// Active project lifecycle transition (created/loading/loaded/
    /// saved/closed/deleted/renamed).
    ProjectChanged,
    /// Saved-projects metadata index changed.
    ProjectListChanged,
    /// Media pool contents changed.
    MediaChanged,
    /// Selection set changed.
    SelectionChanged,
}

/// Session event emitter (wraps Option<EventEmitter>).
///
/// `dummy()` gives a no-op emitter so managers can be constructed in
/// isolation (tests, pre-wiring) without an event bus.
#[derive(Clone, Default, Debug)]
pub struct SessionEventEmitter {
    inner: Option<EventEmitter>,
}

impl SessionEventEmitter {
    /// Create a no-op emitter.
    pub fn dummy() -> Self {
        Self { inner: None }
    }

    /// Create from a live bus.
    pub fn from_bus(bus: &EventBus) -> Self {
        Self { inner: Some(bus.emitter()) }
    }

    /// Emit event (no-op if dummy)
    pub fn emit(&self, event: SessionEvent) {
        if let Some(ref emitter) = self.inner {
            emitter.emit(event);
        }
    }
}
