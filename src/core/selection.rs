//! Selection manager: the currently selected timeline elements.

use log::trace;

use super::events::{SessionEvent, SessionEventEmitter};
use super::timeline::ElementRef;

/// Ordered set of selected (track, element) pairs. Uniqueness is not
/// enforced beyond natural usage; cleared whenever the active project
/// changes.
#[derive(Debug, Default)]
pub struct SelectionManager {
    selected: Vec<ElementRef>,
    events: SessionEventEmitter,
}

impl SelectionManager {
    pub fn new(events: SessionEventEmitter) -> Self {
        Self {
            selected: Vec::new(),
            events,
        }
    }

    pub fn selected(&self) -> &[ElementRef] {
        &self.selected
    }

    pub fn is_selected(&self, r: ElementRef) -> bool {
        self.selected.contains(&r)
    }

    /// Replace the selection.
    pub fn set(&mut self, refs: Vec<ElementRef>) {
        trace!("Selection: {} element(s)", refs.len());
        self.selected = refs;
        self.events.emit(SessionEvent::SelectionChanged);
    }

    pub fn clear(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.events.emit(SessionEvent::SelectionChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_set_and_clear() {
        let mut sel = SelectionManager::new(SessionEventEmitter::dummy());
        let r = ElementRef::new(Uuid::new_v4(), Uuid::new_v4());
        sel.set(vec![r]);
        assert!(sel.is_selected(r));
        assert_eq!(sel.selected().len(), 1);

        sel.clear();
        assert!(sel.selected().is_empty());
        assert!(!sel.is_selected(r));
    }

    #[test]
    fn test_set_replaces_previous_selection() {
        let mut sel = SelectionManager::new(SessionEventEmitter::dummy());
        let a = ElementRef::new(Uuid::new_v4(), Uuid::new_v4());
        let b = ElementRef::new(Uuid::new_v4(), Uuid::new_v4());
        sel.set(vec![a]);
        sel.set(vec![b]);
        assert!(!sel.is_selected(a));
        assert!(sel.is_selected(b));
    }
}
