//! Typed track lanes holding ordered timeline elements.
//!
//! Element order inside a track has no positional meaning beyond
//! iteration order; placement in scene time comes from each element's
//! `start_time`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::element::{ElementKind, TimelineElement};

/// Track kind discriminant, mirroring the `Track` variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Text,
    Audio,
    Sticker,
}

impl TrackKind {
    /// Display label used in default track names.
    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Text => "Text",
            TrackKind::Audio => "Audio",
            TrackKind::Sticker => "Sticker",
        }
    }

    /// Track/element compatibility: video tracks hold video and image
    /// elements, every other kind holds exactly its own element kind.
    pub fn accepts(&self, kind: ElementKind) -> bool {
        match self {
            TrackKind::Video => matches!(kind, ElementKind::Video | ElementKind::Image),
            TrackKind::Text => kind == ElementKind::Text,
            TrackKind::Audio => kind == ElementKind::Audio,
            TrackKind::Sticker => kind == ElementKind::Sticker,
        }
    }

    /// The track kind an element of the given kind is placed on.
    pub fn for_element(element: &TimelineElement) -> TrackKind {
        match element.kind() {
            ElementKind::Video | ElementKind::Image => TrackKind::Video,
            ElementKind::Text => TrackKind::Text,
            ElementKind::Audio => TrackKind::Audio,
            ElementKind::Sticker => TrackKind::Sticker,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTrack {
    pub id: Uuid,
    pub name: String,
    pub elements: Vec<TimelineElement>,
    pub is_main: bool,
    pub muted: bool,
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTrack {
    pub id: Uuid,
    pub name: String,
    pub elements: Vec<TimelineElement>,
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    pub id: Uuid,
    pub name: String,
    pub elements: Vec<TimelineElement>,
    pub muted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerTrack {
    pub id: Uuid,
    pub name: String,
    pub elements: Vec<TimelineElement>,
    pub hidden: bool,
}

/// Enum containing all track types. Used in `Scene.tracks` for
/// unified storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Track {
    Video(VideoTrack),
    Text(TextTrack),
    Audio(AudioTrack),
    Sticker(StickerTrack),
}

impl Track {
    /// Create a track of the requested kind with variant defaults
    /// (not main, not muted, not hidden).
    pub fn new(kind: TrackKind, name: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let name = name.into();
        match kind {
            TrackKind::Video => Track::Video(VideoTrack {
                id,
                name,
                elements: Vec::new(),
                is_main: false,
                muted: false,
                hidden: false,
            }),
            TrackKind::Text => Track::Text(TextTrack {
                id,
                name,
                elements: Vec::new(),
                hidden: false,
            }),
            TrackKind::Audio => Track::Audio(AudioTrack {
                id,
                name,
                elements: Vec::new(),
                muted: false,
            }),
            TrackKind::Sticker => Track::Sticker(StickerTrack {
                id,
                name,
                elements: Vec::new(),
                hidden: false,
            }),
        }
    }

    pub fn kind(&self) -> TrackKind {
        match self {
            Track::Video(_) => TrackKind::Video,
            Track::Text(_) => TrackKind::Text,
            Track::Audio(_) => TrackKind::Audio,
            Track::Sticker(_) => TrackKind::Sticker,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Track::Video(t) => t.id,
            Track::Text(t) => t.id,
            Track::Audio(t) => t.id,
            Track::Sticker(t) => t.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Track::Video(t) => &t.name,
            Track::Text(t) => &t.name,
            Track::Audio(t) => &t.name,
            Track::Sticker(t) => &t.name,
        }
    }

    pub fn elements(&self) -> &[TimelineElement] {
        match self {
            Track::Video(t) => &t.elements,
            Track::Text(t) => &t.elements,
            Track::Audio(t) => &t.elements,
            Track::Sticker(t) => &t.elements,
        }
    }

    pub fn elements_mut(&mut self) -> &mut Vec<TimelineElement> {
        match self {
            Track::Video(t) => &mut t.elements,
            Track::Text(t) => &mut t.elements,
            Track::Audio(t) => &mut t.elements,
            Track::Sticker(t) => &mut t.elements,
        }
    }

    /// Whether an element of this kind may be placed on this track.
    pub fn accepts(&self, element: &TimelineElement) -> bool {
        self.kind().accepts(element.kind())
    }

    /// Main flag (video tracks only; false for every other variant).
    pub fn is_main(&self) -> bool {
        match self {
            Track::Video(t) => t.is_main,
            _ => false,
        }
    }

    /// Set the main flag. No-op on non-video tracks.
    pub fn set_main(&mut self, main: bool) {
        if let Track::Video(t) = self {
            t.is_main = main;
        }
    }

    pub fn element(&self, id: Uuid) -> Option<&TimelineElement> {
        self.elements().iter().find(|e| e.id() == id)
    }

    /// Latest end time over this track's elements, 0 if empty.
    pub fn end_time(&self) -> f64 {
        self.elements()
            .iter()
            .map(|e| e.end_time())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::element::{AudioElement, AudioSource, ImageElement, VideoElement};

    #[test]
    fn test_track_defaults_per_kind() {
        let video = Track::new(TrackKind::Video, "Video 1");
        assert!(!video.is_main());
        assert_eq!(video.kind(), TrackKind::Video);
        assert!(video.elements().is_empty());

        let audio = Track::new(TrackKind::Audio, "Audio 1");
        assert!(!audio.is_main());
        assert_eq!(audio.kind(), TrackKind::Audio);
    }

    #[test]
    fn test_video_track_accepts_video_and_image() {
        let track = Track::new(TrackKind::Video, "Video 1");
        let video: TimelineElement = VideoElement::new("v", Uuid::new_v4(), 1.0).into();
        let image: TimelineElement = ImageElement::new("i", Uuid::new_v4(), 1.0).into();
        let audio: TimelineElement = AudioElement::new(
            "a",
            AudioSource::Library { source_url: "s.mp3".into() },
            1.0,
        )
        .into();

        assert!(track.accepts(&video));
        assert!(track.accepts(&image));
        assert!(!track.accepts(&audio));
        assert_eq!(TrackKind::for_element(&image), TrackKind::Video);
        assert_eq!(TrackKind::for_element(&audio), TrackKind::Audio);
    }

    #[test]
    fn test_end_time_is_max_element_end() {
        let mut track = Track::new(TrackKind::Video, "Video 1");
        let mut a: TimelineElement = VideoElement::new("a", Uuid::new_v4(), 3.0).into();
        a.set_start_time(1.0);
        let mut b: TimelineElement = VideoElement::new("b", Uuid::new_v4(), 2.0).into();
        b.set_start_time(0.0);
        track.elements_mut().push(a);
        track.elements_mut().push(b);
        assert_eq!(track.end_time(), 4.0);
    }
}
