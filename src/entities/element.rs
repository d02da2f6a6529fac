//! Timeline elements: the timed units of content placed on tracks.
//!
//! `TimelineElement` is the closed sum over the five element kinds.
//! Every variant shares the placement fields: an element occupies
//! `[start_time, start_time + duration)` in scene time, and
//! `trim_start` is the seconds of source media skipped before the
//! element's visible start. All times are seconds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transform::Transform;

/// Element kind discriminant, mirroring the `TimelineElement` variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Audio,
    Video,
    Image,
    Text,
    Sticker,
}

/// Where an audio element's samples come from.
///
/// Uploaded media and library sounds are distinct variants, never two
/// optional fields on the same struct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sourceType", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AudioSource {
    /// Reference into the session media pool.
    Media { media_id: Uuid },
    /// Built-in sound library reference.
    Library { source_url: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioElement {
    pub id: Uuid,
    pub name: String,
    pub duration: f64,
    pub start_time: f64,
    pub trim_start: f64,
    pub trim_end: f64,
    #[serde(flatten)]
    pub source: AudioSource,
}

impl AudioElement {
    pub fn new(name: impl Into<String>, source: AudioSource, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration,
            start_time: 0.0,
            trim_start: 0.0,
            trim_end: 0.0,
            source,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoElement {
    pub id: Uuid,
    pub name: String,
    pub duration: f64,
    pub start_time: f64,
    pub trim_start: f64,
    pub trim_end: f64,
    pub media_id: Uuid,
    #[serde(default)]
    pub transform: Transform,
    pub opacity: f32,
    pub hidden: bool,
}

impl VideoElement {
    pub fn new(name: impl Into<String>, media_id: Uuid, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration,
            start_time: 0.0,
            trim_start: 0.0,
            trim_end: 0.0,
            media_id,
            transform: Transform::default(),
            opacity: 1.0,
            hidden: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: Uuid,
    pub name: String,
    pub duration: f64,
    pub start_time: f64,
    pub trim_start: f64,
    pub trim_end: f64,
    pub media_id: Uuid,
    #[serde(default)]
    pub transform: Transform,
    pub opacity: f32,
    pub hidden: bool,
}

impl ImageElement {
    pub fn new(name: impl Into<String>, media_id: Uuid, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration,
            start_time: 0.0,
            trim_start: 0.0,
            trim_end: 0.0,
            media_id,
            transform: Transform::default(),
            opacity: 1.0,
            hidden: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: Uuid,
    pub name: String,
    pub duration: f64,
    pub start_time: f64,
    pub trim_start: f64,
    pub trim_end: f64,
    /// Rendered text content.
    pub content: String,
    #[serde(default)]
    pub transform: Transform,
    pub opacity: f32,
    pub hidden: bool,
}

impl TextElement {
    pub fn new(name: impl Into<String>, content: impl Into<String>, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration,
            start_time: 0.0,
            trim_start: 0.0,
            trim_end: 0.0,
            content: content.into(),
            transform: Transform::default(),
            opacity: 1.0,
            hidden: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerElement {
    pub id: Uuid,
    pub name: String,
    pub duration: f64,
    pub start_time: f64,
    pub trim_start: f64,
    pub trim_end: f64,
    /// Sticker pack source (URL or pack-relative identifier).
    pub source_url: String,
    #[serde(default)]
    pub transform: Transform,
    pub opacity: f32,
    pub hidden: bool,
}

impl StickerElement {
    pub fn new(name: impl Into<String>, source_url: impl Into<String>, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration,
            start_time: 0.0,
            trim_start: 0.0,
            trim_end: 0.0,
            source_url: source_url.into(),
            transform: Transform::default(),
            opacity: 1.0,
            hidden: false,
        }
    }
}

/// Enum containing all element types. Used in `Track` element lists for
/// unified storage; consumption sites match exhaustively so adding a
/// kind is a compile-time-checked change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimelineElement {
    Audio(AudioElement),
    Video(VideoElement),
    Image(ImageElement),
    Text(TextElement),
    Sticker(StickerElement),
}

impl TimelineElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            TimelineElement::Audio(_) => ElementKind::Audio,
            TimelineElement::Video(_) => ElementKind::Video,
            TimelineElement::Image(_) => ElementKind::Image,
            TimelineElement::Text(_) => ElementKind::Text,
            TimelineElement::Sticker(_) => ElementKind::Sticker,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            TimelineElement::Audio(e) => e.id,
            TimelineElement::Video(e) => e.id,
            TimelineElement::Image(e) => e.id,
            TimelineElement::Text(e) => e.id,
            TimelineElement::Sticker(e) => e.id,
        }
    }

    /// Replace the id with a freshly generated one (used when a split
    /// produces a second copy of an element).
    pub fn reassign_id(&mut self) {
        let id = Uuid::new_v4();
        match self {
            TimelineElement::Audio(e) => e.id = id,
            TimelineElement::Video(e) => e.id = id,
            TimelineElement::Image(e) => e.id = id,
            TimelineElement::Text(e) => e.id = id,
            TimelineElement::Sticker(e) => e.id = id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TimelineElement::Audio(e) => &e.name,
            TimelineElement::Video(e) => &e.name,
            TimelineElement::Image(e) => &e.name,
            TimelineElement::Text(e) => &e.name,
            TimelineElement::Sticker(e) => &e.name,
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            TimelineElement::Audio(e) => e.duration,
            TimelineElement::Video(e) => e.duration,
            TimelineElement::Image(e) => e.duration,
            TimelineElement::Text(e) => e.duration,
            TimelineElement::Sticker(e) => e.duration,
        }
    }

    pub fn set_duration(&mut self, duration: f64) {
        match self {
            TimelineElement::Audio(e) => e.duration = duration,
            TimelineElement::Video(e) => e.duration = duration,
            TimelineElement::Image(e) => e.duration = duration,
            TimelineElement::Text(e) => e.duration = duration,
            TimelineElement::Sticker(e) => e.duration = duration,
        }
    }

    pub fn start_time(&self) -> f64 {
        match self {
            TimelineElement::Audio(e) => e.start_time,
            TimelineElement::Video(e) => e.start_time,
            TimelineElement::Image(e) => e.start_time,
            TimelineElement::Text(e) => e.start_time,
            TimelineElement::Sticker(e) => e.start_time,
        }
    }

    pub fn set_start_time(&mut self, start_time: f64) {
        match self {
            TimelineElement::Audio(e) => e.start_time = start_time,
            TimelineElement::Video(e) => e.start_time = start_time,
            TimelineElement::Image(e) => e.start_time = start_time,
            TimelineElement::Text(e) => e.start_time = start_time,
            TimelineElement::Sticker(e) => e.start_time = start_time,
        }
    }

    pub fn trim_start(&self) -> f64 {
        match self {
            TimelineElement::Audio(e) => e.trim_start,
            TimelineElement::Video(e) => e.trim_start,
            TimelineElement::Image(e) => e.trim_start,
            TimelineElement::Text(e) => e.trim_start,
            TimelineElement::Sticker(e) => e.trim_start,
        }
    }

    pub fn set_trim_start(&mut self, trim_start: f64) {
        match self {
            TimelineElement::Audio(e) => e.trim_start = trim_start,
            TimelineElement::Video(e) => e.trim_start = trim_start,
            TimelineElement::Image(e) => e.trim_start = trim_start,
            TimelineElement::Text(e) => e.trim_start = trim_start,
            TimelineElement::Sticker(e) => e.trim_start = trim_start,
        }
    }

    pub fn trim_end(&self) -> f64 {
        match self {
            TimelineElement::Audio(e) => e.trim_end,
            TimelineElement::Video(e) => e.trim_end,
            TimelineElement::Image(e) => e.trim_end,
            TimelineElement::Text(e) => e.trim_end,
            TimelineElement::Sticker(e) => e.trim_end,
        }
    }

    /// Exclusive end of the occupied interval in scene time.
    pub fn end_time(&self) -> f64 {
        self.start_time() + self.duration()
    }
}

// Convenience From implementations
impl From<AudioElement> for TimelineElement {
    fn from(e: AudioElement) -> Self {
        TimelineElement::Audio(e)
    }
}

impl From<VideoElement> for TimelineElement {
    fn from(e: VideoElement) -> Self {
        TimelineElement::Video(e)
    }
}

impl From<ImageElement> for TimelineElement {
    fn from(e: ImageElement) -> Self {
        TimelineElement::Image(e)
    }
}

impl From<TextElement> for TimelineElement {
    fn from(e: TextElement) -> Self {
        TimelineElement::Text(e)
    }
}

impl From<StickerElement> for TimelineElement {
    fn from(e: StickerElement) -> Self {
        TimelineElement::Sticker(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_end_time() {
        let mut el: TimelineElement = VideoElement::new("clip", Uuid::new_v4(), 4.0).into();
        el.set_start_time(2.5);
        assert_eq!(el.end_time(), 6.5);
        assert_eq!(el.kind(), ElementKind::Video);
    }

    #[test]
    fn test_reassign_id_changes_id() {
        let mut el: TimelineElement = TextElement::new("title", "Hello", 3.0).into();
        let before = el.id();
        el.reassign_id();
        assert_ne!(el.id(), before);
    }

    #[test]
    fn test_audio_source_tagged_json() {
        let media = AudioElement::new(
            "voice",
            AudioSource::Media { media_id: Uuid::new_v4() },
            2.0,
        );
        let json = serde_json::to_value(TimelineElement::from(media)).unwrap();
        assert_eq!(json["type"], "audio");
        assert_eq!(json["sourceType"], "media");
        assert!(json.get("mediaId").is_some());

        let lib = AudioElement::new(
            "whoosh",
            AudioSource::Library { source_url: "sounds/whoosh.mp3".into() },
            1.0,
        );
        let json = serde_json::to_value(TimelineElement::from(lib)).unwrap();
        assert_eq!(json["sourceType"], "library");
        assert!(json.get("mediaId").is_none());
    }
}
