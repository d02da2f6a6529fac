//! Spatial placement of visual elements on the canvas.

use serde::{Deserialize, Serialize};

/// 2D position in canvas pixels, relative to the canvas center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Uniform scale + position + rotation carried by every visual element.
///
/// Applies on top of the track; rotation is in degrees, clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale: f32,
    pub position: Position,
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position: Position::default(),
            rotation: 0.0,
        }
    }
}
