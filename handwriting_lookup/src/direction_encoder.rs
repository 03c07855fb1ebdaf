use serde_derive::{Deserialize, Serialize};

use super::entities::*;
use super::*;

// Turns a raw stroke into one heading per segment between consecutive points
pub trait DirectionEncoder {
    fn encode(&self, stroke: &Stroke) -> DirectionSequence;
}

// Whole degrees clockwise from north
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeEncoder;

// Nearest of the 16 template compass headings
#[derive(Debug, Clone, Copy, Default)]
pub struct CompassEncoder;

// Selects the encoder a matcher uses
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    #[default]
    Degrees,
    Compass,
}

impl Encoding {
    pub fn encoder(self) -> &'static (dyn DirectionEncoder + Send + Sync) {
        match self {
            Encoding::Degrees => &DegreeEncoder,
            Encoding::Compass => &CompassEncoder,
        }
    }
}

// Gets heading, in degrees, from point a to b
// Screen coordinates: y grows downward, so up is 0, right is 90, down is 180
fn heading(a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dy.atan2(dx).to_degrees() + 90f32).rem_euclid(360f32)
}

// Half-up rounding to whole degrees, wrapped back into 0..360
fn round_degrees(degrees: f32) -> f32 {
    (degrees + 0.5).floor().rem_euclid(360f32)
}

fn compass_code(degrees: f32) -> u32 {
    let step = 360f32 / (COMPASS_POINTS as f32);
    ((degrees / step + 0.5).floor() as u32) % COMPASS_POINTS
}

fn encode_segments(stroke: &Stroke, f: impl Fn(f32) -> f32) -> DirectionSequence {
    stroke
        .points
        .windows(2)
        .map(|pair| f(heading(pair[0], pair[1])))
        .collect()
}

impl DirectionEncoder for DegreeEncoder {
    fn encode(&self, stroke: &Stroke) -> DirectionSequence {
        encode_segments(stroke, round_degrees)
    }
}

impl DirectionEncoder for CompassEncoder {
    fn encode(&self, stroke: &Stroke) -> DirectionSequence {
        encode_segments(stroke, |degrees| compass_degrees(compass_code(degrees)))
    }
}
