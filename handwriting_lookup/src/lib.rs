//! Recognizes a hand-drawn character by comparing the headings of its pen
//! strokes to registered templates, using an edit distance weighted by
//! angular difference.

extern crate wasm_bindgen;
extern crate serde_derive;
extern crate bincode;

mod angle_distance;
mod config;
mod direction_encoder;
mod entities;
mod error;
mod match_collector;
mod matcher;
mod templates;

use serde_derive::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub use angle_distance::{angular_distance, compute_edit_distance_matrix, CostMatrix, INDEL_COST};
pub use config::{MatcherConfig, DEFAULT_THRESHOLD};
pub use direction_encoder::{CompassEncoder, DegreeEncoder, DirectionEncoder, Encoding};
pub use entities::{compass_degrees, CharacterTemplate, DirectionSequence, TemplateDefinition, COMPASS_POINTS, STROKE_DELIMITER};
pub use error::{InvalidTemplateError, LengthMismatchError, RegistryError, StrokeError};
pub use match_collector::MatchCollector;
pub use matcher::{multi_stroke_cost, Matcher};
pub use templates::TemplateRegistry;

// Coordinates are expected to be finite; from_xy enforces it for raw input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    // Pairs up parallel coordinate arrays of equal length, all values finite
    pub fn from_xy(xs: &[f32], ys: &[f32]) -> Result<Stroke, StrokeError> {
        if xs.len() != ys.len() {
            return Err(StrokeError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        let mut points: Vec<Point> = Vec::with_capacity(xs.len());
        for (index, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(StrokeError::NonFinite { index: index, x: x, y: y });
            }
            points.push(Point { x: x, y: y });
        }
        Ok(Stroke { points: points })
    }
}

// How a stroke arrives from JS and in recorded inputs: separate x and y arrays
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StrokeInput {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
}

impl TryFrom<&StrokeInput> for Stroke {
    type Error = StrokeError;

    fn try_from(input: &StrokeInput) -> Result<Stroke, StrokeError> {
        Stroke::from_xy(&input.xs, &input.ys)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub template: &'a CharacterTemplate,
    pub cost: f32,
}

// Serialized form of a match handed back to JS
#[derive(Serialize)]
struct MatchOutput<'a> {
    name: &'a str,
    cost: f32,
}

impl<'a> From<&MatchResult<'a>> for MatchOutput<'a> {
    fn from(mc: &MatchResult<'a>) -> MatchOutput<'a> {
        MatchOutput {
            name: mc.template.name(),
            cost: mc.cost,
        }
    }
}

thread_local!(static MATCHER: Result<Matcher, RegistryError> = Matcher::with_builtin_templates());

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn recognize_json(matcher: &Matcher, strokes: &[StrokeInput]) -> String {
    let strokes: Result<Vec<Stroke>, StrokeError> = strokes.iter().map(Stroke::try_from).collect();
    let strokes = match strokes {
        Ok(strokes) => strokes,
        Err(err) => return error_json(&err.to_string()),
    };
    let output = matcher.recognize(&strokes).as_ref().map(MatchOutput::from);
    match serde_json::to_string(&output) {
        Ok(json) => json,
        Err(err) => error_json(&err.to_string()),
    }
}

/// Recognizes strokes against the built-in templates.
///
/// Input is an array of strokes, each `{ xs: number[], ys: number[] }`.
/// Returns `{"name": ..., "cost": ...}` for a match, `null` for no match, or
/// `{"error": ...}` if the input cannot be read, a stroke's `xs` and `ys`
/// differ in length, or a coordinate is not finite.
#[wasm_bindgen]
#[allow(deprecated)]
pub fn recognize(input: &JsValue) -> String {
    let strokes: Vec<StrokeInput> = match input.into_serde() {
        Ok(strokes) => strokes,
        Err(err) => return error_json(&err.to_string()),
    };
    MATCHER.with(|matcher| match matcher {
        Ok(matcher) => recognize_json(matcher, &strokes),
        Err(err) => error_json(&err.to_string()),
    })
}
