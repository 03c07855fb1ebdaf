//! Error types for template parsing, registry loading and stroke pairing.

use thiserror::Error;

/// A template notation string that is not hex digits separated by `|`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidTemplateError {
    #[error("template notation is empty")]
    EmptyNotation,

    /// A stroke with no headings, from a leading, trailing or doubled delimiter.
    #[error("stroke {stroke} of template notation is empty")]
    EmptyStroke { stroke: usize },

    #[error("invalid character {character:?} at position {position} of template notation")]
    InvalidCharacter { character: char, position: usize },
}

/// Failure to build a [`TemplateRegistry`](crate::TemplateRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("template {name:?}: {source}")]
    Template {
        name: String,
        #[source]
        source: InvalidTemplateError,
    },

    /// A decoded template carries a heading outside 0..360.
    #[error("template {name:?} has direction {value} outside 0..360")]
    InvalidDirection { name: String, value: f32 },

    #[error("template definitions are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compiled templates could not be decoded: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Input and template stroke counts differ.
///
/// The matcher only pairs templates whose stroke count equals the input's, so
/// this surfacing at recognition time means the filtering step is broken.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("input has {input} strokes but template has {template}")]
pub struct LengthMismatchError {
    pub input: usize,
    pub template: usize,
}

/// Raw stroke coordinates that cannot be turned into points.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum StrokeError {
    #[error("stroke has {xs} x coordinates but {ys} y coordinates")]
    LengthMismatch { xs: usize, ys: usize },

    /// Infinite or NaN coordinate, e.g. a JSON number beyond the f32 range.
    #[error("point {index} of stroke is not finite: ({x}, {y})")]
    NonFinite { index: usize, x: f32, y: f32 },
}
