use serde_derive::{Deserialize, Serialize};

use super::error::InvalidTemplateError;

// Headings in degrees, one per segment of a stroke; each value is in 0..360
pub type DirectionSequence = Vec<f32>;

// Number of points on the template compass
pub const COMPASS_POINTS: u32 = 16;

// Stroke separator in template notation
pub const STROKE_DELIMITER: char = '|';

// Degrees for one tick of the 16-point compass, rounded half up to whole degrees
pub fn compass_degrees(code: u32) -> f32 {
    ((code as f32) * 360f32 / (COMPASS_POINTS as f32) + 0.5).floor()
}

// A named reference character: one direction sequence per pen stroke
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CharacterTemplate {
    name: String,
    strokes: Vec<DirectionSequence>,
}

impl CharacterTemplate {
    pub fn new(name: impl Into<String>, strokes: Vec<DirectionSequence>) -> CharacterTemplate {
        CharacterTemplate {
            name: name.into(),
            strokes: strokes,
        }
    }

    /// Parses the compact notation: one hex digit per compass heading, strokes separated by `|`.
    ///
    /// ```text
    /// E  F  0  1  2
    /// D  \  |  /  3
    /// C  -  o  -  4
    /// B  /  |  \  5
    /// A  9  8  7  6
    /// ```
    ///
    /// `X` is `66|AA`; `Z` is `44AA44`.
    pub fn parse(name: impl Into<String>, notation: &str) -> Result<CharacterTemplate, InvalidTemplateError> {
        if notation.is_empty() {
            return Err(InvalidTemplateError::EmptyNotation);
        }
        let mut strokes: Vec<DirectionSequence> = Vec::new();
        let mut current: DirectionSequence = Vec::new();
        for (position, character) in notation.char_indices() {
            if character == STROKE_DELIMITER {
                if current.is_empty() {
                    return Err(InvalidTemplateError::EmptyStroke { stroke: strokes.len() });
                }
                strokes.push(std::mem::take(&mut current));
                continue;
            }
            match character.to_digit(COMPASS_POINTS) {
                Some(code) => current.push(compass_degrees(code)),
                None => return Err(InvalidTemplateError::InvalidCharacter { character, position }),
            }
        }
        // Trailing delimiter leaves the last stroke empty
        if current.is_empty() {
            return Err(InvalidTemplateError::EmptyStroke { stroke: strokes.len() });
        }
        strokes.push(current);
        Ok(CharacterTemplate::new(name, strokes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strokes(&self) -> &[DirectionSequence] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    // First direction value outside 0..360, if any
    pub(crate) fn find_invalid_direction(&self) -> Option<f32> {
        self.strokes
            .iter()
            .flatten()
            .copied()
            .find(|d| !d.is_finite() || *d < 0f32 || *d >= 360f32)
    }
}

// Persisted form of a template: its name and notation string
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TemplateDefinition {
    pub name: String,
    pub notation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_degrees() {
        assert_eq!(compass_degrees(0), 0.0);
        assert_eq!(compass_degrees(1), 23.0);
        assert_eq!(compass_degrees(4), 90.0);
        assert_eq!(compass_degrees(6), 135.0);
        assert_eq!(compass_degrees(10), 225.0);
        assert_eq!(compass_degrees(15), 338.0);
    }

    #[test]
    fn test_parse_two_strokes() {
        let template = CharacterTemplate::parse("X-1", "66|AA").unwrap();
        assert_eq!(template.name(), "X-1");
        assert_eq!(template.stroke_count(), 2);
        assert_eq!(template.strokes(), &[vec![135.0, 135.0], vec![225.0, 225.0]]);
    }

    #[test]
    fn test_parse_lowercase() {
        let upper = CharacterTemplate::parse("B", "468AB568AC").unwrap();
        let lower = CharacterTemplate::parse("B", "468ab568ac").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(CharacterTemplate::parse("e", ""), Err(InvalidTemplateError::EmptyNotation));
        assert_eq!(CharacterTemplate::parse("e", "|66"), Err(InvalidTemplateError::EmptyStroke { stroke: 0 }));
        assert_eq!(CharacterTemplate::parse("e", "66||AA"), Err(InvalidTemplateError::EmptyStroke { stroke: 1 }));
        assert_eq!(CharacterTemplate::parse("e", "66|"), Err(InvalidTemplateError::EmptyStroke { stroke: 1 }));
        assert_eq!(
            CharacterTemplate::parse("e", "66|AG"),
            Err(InvalidTemplateError::InvalidCharacter { character: 'G', position: 4 })
        );
        assert_eq!(
            CharacterTemplate::parse("e", "6 6"),
            Err(InvalidTemplateError::InvalidCharacter { character: ' ', position: 1 })
        );
    }

    #[test]
    fn test_invalid_direction() {
        let ok = CharacterTemplate::new("ok", vec![vec![0.0, 359.0]]);
        assert_eq!(ok.find_invalid_direction(), None);
        let bad = CharacterTemplate::new("bad", vec![vec![0.0], vec![360.0]]);
        assert_eq!(bad.find_invalid_direction(), Some(360.0));
    }
}
