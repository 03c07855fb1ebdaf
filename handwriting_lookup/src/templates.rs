use std::collections::HashSet;

use super::entities::*;
use super::error::RegistryError;

// Built-in character set. The two scribbles are deliberately ambiguous shapes
// that calibrate the acceptance threshold.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("scribble-1", "44AA44AA44"),
    ("scribble-2", "44BB44BB44"),
    ("A-1", "99|77|4"),
    ("B-1", "88888|468AB568AC"),
    ("C-1", "CBA987654"),
    ("X-1", "66|AA"),
    ("Y-1", "66|AA88"),
    ("Z-1", "44AA44"),
];

/// Immutable, ordered set of character templates.
///
/// Built once and then only read; registration order decides ties between
/// equally good matches.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<CharacterTemplate>,
}

impl TemplateRegistry {
    pub fn new(templates: Vec<CharacterTemplate>) -> TemplateRegistry {
        // Unique names are up to the caller; flag repeats without rejecting them
        let mut seen: HashSet<&str> = HashSet::with_capacity(templates.len());
        for template in &templates {
            if !seen.insert(template.name()) {
                tracing::warn!(name = template.name(), "duplicate template name");
            }
        }
        TemplateRegistry {
            templates: templates,
        }
    }

    pub fn builtin() -> Result<TemplateRegistry, RegistryError> {
        let definitions: Vec<TemplateDefinition> = BUILTIN_TEMPLATES
            .iter()
            .map(|&(name, notation)| TemplateDefinition {
                name: name.to_string(),
                notation: notation.to_string(),
            })
            .collect();
        TemplateRegistry::from_definitions(&definitions)
    }

    pub fn from_definitions(definitions: &[TemplateDefinition]) -> Result<TemplateRegistry, RegistryError> {
        let mut templates: Vec<CharacterTemplate> = Vec::with_capacity(definitions.len());
        for def in definitions {
            let template = CharacterTemplate::parse(def.name.as_str(), &def.notation)
                .map_err(|source| RegistryError::Template {
                    name: def.name.clone(),
                    source: source,
                })?;
            templates.push(template);
        }
        tracing::debug!(count = templates.len(), "registered templates");
        Ok(TemplateRegistry::new(templates))
    }

    // JSON array of {"name", "notation"} objects
    pub fn from_json(json: &str) -> Result<TemplateRegistry, RegistryError> {
        let definitions: Vec<TemplateDefinition> = serde_json::from_str(json)?;
        TemplateRegistry::from_definitions(&definitions)
    }

    // Compiled form written by template_convert
    pub fn from_bincode(bytes: &[u8]) -> Result<TemplateRegistry, RegistryError> {
        let reader = std::io::BufReader::new(bytes);
        let templates: Vec<CharacterTemplate> = bincode::deserialize_from(reader)?;
        for template in &templates {
            if let Some(value) = template.find_invalid_direction() {
                return Err(RegistryError::InvalidDirection {
                    name: template.name().to_string(),
                    value: value,
                });
            }
        }
        Ok(TemplateRegistry::new(templates))
    }

    pub fn to_bincode(&self) -> Result<Vec<u8>, RegistryError> {
        Ok(bincode::serialize(&self.templates)?)
    }

    pub fn templates(&self) -> &[CharacterTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    // First template registered under this name
    pub fn get(&self, name: &str) -> Option<&CharacterTemplate> {
        self.templates.iter().find(|t| t.name() == name)
    }

    pub fn with_stroke_count(&self, stroke_count: usize) -> impl Iterator<Item = &CharacterTemplate> + '_ {
        self.templates
            .iter()
            .filter(move |t| t.stroke_count() == stroke_count)
    }
}
