//! annotation.conf schema extraction
//!
//! Only two whitelists are taken from the schema: the entity type names of
//! the `[entities]` section and the relation type names of the
//! `[relations]` section. Argument roles, attributes, events and the rest of
//! the BRAT configuration grammar are not interpreted.

use std::collections::HashSet;
use std::path::Path;

use bratconv_core::{BratError, Result};

/// Set of type names declared by a schema
pub type TypeSet = HashSet<String>;

const ENTITIES_SECTION: &str = "[entities]";
const RELATIONS_SECTION: &str = "[relations]";

/// Content lines of the section opened by `marker`.
///
/// The section starts after the first line containing `marker` and ends
/// before the next line beginning with `[`. Blank and `#` comment lines are
/// dropped, remaining lines are trimmed.
fn section_lines<'a>(conf: &'a str, marker: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    conf.lines()
        .skip_while(move |line| !line.contains(marker))
        .skip(1)
        .take_while(|line| !line.starts_with('['))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Collect the entity type names of the `[entities]` section
pub fn extract_entity_types(conf: &str) -> TypeSet {
    section_lines(conf, ENTITIES_SECTION)
        .map(str::to_string)
        .collect()
}

/// Collect the relation type names of the `[relations]` section.
///
/// Only the leading token of each line is kept; the `Arg1:..., Arg2:...`
/// role declarations that follow it are discarded.
pub fn extract_relation_types(conf: &str) -> TypeSet {
    section_lines(conf, RELATIONS_SECTION)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Entity and relation whitelists of an annotation collection
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entity_types: TypeSet,
    relation_types: TypeSet,
}

impl Schema {
    /// Create a schema, rejecting an empty entity whitelist
    pub fn new(entity_types: TypeSet, relation_types: TypeSet) -> Result<Self> {
        if entity_types.is_empty() {
            return Err(BratError::Configuration(
                "the conf file does not have an `[entities]` field or `[entities]` field is empty"
                    .to_string(),
            ));
        }

        Ok(Self {
            entity_types,
            relation_types,
        })
    }

    /// Extract both whitelists from schema text
    pub fn parse(conf: &str) -> Result<Self> {
        Self::new(extract_entity_types(conf), extract_relation_types(conf))
    }

    /// Read and parse a schema file
    pub fn load(path: &Path) -> Result<Self> {
        let conf = std::fs::read_to_string(path).map_err(|e| {
            BratError::Configuration(format!(
                "could not read conf file {}: {e}",
                path.display()
            ))
        })?;

        let schema = Self::parse(&conf)?;
        tracing::debug!(
            path = %path.display(),
            entity_types = schema.entity_types.len(),
            relation_types = schema.relation_types.len(),
            "Loaded annotation schema"
        );
        Ok(schema)
    }

    /// Check if an entity type is declared
    pub fn has_entity_type(&self, name: &str) -> bool {
        self.entity_types.contains(name)
    }

    /// Check if a relation type is declared
    pub fn has_relation_type(&self, name: &str) -> bool {
        self.relation_types.contains(name)
    }

    pub fn entity_types(&self) -> &TypeSet {
        &self.entity_types
    }

    pub fn relation_types(&self) -> &TypeSet {
        &self.relation_types
    }
}

// ============================================================================
// Tests
// ============================================================================
