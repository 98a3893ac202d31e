//! bratconv Parser - BRAT schema and annotation parsing
//!
//! Supports parsing of:
//! - `annotation.conf` schemas, reduced to entity and relation type whitelists
//! - `.ann` stand-off annotation files: text-bound entities (`T`) and
//!   binary relations (`R`)
//!
//! All other BRAT record kinds (events, attributes, notes, equivalences)
//! are skipped.

pub mod annotation;
pub mod schema;

pub use annotation::{parse, parse_entities, parse_relations, ParsedAnnotations};
pub use schema::{extract_entity_types, extract_relation_types, Schema, TypeSet};
