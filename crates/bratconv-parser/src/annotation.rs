//! BRAT `.ann` record parsing
//!
//! Entity records have the form `T<id>\t<type> <begin> <end>\t<text>`,
//! relation records `R<id>\t<name> Arg1:T<id> Arg2:T<id>`. Relations can
//! only be resolved once every entity of the file is known, so the source
//! is scanned twice: entities first, then relations.

use once_cell::sync::Lazy;
use regex::Regex;

use bratconv_core::{BratError, Entity, EntityMap, Relation, RelationPolicy, Result, Span};

use crate::schema::{Schema, TypeSet};

/// Entities and relations of one annotation source
#[derive(Debug, Clone, Default)]
pub struct ParsedAnnotations {
    /// Whitelisted entities keyed by annotation number
    pub entities: EntityMap,

    /// Relations in source order
    pub relations: Vec<Relation>,
}

/// Parse both record kinds of an annotation source against a schema
pub fn parse(ann: &str, schema: &Schema, policy: RelationPolicy) -> Result<ParsedAnnotations> {
    let entities = parse_entities(ann, schema.entity_types())?;
    let relations = parse_relations(ann, &entities, policy)?;

    for relation in &relations {
        if !schema.has_relation_type(&relation.name) {
            tracing::debug!(
                relation = relation.id,
                name = %relation.name,
                "Relation type not declared in schema"
            );
        }
    }

    Ok(ParsedAnnotations {
        entities,
        relations,
    })
}

// ============================================================================
// Entities
// ============================================================================

/// Parse the text-bound entity records whose type is in `entity_types`.
///
/// Records of other types are skipped without validating their offsets. A
/// later record with an already seen annotation number replaces the
/// earlier one.
pub fn parse_entities(ann: &str, entity_types: &TypeSet) -> Result<EntityMap> {
    let mut entities = EntityMap::new();

    for (index, line) in ann.lines().enumerate() {
        if !line.starts_with('T') {
            continue;
        }
        if let Some(entity) = parse_entity_line(line, index + 1, entity_types)? {
            entities.insert(entity.id, entity);
        }
    }

    Ok(entities)
}

fn parse_entity_line(line: &str, line_no: usize, entity_types: &TypeSet) -> Result<Option<Entity>> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [label, span, _text] = fields.as_slice() else {
        return Err(BratError::format(
            line_no,
            format!(
                "expected 3 properties separated by [tab], found {}",
                fields.len()
            ),
        ));
    };

    if span.contains(';') {
        return Err(BratError::UnsupportedFeature(format!(
            "discontinuous text-bound annotations are not supported ({label} at line {line_no})"
        )));
    }

    let tokens: Vec<&str> = span.split(' ').collect();
    let [type_name, begin, end] = tokens.as_slice() else {
        return Err(BratError::format(
            line_no,
            format!("expected `<type> <begin> <end>`, found `{span}`"),
        ));
    };

    let type_name = type_name.trim();
    if !entity_types.contains(type_name) {
        tracing::trace!(line = line_no, type_name, "Skipping entity type not in schema");
        return Ok(None);
    }

    let begin = parse_offset(begin, line_no)?;
    let end = parse_offset(end, line_no)?;
    let id = annotation_number(label, line_no)?;

    Ok(Some(Entity::new(id, begin, end, type_name)))
}

fn parse_offset(token: &str, line_no: usize) -> Result<i64> {
    token
        .parse()
        .map_err(|_| BratError::format(line_no, format!("offset `{token}` is not an integer")))
}

/// Numeric suffix of a record label such as `T12`
fn annotation_number(label: &str, line_no: usize) -> Result<u64> {
    let digits = label.get(1..).unwrap_or_default();
    if digits.is_empty() {
        return Err(BratError::format(line_no, "annotation number is missing"));
    }
    parse_number(digits, line_no)
}

fn parse_number(digits: &str, line_no: usize) -> Result<u64> {
    digits.parse().map_err(|_| {
        BratError::format(
            line_no,
            format!("annotation number `{digits}` is not a valid integer"),
        )
    })
}

// ============================================================================
// Relations
// ============================================================================

static RELATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^R(\d+)\s+(\S+)\s+Arg1:T(\d+)\s+Arg2:T(\d+)").expect("relation pattern is valid")
});

/// Parse the binary relation records and resolve their arguments.
///
/// `R` lines that do not follow the `Arg1:T<id> Arg2:T<id>` grammar are
/// ignored. Head and tail spans are copied from `entities`; an argument
/// without a parsed entity is handled according to `policy`.
pub fn parse_relations(
    ann: &str,
    entities: &EntityMap,
    policy: RelationPolicy,
) -> Result<Vec<Relation>> {
    let mut relations = Vec::new();

    for (index, line) in ann.lines().enumerate() {
        if !line.starts_with('R') {
            continue;
        }
        let line_no = index + 1;

        let Some(caps) = RELATION_PATTERN.captures(line) else {
            tracing::debug!(line = line_no, "Skipping unrecognized relation record");
            continue;
        };

        let head_id = parse_number(&caps[3], line_no)?;
        let tail_id = parse_number(&caps[4], line_no)?;

        relations.push(Relation {
            id: parse_number(&caps[1], line_no)?,
            name: caps[2].to_string(),
            head_id,
            tail_id,
            head: resolve_argument(entities, head_id, line_no, policy)?,
            tail: resolve_argument(entities, tail_id, line_no, policy)?,
        });
    }

    Ok(relations)
}

fn resolve_argument(
    entities: &EntityMap,
    id: u64,
    line_no: usize,
    policy: RelationPolicy,
) -> Result<Span> {
    if let Some(entity) = entities.get(&id) {
        return Ok(entity.span());
    }

    match policy {
        RelationPolicy::Strict => Err(BratError::format(
            line_no,
            format!("relation argument T{id} does not name a parsed entity"),
        )),
        RelationPolicy::Permissive => {
            tracing::warn!(
                line = line_no,
                entity = id,
                "Relation argument not found, using empty span"
            );
            Ok(Span::default())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
