//! Stand-off block rendering
//!
//! Regenerates `T` and `R` records from parsed annotations, taking each
//! entity's surface text from the document rather than from the input
//! `.ann` file.

use bratconv_core::{substring, Entity, EntityMap, Relation, Result};

/// `T<id>\t<type> <begin> <end>\t<surface text>`
pub fn entity_line(text: &str, entity: &Entity) -> Result<String> {
    let surface = substring(text, entity.begin, entity.end)?;
    Ok(format!(
        "T{}\t{} {} {}\t{}",
        entity.id, entity.type_name, entity.begin, entity.end, surface
    ))
}

/// `R<id>\t<name> Arg1:T<head> Arg2:T<tail>\t`
pub fn relation_line(relation: &Relation) -> String {
    format!(
        "R{}\t{} Arg1:T{} Arg2:T{}\t",
        relation.id, relation.name, relation.head_id, relation.tail_id
    )
}

/// Render all entities, then all relations, newline-joined without a
/// trailing newline
pub fn to_standoff(text: &str, entities: &EntityMap, relations: &[Relation]) -> Result<String> {
    let mut lines = Vec::with_capacity(entities.len() + relations.len());

    for entity in entities.values() {
        lines.push(entity_line(text, entity)?);
    }
    lines.extend(relations.iter().map(relation_line));

    Ok(lines.join("\n"))
}
