//! Acharya record rendering
//!
//! One JSON object per document:
//!
//! ```text
//! {"id":"doc","test":true,"Data":"...","Entities":[[0,4,"PERSON"]],"Relations":[{"head":[0,4],"tail":[15,18],"name":"works_for"}]}
//! ```
//!
//! `test` is present only for test documents. Records are serialized
//! compactly, so newlines in the text appear as the escape `\n` and every
//! record occupies exactly one line.

use serde::{Deserialize, Serialize};

use bratconv_core::{EntityMap, Relation, Result};

/// Acharya representation of one annotated document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcharyaRecord {
    /// Document identifier
    pub id: String,

    /// Whether the document belongs to the test split
    #[serde(default, skip_serializing_if = "is_false")]
    pub test: bool,

    /// Full document text
    #[serde(rename = "Data")]
    pub data: String,

    /// Entities as `[begin, end, type]`
    #[serde(rename = "Entities")]
    pub entities: Vec<AcharyaEntity>,

    /// Relations in source order
    #[serde(rename = "Relations")]
    pub relations: Vec<AcharyaRelation>,
}

/// `[begin, end, type]` entity triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcharyaEntity(pub i64, pub i64, pub String);

/// Relation between two entity spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcharyaRelation {
    /// `[begin, end]` of the `Arg1` entity
    pub head: [i64; 2],

    /// `[begin, end]` of the `Arg2` entity
    pub tail: [i64; 2],

    /// Relation type name
    pub name: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl AcharyaRecord {
    /// Build the record of one document
    pub fn from_document(
        text: &str,
        entities: &EntityMap,
        relations: &[Relation],
        document_id: &str,
        is_test: bool,
    ) -> Self {
        Self {
            id: document_id.to_string(),
            test: is_test,
            data: text.to_string(),
            entities: entities
                .values()
                .map(|e| AcharyaEntity(e.begin, e.end, e.type_name.clone()))
                .collect(),
            relations: relations
                .iter()
                .map(|r| AcharyaRelation {
                    head: [r.head.begin, r.head.end],
                    tail: [r.tail.begin, r.tail.end],
                    name: r.name.clone(),
                })
                .collect(),
        }
    }

    /// Serialize as a single newline-terminated line
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
