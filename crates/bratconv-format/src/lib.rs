//! bratconv Format - Output rendering and batch conversion
//!
//! Renders parsed annotations in two representations:
//! - Acharya: one JSON object per document, one document per line
//! - Stand-off: regenerated `T`/`R` records with their surface text
//!
//! The [`Converter`] drives parsing and rendering over a batch of
//! documents.

use bratconv_core::{EntityMap, Relation, Result};

pub mod acharya;
pub mod pipeline;
pub mod standoff;

pub use acharya::{AcharyaEntity, AcharyaRecord, AcharyaRelation};
pub use pipeline::{ConversionOutput, Converter, FormattedDocument, StandoffBlock};
pub use standoff::to_standoff;

/// Render one document as an Acharya record and a stand-off block.
///
/// The Acharya record ends with a newline, the stand-off block does not.
pub fn format(
    text: &str,
    entities: &EntityMap,
    relations: &[Relation],
    document_id: &str,
    is_test: bool,
) -> Result<(String, String)> {
    let standoff = to_standoff(text, entities, relations)?;
    let acharya =
        AcharyaRecord::from_document(text, entities, relations, document_id, is_test).to_line()?;

    Ok((acharya, standoff))
}
