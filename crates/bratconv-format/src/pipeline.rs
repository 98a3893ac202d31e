//! Batch conversion pipeline
//!
//! Converts documents strictly in input order. The first failing document
//! aborts the batch and no partial output is returned.

use bratconv_core::{BratError, DocumentInput, RelationPolicy, Result};
use bratconv_parser::{annotation, Schema};

/// Both renderings of one document
#[derive(Debug, Clone)]
pub struct FormattedDocument {
    /// Document identifier
    pub id: String,

    /// Newline-terminated Acharya record
    pub acharya: String,

    /// Stand-off block without trailing newline
    pub standoff: String,

    /// Number of entities rendered
    pub entities: usize,

    /// Number of relations rendered
    pub relations: usize,
}

/// Stand-off rendering of one document, kept for callers that persist it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandoffBlock {
    pub id: String,
    pub block: String,
}

/// Accumulated result of a batch
#[derive(Debug, Clone, Default)]
pub struct ConversionOutput {
    /// Acharya records, one per line, without trailing newline
    pub acharya: String,

    /// Stand-off blocks in input order
    pub standoff: Vec<StandoffBlock>,

    /// Number of documents converted
    pub documents: usize,

    /// Total entities across documents
    pub entities: usize,

    /// Total relations across documents
    pub relations: usize,
}

impl ConversionOutput {
    fn push(mut self, document: FormattedDocument) -> Self {
        self.acharya.push_str(&document.acharya);
        self.standoff.push(StandoffBlock {
            id: document.id,
            block: document.standoff,
        });
        self.documents += 1;
        self.entities += document.entities;
        self.relations += document.relations;
        self
    }

    fn finish(mut self) -> Self {
        if self.acharya.ends_with('\n') {
            self.acharya.pop();
        }
        self
    }
}

/// Converts annotated documents against one schema
#[derive(Debug, Clone)]
pub struct Converter {
    schema: Schema,
    policy: RelationPolicy,
}

impl Converter {
    /// Create a converter with permissive relation resolution
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            policy: RelationPolicy::default(),
        }
    }

    /// Set the relation resolution policy
    pub fn with_policy(mut self, policy: RelationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse and render a single document
    pub fn convert_document(&self, input: &DocumentInput) -> Result<FormattedDocument> {
        let parsed = annotation::parse(&input.annotation, &self.schema, self.policy)?;
        let (acharya, standoff) = crate::format(
            &input.text,
            &parsed.entities,
            &parsed.relations,
            &input.id,
            input.is_test,
        )?;

        tracing::debug!(
            document = %input.id,
            test = input.is_test,
            entities = parsed.entities.len(),
            relations = parsed.relations.len(),
            "Converted document"
        );

        Ok(FormattedDocument {
            id: input.id.clone(),
            acharya,
            standoff,
            entities: parsed.entities.len(),
            relations: parsed.relations.len(),
        })
    }

    /// Convert a batch of documents.
    ///
    /// Inputs are loaded lazily, so a document is only read once every
    /// earlier document has been converted.
    pub fn convert<I>(&self, documents: I) -> Result<ConversionOutput>
    where
        I: IntoIterator<Item = Result<DocumentInput>>,
    {
        let output = documents
            .into_iter()
            .try_fold(ConversionOutput::default(), |acc, input| {
                let input = input?;
                let document = self.convert_document(&input).inspect_err(|e| {
                    tracing::debug!(document = %input.id, error = %e, "Conversion failed");
                })?;
                Ok::<_, BratError>(acc.push(document))
            })?
            .finish();

        tracing::info!(
            documents = output.documents,
            entities = output.entities,
            relations = output.relations,
            "Conversion complete"
        );

        Ok(output)
    }
}
