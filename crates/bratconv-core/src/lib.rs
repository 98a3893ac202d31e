//! bratconv Core - Annotation model, error types and offset handling
//!
//! This crate defines the abstractions shared by every bratconv crate:
//! - Common error types
//! - Text-bound entities and binary relations keyed by annotation number
//! - Annotated documents as they flow from the parser to the formatter
//! - Character offset extraction (`text`)
//! - Converter settings (`config`)

pub mod config;
pub mod text;

pub use config::{ConfigError, ConvertConfig, ConverterConfig, LoggingConfig};
pub use text::{char_len, logical_len, substring, RangeError};

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for bratconv operations
#[derive(Error, Debug)]
pub enum BratError {
    /// Missing or unusable annotation schema (`annotation.conf`)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Annotation uses a BRAT feature the converter does not handle
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Malformed annotation record
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Offset extraction out of bounds
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Missing input, existing output or invalid input selection
    #[error("{0}")]
    Resource(String),

    /// IO error while reading or writing a file
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Converter settings could not be loaded
    #[error(transparent)]
    Settings(#[from] ConfigError),

    /// Output record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BratError {
    /// Build a format error for a 1-based line number
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Build an IO error tagged with the offending path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error concerns inputs or outputs rather than content
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_) | Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, BratError>;

// ============================================================================
// Annotation Model
// ============================================================================

/// Half-open character range `[begin, end)` into a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: i64,
    pub end: i64,
}

impl Span {
    pub fn new(begin: i64, end: i64) -> Self {
        Self { begin, end }
    }
}

/// A text-bound annotation (`T` record)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Annotation number (`T<id>`)
    pub id: u64,

    /// Start character offset
    pub begin: i64,

    /// End character offset (exclusive)
    pub end: i64,

    /// Entity type name, always a member of the schema's entity types
    pub type_name: String,
}

impl Entity {
    /// Create a new entity
    pub fn new(id: u64, begin: i64, end: i64, type_name: impl Into<String>) -> Self {
        Self {
            id,
            begin,
            end,
            type_name: type_name.into(),
        }
    }

    /// Character span of this entity
    pub fn span(&self) -> Span {
        Span::new(self.begin, self.end)
    }
}

/// Entities of one annotation source keyed by annotation number.
///
/// Iteration is ascending by id, so every derived output is deterministic.
pub type EntityMap = BTreeMap<u64, Entity>;

/// A binary relation (`R` record) between two entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Annotation number (`R<id>`)
    pub id: u64,

    /// Relation type name
    pub name: String,

    /// Annotation number of the `Arg1` entity
    pub head_id: u64,

    /// Annotation number of the `Arg2` entity
    pub tail_id: u64,

    /// Span of the head entity at resolution time
    pub head: Span,

    /// Span of the tail entity at resolution time
    pub tail: Span,
}

/// How relation arguments that name no parsed entity are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelationPolicy {
    /// Substitute the zero span and keep the relation
    #[default]
    Permissive,
    /// Fail with a format error
    Strict,
}

impl RelationPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Permissive
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// One document/annotation pair as read from disk, before parsing
#[derive(Debug, Clone)]
pub struct DocumentInput {
    /// Document identifier (the file stem)
    pub id: String,

    /// Whether the document belongs to the test split
    pub is_test: bool,

    /// Raw annotation source (`.ann`)
    pub annotation: String,

    /// Raw document text (`.txt`)
    pub text: String,
}

impl DocumentInput {
    /// Create a new document input
    pub fn new(id: impl Into<String>, annotation: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_test: false,
            annotation: annotation.into(),
            text: text.into(),
        }
    }

    /// Mark the document as a test document
    pub fn with_test(mut self, is_test: bool) -> Self {
        self.is_test = is_test;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
