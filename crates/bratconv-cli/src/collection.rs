//! Collection discovery and document loading

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use bratconv_core::{BratError, ConvertConfig, DocumentInput, Result};

use crate::args::file_stem;

const ANN_EXTENSION: &str = "ann";
const TXT_EXTENSION: &str = "txt";

/// A `.ann` file and the `.txt` document it annotates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPair {
    /// Document identifier (annotation file stem)
    pub id: String,
    pub is_test: bool,
    pub annotation: PathBuf,
    pub text: PathBuf,
}

impl DocumentPair {
    pub fn new(annotation: PathBuf, text: PathBuf, test_prefix: &str) -> Self {
        let id = file_stem(&annotation);
        Self {
            is_test: id.starts_with(test_prefix),
            id,
            annotation,
            text,
        }
    }

    /// Read both files in full
    pub fn load(&self) -> Result<DocumentInput> {
        let annotation = read(&self.annotation)?;
        let text = read(&self.text)?;

        Ok(DocumentInput::new(&self.id, annotation, text).with_test(self.is_test))
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| BratError::io(path, e))
}

/// Schema location and document pairs of one run
#[derive(Debug, Clone)]
pub struct Collection {
    pub schema_path: PathBuf,
    pub pairs: Vec<DocumentPair>,
}

impl Collection {
    /// Build a collection from explicit, already validated file lists
    pub fn from_files(
        annotations: Vec<PathBuf>,
        texts: Vec<PathBuf>,
        conf: PathBuf,
        config: &ConvertConfig,
    ) -> Self {
        let pairs = annotations
            .into_iter()
            .zip(texts)
            .map(|(ann, txt)| DocumentPair::new(ann, txt, &config.test_prefix))
            .collect();

        Self {
            schema_path: conf,
            pairs,
        }
    }

    /// Walk a collection directory in file-name order.
    ///
    /// Every `.ann` needs a sibling `.txt` and vice versa. At most one
    /// schema file may appear anywhere in the tree; the one used is the one
    /// at the root.
    pub fn discover(root: &Path, config: &ConvertConfig) -> Result<Self> {
        let mut pairs = Vec::new();
        let mut schema_files = 0usize;

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();

            if has_extension(path, ANN_EXTENSION) {
                let text = path.with_extension(TXT_EXTENSION);
                require_exists(&text)?;
                pairs.push(DocumentPair::new(
                    path.to_path_buf(),
                    text,
                    &config.test_prefix,
                ));
            } else if has_extension(path, TXT_EXTENSION) {
                require_exists(&path.with_extension(ANN_EXTENSION))?;
            } else if entry
                .file_name()
                .to_string_lossy()
                .ends_with(config.schema_file_name.as_str())
            {
                schema_files += 1;
                if schema_files > 1 {
                    return Err(BratError::Configuration(format!(
                        "multiple `{}` files found",
                        config.schema_file_name
                    )));
                }
            }
        }

        tracing::debug!(
            root = %root.display(),
            documents = pairs.len(),
            "Discovered collection"
        );

        Ok(Self {
            schema_path: root.join(&config.schema_file_name),
            pairs,
        })
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

fn require_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(BratError::Resource(format!(
            "{} file does not exist",
            path.display()
        )))
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> BratError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    BratError::io(path, source)
}
