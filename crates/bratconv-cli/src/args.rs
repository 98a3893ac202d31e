//! Command-line flags and input selection

use std::path::{Path, PathBuf};

use clap::Parser;

use bratconv_core::{BratError, Result};

#[derive(Parser, Debug)]
#[command(name = "bratconverter")]
#[command(about = "Convert BRAT stand-off annotations into Acharya JSON lines")]
#[command(version)]
pub struct Cli {
    /// Path to the folder containing the collection
    #[arg(short = 'p', long = "folder-path", visible_alias = "folderPath")]
    pub folder_path: Option<String>,

    /// Comma separated locations of the annotation files (.ann) in correct order
    #[arg(short = 'a', long = "ann")]
    pub ann: Option<String>,

    /// Comma separated locations of the text files (.txt) in correct order
    #[arg(short = 't', long = "txt")]
    pub txt: Option<String>,

    /// Location of the annotation configuration file (annotation.conf)
    #[arg(short = 'c', long = "conf")]
    pub conf: Option<String>,

    /// Name of the output file to be generated
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Also write each document's stand-off block to <DIR>/<id>.ann
    #[arg(long = "standoff-dir", value_name = "DIR")]
    pub standoff_dir: Option<PathBuf>,

    /// Fail on relations whose arguments name no parsed entity
    #[arg(long)]
    pub strict: bool,

    /// Converter settings file (TOML)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

/// Where the documents of a run come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelection {
    /// A BRAT collection directory with `annotation.conf` at its root
    Folder(PathBuf),
    /// Explicit, already paired file lists
    Files {
        annotations: Vec<PathBuf>,
        texts: Vec<PathBuf>,
        conf: PathBuf,
    },
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

fn split_paths(list: &str) -> Vec<PathBuf> {
    list.split(',').map(|p| PathBuf::from(p.trim())).collect()
}

fn resource(message: impl Into<String>) -> BratError {
    BratError::Resource(message.into())
}

impl Cli {
    /// Check flag combinations and resolve the input selection
    pub fn validate(&self) -> Result<InputSelection> {
        if self.force && self.output.is_none() && self.standoff_dir.is_none() {
            return Err(resource(
                "force flag is provided but output file is not specified",
            ));
        }

        match self.folder_path.as_deref() {
            Some(folder) if !folder.is_empty() => {
                if folder.trim().is_empty() {
                    return Err(resource("received empty folder path"));
                }
                Ok(InputSelection::Folder(PathBuf::from(folder)))
            }
            _ => self.validate_files(),
        }
    }

    fn validate_files(&self) -> Result<InputSelection> {
        if is_blank(self.ann.as_deref()) {
            return Err(resource("no annotation files specified in the input"));
        }
        if is_blank(self.txt.as_deref()) {
            return Err(resource("no txt files specified in the input"));
        }
        if is_blank(self.conf.as_deref()) {
            return Err(resource("no conf file specified in the input"));
        }

        let annotations = split_paths(self.ann.as_deref().unwrap_or_default());
        let texts = split_paths(self.txt.as_deref().unwrap_or_default());
        check_pairing(&annotations, &texts)?;

        Ok(InputSelection::Files {
            annotations,
            texts,
            conf: PathBuf::from(self.conf.as_deref().unwrap_or_default().trim()),
        })
    }
}

/// Every annotation file must be matched by the text file with the same stem
/// at the same position
fn check_pairing(annotations: &[PathBuf], texts: &[PathBuf]) -> Result<()> {
    if annotations.len() != texts.len() {
        return Err(resource(format!(
            "the number of annotation files should be equal to the number of txt files, received {} annotation files and {} txt files",
            annotations.len(),
            texts.len()
        )));
    }

    for (ann, txt) in annotations.iter().zip(texts) {
        let stem = file_stem(ann);
        let expected = format!("{stem}.txt");
        let found = txt
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if found != expected {
            return Err(resource(format!(
                "expected annotation file: {} to correspond to: {expected}, received: {}",
                ann.display(),
                txt.display()
            )));
        }
    }

    Ok(())
}

/// File name without its final extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
