//! Output files with overwrite protection

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use bratconv_core::{BratError, Result};
use bratconv_format::StandoffBlock;

/// Fail when `path` exists and overwriting was not requested
pub fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(BratError::Resource(format!(
            "the output file {} already exists use `--force` or `-f` flag to overwrite the file",
            path.display()
        )));
    }
    Ok(())
}

/// Write the Acharya stream, replacing any previous content
pub fn write_output(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    ensure_writable(path, overwrite)?;
    fs::write(path, contents).map_err(|e| BratError::io(path, e))
}

/// Fail when the stand-off directory lies inside the collection root.
///
/// Regenerated `.ann` files there would have no `.txt` sibling and break
/// the next discovery of the same collection.
pub fn ensure_outside_collection(dir: &Path, root: &Path) -> Result<()> {
    if resolve(dir).starts_with(resolve(root)) {
        return Err(BratError::Resource(format!(
            "the stand-off directory {} is inside the collection {}, choose a directory outside of it",
            dir.display(),
            root.display()
        )));
    }
    Ok(())
}

/// Absolute form of `path` with its longest existing prefix canonicalized
fn resolve(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = fs::canonicalize(existing).unwrap_or_else(|_| existing.to_path_buf());
    resolved.extend(missing.iter().rev());
    resolved
}

/// Write one `<id>.ann` file per stand-off block.
///
/// All targets are checked before the first write, so an existing file or
/// two documents sharing an id leave the directory untouched.
pub fn write_standoff(dir: &Path, blocks: &[StandoffBlock], overwrite: bool) -> Result<Vec<PathBuf>> {
    let targets: Vec<PathBuf> = blocks
        .iter()
        .map(|b| dir.join(format!("{}.ann", b.id)))
        .collect();

    let mut seen = HashSet::with_capacity(targets.len());
    for target in &targets {
        if !seen.insert(target) {
            return Err(BratError::Resource(format!(
                "multiple documents map to the stand-off file {}",
                target.display()
            )));
        }
        ensure_writable(target, overwrite)?;
    }

    fs::create_dir_all(dir).map_err(|e| BratError::io(dir, e))?;

    for (target, block) in targets.iter().zip(blocks) {
        fs::write(target, &block.block).map_err(|e| BratError::io(target, e))?;
    }

    Ok(targets)
}
