//! Input splits: named byte buffers handed to the record reader.

use crate::error::{IndexError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The contents of one input file, together with the name postings refer to.
#[derive(Debug, Clone)]
pub struct InputSplit {
    /// Final path component of the file.
    pub name: Arc<str>,
    pub data: Vec<u8>,
}

impl InputSplit {
    pub fn new(name: impl Into<Arc<str>>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a file; the split is named after its file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                IndexError::Configuration(format!("input {} has no file name", path.display()))
            })?;
        let data = fs::read(path)?;
        tracing::debug!(source_file = %name, bytes = data.len(), "Input split read");
        Ok(Self::new(name, data))
    }

    /// Iterate over physical lines as `(1-based line, bytes)`, without the
    /// `\n` terminator. A final terminator does not start an extra line.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &[u8])> + '_ {
        let data = self.data.strip_suffix(b"\n").unwrap_or(&self.data);
        let empty = data.is_empty();
        data.split(|b| *b == b'\n')
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(move |_| !empty)
    }
}

/// Expand input paths into the list of files to read.
///
/// Files are taken as given. Directories contribute their regular files,
/// sorted by name, skipping names starting with `.` or `_`.
pub fn expand_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|e| {
            IndexError::Configuration(format!("cannot read input {}: {e}", path.display()))
        })?;
        if !meta.is_dir() {
            files.push(path.to_path_buf());
            continue;
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let hidden = entry
                .file_name()
                .to_str()
                .is_some_and(|n| n.starts_with('.') || n.starts_with('_'));
            if !hidden && entry.file_type()?.is_file() {
                entries.push(entry.path());
            }
        }
        entries.sort();
        files.extend(entries);
    }
    Ok(files)
}

/// Read every input path into splits.
pub fn read_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<InputSplit>> {
    expand_inputs(paths)?
        .iter()
        .map(|p| InputSplit::from_path(p))
        .collect()
}
