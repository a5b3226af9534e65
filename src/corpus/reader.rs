use crate::error::{GenError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A corpus file that has a compressed counterpart next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Base file name, e.g. `a.bin`
    pub name: String,
    pub original_path: PathBuf,
    pub compressed_path: PathBuf,
    /// On-disk length of the original, taken before any read
    pub original_len: u64,
}

/// Both byte sequences of a corpus entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusPair {
    pub name: String,
    pub original: Vec<u8>,
    pub compressed: Vec<u8>,
}

impl CorpusEntry {
    /// Read the original and its compressed counterpart
    ///
    /// Either file missing is `NotFound`; there is no per-file recovery.
    pub fn load(&self) -> Result<CorpusPair> {
        let original = read_file(&self.original_path)?;
        let compressed = read_file(&self.compressed_path)?;

        debug!(
            name = %self.name,
            original = original.len(),
            compressed = compressed.len(),
            "loaded corpus pair"
        );

        Ok(CorpusPair {
            name: self.name.clone(),
            original,
            compressed,
        })
    }
}

/// Lists a flat corpus directory of `NAME` / `NAME.<suffix>` pairs
#[derive(Debug, Clone)]
pub struct CorpusReader {
    input_dir: PathBuf,
    compressed_suffix: String,
}

impl CorpusReader {
    /// Create a reader for `input_dir`; `compressed_suffix` is given without the dot
    pub fn new<P: AsRef<Path>>(input_dir: P, compressed_suffix: &str) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            compressed_suffix: compressed_suffix.to_string(),
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Whether `file_name` is a compressed counterpart rather than an entry
    pub fn is_compressed(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.compressed_suffix.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    }

    /// Path of the compressed counterpart of `name`
    pub fn compressed_path(&self, name: &str) -> PathBuf {
        self.input_dir
            .join(format!("{}.{}", name, self.compressed_suffix))
    }

    /// Look up a single entry by base name
    pub fn entry(&self, name: &str) -> Result<CorpusEntry> {
        let original_path = self.input_dir.join(name);
        let metadata = fs::metadata(&original_path).map_err(|e| GenError::io(&original_path, e))?;

        Ok(CorpusEntry {
            name: name.to_string(),
            compressed_path: self.compressed_path(name),
            original_path,
            original_len: metadata.len(),
        })
    }

    /// Enumerate all corpus entries, sorted by name
    ///
    /// Files bearing the compressed suffix are never entries themselves.
    /// Subdirectories are ignored. Whether the compressed counterpart exists
    /// is only checked when the entry is loaded.
    pub fn discover(&self) -> Result<Vec<CorpusEntry>> {
        let dir = fs::read_dir(&self.input_dir).map_err(|e| GenError::io(&self.input_dir, e))?;

        let mut entries = Vec::new();
        for dir_entry in dir {
            let dir_entry = dir_entry.map_err(|e| GenError::io(&self.input_dir, e))?;
            let name = dir_entry
                .file_name()
                .into_string()
                .map_err(GenError::InvalidFileName)?;

            if self.is_compressed(&name) {
                continue;
            }

            let path = dir_entry.path();
            let metadata = fs::metadata(&path).map_err(|e| GenError::io(&path, e))?;
            if !metadata.is_file() {
                debug!(name = %name, "skipping non-file corpus entry");
                continue;
            }

            entries.push(CorpusEntry {
                compressed_path: self.compressed_path(&name),
                original_path: path,
                original_len: metadata.len(),
                name,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = entries.len(), dir = %self.input_dir.display(), "discovered corpus");
        Ok(entries)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| GenError::io(path, e))
}
