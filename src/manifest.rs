//! Generation manifest
//!
//! Under [`CleanPolicy::Manifest`](crate::cleaner::CleanPolicy::Manifest) each
//! run records the units it wrote in `<output-dir-name>.manifest.json`, next to
//! the aggregator. The next run deletes exactly those files, so an output
//! directory shared with hand-written files is safe to regenerate.
//!
//! The manifest carries no timestamps: regenerating an unchanged corpus
//! produces a byte-identical manifest.

use crate::emit::GeneratedUnit;
use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Current manifest layout version
pub const MANIFEST_VERSION: u32 = 1;

/// Units written by one generator run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub version: u32,
    pub generator: String,
    /// Extension of the units, without the dot
    pub target_extension: String,
    pub units: Vec<ManifestEntry>,
}

/// One generated unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// File name inside the output directory
    pub file: String,
    pub corpus_name: String,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Hex SHA-256 of the rendered unit
    pub sha256: String,
}

impl GenerationManifest {
    pub fn new(target_extension: &str) -> Self {
        Self {
            version: MANIFEST_VERSION,
            generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            target_extension: target_extension.to_string(),
            units: Vec::new(),
        }
    }

    /// Build a manifest from generated units, sorted by file name
    pub fn from_units(target_extension: &str, units: &[GeneratedUnit]) -> Self {
        let mut manifest = Self::new(target_extension);
        for unit in units {
            manifest.add_unit(unit);
        }
        manifest.units.sort_by(|a, b| a.file.cmp(&b.file));
        manifest
    }

    pub fn add_unit(&mut self, unit: &GeneratedUnit) {
        self.units.push(ManifestEntry {
            file: unit.file_name(),
            corpus_name: unit.corpus_name.clone(),
            original_size: unit.original_size,
            compressed_size: unit.compressed_size,
            sha256: unit.sha256.clone(),
        });
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(GenError::from)
    }

    /// Parse from JSON
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(GenError::from)
    }

    /// Load the manifest at `path`, or `None` if no previous run left one
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match fs::read(path) {
            Ok(data) => Self::from_json(&data).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GenError::io(path, e)),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;
        json.push(b'\n');
        fs::write(path, json).map_err(|e| GenError::io(path, e))
    }
}
