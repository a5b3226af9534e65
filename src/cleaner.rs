//! Stale output eviction
//!
//! Runs once, before any unit is written, so the output directory ends up
//! holding exactly the units of the current run.

use crate::error::{GenError, Result};
use crate::manifest::GenerationManifest;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Which entries of the output directory a run may delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanPolicy {
    /// Delete every entry in the output directory
    #[default]
    All,
    /// Delete only the units listed in the previous run's manifest
    ///
    /// With no manifest on disk nothing is deleted. The first run after
    /// switching from [`CleanPolicy::All`] therefore leaves the earlier units
    /// in place, and the aggregator references them; clear the directory once
    /// by hand when switching.
    Manifest,
}

/// Clear stale output according to `policy`, returning how many entries were removed
///
/// A missing output directory is created. Under [`CleanPolicy::Manifest`] the
/// units listed at `manifest_path` are removed; under [`CleanPolicy::All`] a
/// manifest left there by an earlier run is removed with the directory contents.
pub fn clean_output(output_dir: &Path, policy: CleanPolicy, manifest_path: &Path) -> Result<usize> {
    if !output_dir.exists() {
        if policy == CleanPolicy::All {
            remove_stale_manifest(manifest_path)?;
        }
        fs::create_dir_all(output_dir).map_err(|e| GenError::io(output_dir, e))?;
        info!(dir = %output_dir.display(), "created output directory");
        return Ok(0);
    }

    let removed = match policy {
        CleanPolicy::All => {
            remove_stale_manifest(manifest_path)?;
            remove_all_entries(output_dir)?
        }
        CleanPolicy::Manifest => remove_manifest_units(output_dir, manifest_path)?,
    };

    info!(dir = %output_dir.display(), removed, ?policy, "cleaned output directory");
    Ok(removed)
}

fn remove_stale_manifest(manifest_path: &Path) -> Result<()> {
    match fs::remove_file(manifest_path) {
        Ok(()) => {
            info!(path = %manifest_path.display(), "removed manifest of an earlier run");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(GenError::io(manifest_path, e)),
    }
}

fn remove_all_entries(output_dir: &Path) -> Result<usize> {
    let dir = fs::read_dir(output_dir).map_err(|e| GenError::io(output_dir, e))?;

    let mut removed = 0;
    for dir_entry in dir {
        let dir_entry = dir_entry.map_err(|e| GenError::io(output_dir, e))?;
        let path = dir_entry.path();
        let file_type = dir_entry.file_type().map_err(|e| GenError::io(&path, e))?;

        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| GenError::io(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| GenError::io(&path, e))?;
        }
        removed += 1;
    }

    Ok(removed)
}

fn remove_manifest_units(output_dir: &Path, manifest_path: &Path) -> Result<usize> {
    let Some(manifest) = GenerationManifest::load(manifest_path)? else {
        return Ok(0);
    };

    let mut removed = 0;
    for unit in &manifest.units {
        // Only bare file names; never follow a manifest out of the directory
        if Path::new(&unit.file).file_name() != Some(OsStr::new(&unit.file)) {
            warn!(file = %unit.file, "ignoring manifest entry that is not a plain file name");
            continue;
        }

        let path = output_dir.join(&unit.file);
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "manifest unit already removed");
            }
            Err(e) => return Err(GenError::io(&path, e)),
        }
    }

    Ok(removed)
}
