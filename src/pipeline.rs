//! The generation run: Clean → Discover → (Filter → Encode → Emit)* → Index
//!
//! Per-pair work fans out over rayon. The cleaner finishes before the first
//! unit is written and every unit is written before the output directory is
//! listed for the aggregator. The first failure aborts the run; whatever was
//! already deleted or written stays that way.

use crate::cleaner::{clean_output, CleanPolicy};
use crate::config::GeneratorConfig;
use crate::corpus::{CorpusEntry, CorpusReader, SizeFilter};
use crate::emit::{assign_unit_names, emit_index, emit_unit, GeneratedUnit};
use crate::error::Result;
use crate::manifest::GenerationManifest;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Outcome of one generator run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Entries removed from the output directory before generation
    pub removed: usize,
    /// Units written this run, ordered by corpus name
    pub units: Vec<GeneratedUnit>,
    /// Entries left out because their original exceeds the threshold
    pub excluded: Vec<CorpusEntry>,
    pub index_path: PathBuf,
    /// Modules referenced by the aggregator, in file order
    pub modules: Vec<String>,
    /// Manifest written under [`CleanPolicy::Manifest`]
    pub manifest_path: Option<PathBuf>,
}

/// Regenerate the output directory and aggregator from the corpus
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    config.validate()?;

    let target = config.target.target();
    let index_path = config.index_path()?;
    let manifest_path = config.manifest_path()?;

    let removed = clean_output(&config.output_dir, config.clean, &manifest_path)?;

    let reader = CorpusReader::new(&config.input_dir, &config.compressed_suffix);
    let entries = reader.discover()?;

    let filter = SizeFilter::new(config.max_size_bytes);
    let (admitted, excluded) = filter.partition(entries);
    info!(
        admitted = admitted.len(),
        excluded = excluded.len(),
        max = config.max_size_bytes,
        "screened corpus"
    );

    let named = assign_unit_names(admitted)?;

    let units = named
        .par_iter()
        .map(|(entry, unit_name)| {
            let pair = entry.load()?;
            emit_unit(&config.output_dir, target, &pair, unit_name)
        })
        .collect::<Result<Vec<_>>>()?;

    let modules = emit_index(&config.output_dir, &index_path, target)?;

    let manifest_path = match config.clean {
        CleanPolicy::All => None,
        CleanPolicy::Manifest => {
            GenerationManifest::from_units(target.extension(), &units).write(&manifest_path)?;
            Some(manifest_path)
        }
    };

    info!(units = units.len(), removed, "generation finished");

    Ok(GenerationReport {
        removed,
        units,
        excluded,
        index_path,
        modules,
        manifest_path,
    })
}
