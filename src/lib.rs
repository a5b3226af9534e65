//! corpus-testgen: round-trip decode tests from an on-disk corpus
//!
//! Given a flat directory of `NAME` / `NAME.zst` pairs, this crate writes one
//! test unit per pair whose original is at most 1 KiB, each asserting that
//! decoding the compressed bytes yields the original bytes, plus an aggregator
//! referencing every unit. The decoder and the assertion helper live in the
//! project the tests are generated for; they are only referenced by name.
//!
//! # Example
//!
//! ```no_run
//! use corpus_testgen::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::with_dirs("data/decode_corpus", "src/tests/decode_corpus");
//! let report = generate(&config)?;
//! println!("{} units, aggregator at {}", report.units.len(), report.index_path.display());
//! # Ok::<(), corpus_testgen::GenError>(())
//! ```

// Core modules
pub mod cleaner;
pub mod config;
pub mod corpus;
pub mod emit;
pub mod error;
pub mod manifest;
pub mod pipeline;

// Re-export commonly used types
pub use cleaner::CleanPolicy;
pub use config::{
    GeneratorConfig, TargetConfig, COMPRESSED_SUFFIX, INPUT_DIR, MAX_SIZE_BYTES, OUTPUT_DIR,
};
pub use corpus::{CorpusEntry, CorpusPair, CorpusReader, SizeFilter};
pub use emit::{CairoTarget, GeneratedUnit, RustTarget, TestTarget};
pub use error::{GenError, Result};
pub use manifest::{GenerationManifest, ManifestEntry};
pub use pipeline::{generate, GenerationReport};
