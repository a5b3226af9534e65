//! Generator configuration
//!
//! The shipped binary runs with [`GeneratorConfig::default`], whose values are
//! the build-time constants below. Tools embedding the library can describe a
//! different layout or target in TOML:
//!
//! ```toml
//! input_dir = "./data/decode_corpus"
//! output_dir = "./tests/decode_corpus"
//! max_size_bytes = 1024
//! compressed_suffix = "zst"
//! clean = "manifest"
//!
//! [target]
//! language = "rust"
//! round_trip_helper = "crate::support::assert_round_trip"
//! ```

use crate::cleaner::CleanPolicy;
use crate::emit::{CairoTarget, RustTarget, TestTarget};
use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Corpus directory holding `NAME` / `NAME.zst` pairs
pub const INPUT_DIR: &str = "./data/decode_corpus";

/// Directory receiving one generated unit per admitted pair
pub const OUTPUT_DIR: &str = "./src/tests/decode_corpus";

/// Largest original size, in bytes, that gets a generated test (1 KiB)
pub const MAX_SIZE_BYTES: u64 = 1024;

/// Suffix marking compressed counterparts, without the dot
pub const COMPRESSED_SUFFIX: &str = "zst";

/// Language of the generated units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "language", rename_all = "lowercase")]
pub enum TargetConfig {
    Cairo(CairoTarget),
    Rust(RustTarget),
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig::Cairo(CairoTarget::default())
    }
}

impl TargetConfig {
    pub fn target(&self) -> &dyn TestTarget {
        match self {
            TargetConfig::Cairo(target) => target,
            TargetConfig::Rust(target) => target,
        }
    }
}

/// Everything a generator run needs to know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_size_bytes: u64,
    pub compressed_suffix: String,
    pub clean: CleanPolicy,
    pub target: TargetConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(INPUT_DIR),
            output_dir: PathBuf::from(OUTPUT_DIR),
            max_size_bytes: MAX_SIZE_BYTES,
            compressed_suffix: COMPRESSED_SUFFIX.to_string(),
            clean: CleanPolicy::default(),
            target: TargetConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Default layout with a different corpus and output directory
    pub fn with_dirs<I: AsRef<Path>, O: AsRef<Path>>(input_dir: I, output_dir: O) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Parse from TOML; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.compressed_suffix.is_empty() {
            return Err(GenError::InvalidConfig(
                "compressed_suffix must not be empty".to_string(),
            ));
        }
        if self.compressed_suffix.contains(['.', '/', '\\']) {
            return Err(GenError::InvalidConfig(format!(
                "compressed_suffix must be a bare extension, got {:?}",
                self.compressed_suffix
            )));
        }
        if self.output_dir.file_name().is_none() {
            return Err(GenError::InvalidConfig(format!(
                "output_dir {} has no final name component",
                self.output_dir.display()
            )));
        }
        if self.input_dir == self.output_dir {
            return Err(GenError::InvalidConfig(
                "input_dir and output_dir must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Sibling path `<output-dir-name>.<ext>` of the aggregator
    pub fn index_path(&self) -> Result<PathBuf> {
        self.sibling_path(self.target.target().extension())
    }

    /// Sibling path `<output-dir-name>.manifest.json` of the generation manifest
    pub fn manifest_path(&self) -> Result<PathBuf> {
        self.sibling_path("manifest.json")
    }

    fn sibling_path(&self, extension: &str) -> Result<PathBuf> {
        let name = self.output_dir.file_name().ok_or_else(|| {
            GenError::InvalidConfig(format!(
                "output_dir {} has no final name component",
                self.output_dir.display()
            ))
        })?;

        let mut file_name = name.to_os_string();
        file_name.push(".");
        file_name.push(extension);
        Ok(self.output_dir.with_file_name(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GeneratorConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("./data/decode_corpus"));
        assert_eq!(config.output_dir, PathBuf::from("./src/tests/decode_corpus"));
        assert_eq!(config.max_size_bytes, 1024);
        assert_eq!(config.compressed_suffix, "zst");
        assert_eq!(config.clean, CleanPolicy::All);
        assert_eq!(config.target.target().extension(), "cairo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sibling_paths() -> Result<()> {
        let config = GeneratorConfig::default();
        assert_eq!(
            config.index_path()?,
            PathBuf::from("./src/tests/decode_corpus.cairo")
        );
        assert_eq!(
            config.manifest_path()?,
            PathBuf::from("./src/tests/decode_corpus.manifest.json")
        );
        Ok(())
    }

    #[test]
    fn test_rust_target_from_toml() -> Result<()> {
        let config = GeneratorConfig::from_toml_str(
            r#"
            output_dir = "tests/decode_corpus"
            clean = "manifest"

            [target]
            language = "rust"
            round_trip_helper = "crate::support::assert_round_trip"
            "#,
        )?;

        assert_eq!(config.input_dir, PathBuf::from(INPUT_DIR));
        assert_eq!(config.clean, CleanPolicy::Manifest);
        match &config.target {
            TargetConfig::Rust(target) => {
                assert_eq!(target.round_trip_helper, "crate::support::assert_round_trip");
                assert_eq!(target.byte_container, "Vec<u8>");
            }
            other => panic!("expected rust target, got {:?}", other),
        }
        assert_eq!(config.index_path()?, PathBuf::from("tests/decode_corpus.rs"));
        Ok(())
    }

    #[test]
    fn test_toml_roundtrip() -> Result<()> {
        let config = GeneratorConfig::default();
        let parsed = GeneratorConfig::from_toml_str(&config.to_toml_string()?)?;
        assert_eq!(parsed, config);
        Ok(())
    }

    #[test]
    fn test_unknown_language_rejected() {
        let result = GeneratorConfig::from_toml_str("[target]\nlanguage = \"cobol\"\n");
        assert!(matches!(result, Err(GenError::Toml(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = GeneratorConfig::default();
        config.compressed_suffix = ".zst".to_string();
        assert!(matches!(config.validate(), Err(GenError::InvalidConfig(_))));

        let mut config = GeneratorConfig::default();
        config.compressed_suffix.clear();
        assert!(config.validate().is_err());

        let config = GeneratorConfig::with_dirs("corpus", "..");
        assert!(config.validate().is_err());
        assert!(config.index_path().is_err());

        let config = GeneratorConfig::with_dirs("same", "same");
        assert!(config.validate().is_err());
    }
}
