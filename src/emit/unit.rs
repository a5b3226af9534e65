use crate::corpus::{CorpusEntry, CorpusPair};
use crate::emit::target::{TestTarget, UnitSource};
use crate::error::{GenError, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Strict and reserved keywords of the Rust and Cairo targets, lowercase only
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen",
    "hint", "if", "impl", "implicits", "in", "let", "loop", "macro", "match", "mod", "move",
    "mut", "nopanic", "of", "override", "priv", "pub", "ref", "return", "self", "static",
    "static_assert", "struct", "super", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "with", "yield",
];

/// Derive the unit identifier for a corpus file name
///
/// ASCII is lowercased, anything outside `[a-z0-9_]` becomes `_`, and a
/// leading digit gets a `_` prefix. A name left empty or made only of
/// underscores is prefixed with `unit`, and a keyword gets a trailing `_`,
/// so the result is a valid module and function name in every target.
pub fn unit_name(corpus_name: &str) -> String {
    let mut name: String = corpus_name
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.chars().all(|c| c == '_') {
        name.insert_str(0, "unit");
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    } else if RESERVED_WORDS.contains(&name.as_str()) {
        name.push('_');
    }
    name
}

/// Pair each entry with its unit name, rejecting collisions
pub fn assign_unit_names(entries: Vec<CorpusEntry>) -> Result<Vec<(CorpusEntry, String)>> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    let mut named = Vec::with_capacity(entries.len());

    for entry in entries {
        let unit = unit_name(&entry.name);
        if let Some(first) = seen.get(&unit) {
            return Err(GenError::NameCollision {
                unit,
                first: first.clone(),
                second: entry.name,
            });
        }
        seen.insert(unit.clone(), entry.name.clone());
        named.push((entry, unit));
    }

    Ok(named)
}

/// A unit written to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub corpus_name: String,
    pub unit_name: String,
    pub path: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Hex SHA-256 of the rendered source
    pub sha256: String,
}

impl GeneratedUnit {
    /// File name of the unit inside the output directory
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Render `pair` with `target` and write it to `<output_dir>/<unit_name>.<ext>`
///
/// The file is created fresh; an existing file at the same path is truncated.
pub fn emit_unit(
    output_dir: &Path,
    target: &dyn TestTarget,
    pair: &CorpusPair,
    unit_name: &str,
) -> Result<GeneratedUnit> {
    let source = target.render_unit(&UnitSource {
        unit_name,
        compressed: &pair.compressed,
        original: &pair.original,
    });

    let path = output_dir.join(format!("{}.{}", unit_name, target.extension()));
    fs::write(&path, source.as_bytes()).map_err(|e| GenError::io(&path, e))?;

    debug!(unit = %unit_name, path = %path.display(), "wrote generated unit");

    Ok(GeneratedUnit {
        corpus_name: pair.name.clone(),
        unit_name: unit_name.to_string(),
        path,
        original_size: pair.original.len() as u64,
        compressed_size: pair.compressed.len() as u64,
        sha256: hex::encode(Sha256::digest(source.as_bytes())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::target::CairoTarget;

    fn entry(name: &str) -> CorpusEntry {
        CorpusEntry {
            name: name.to_string(),
            original_path: PathBuf::from(name),
            compressed_path: PathBuf::from(format!("{}.zst", name)),
            original_len: 1,
        }
    }

    #[test]
    fn test_unit_name_derivation() {
        assert_eq!(unit_name("a.bin"), "a_bin");
        assert_eq!(unit_name("z000123"), "z000123");
        assert_eq!(unit_name("Mixed-Case.TXT"), "mixed_case_txt");
        assert_eq!(unit_name("1-x"), "_1_x");
        assert_eq!(unit_name("caf\u{e9}"), "caf_");
    }

    #[test]
    fn test_keywords_are_escaped() {
        assert_eq!(unit_name("mod"), "mod_");
        assert_eq!(unit_name("Self"), "self_");
        assert_eq!(unit_name("match"), "match_");
        assert_eq!(unit_name("nopanic"), "nopanic_");
        // Only whole-name keywords are escaped
        assert_eq!(unit_name("mod.bin"), "mod_bin");
        assert_eq!(unit_name("type2"), "type2");
    }

    #[test]
    fn test_underscore_only_names() {
        assert_eq!(unit_name(""), "unit");
        assert_eq!(unit_name("-"), "unit_");
        assert_eq!(unit_name("._."), "unit___");
        assert_eq!(unit_name("__"), "unit__");
    }

    #[test]
    fn test_escaped_keyword_collision_is_rejected() {
        let result = assign_unit_names(vec![entry("mod"), entry("mod_")]);
        assert!(matches!(result, Err(GenError::NameCollision { ref unit, .. }) if unit == "mod_"));
    }

    #[test]
    fn test_assign_unit_names() -> Result<()> {
        let named = assign_unit_names(vec![entry("a.bin"), entry("b")])?;
        let units: Vec<&str> = named.iter().map(|(_, unit)| unit.as_str()).collect();
        assert_eq!(units, vec!["a_bin", "b"]);
        Ok(())
    }

    #[test]
    fn test_collision_is_rejected() {
        let result = assign_unit_names(vec![entry("a.bin"), entry("a_bin")]);
        match result {
            Err(GenError::NameCollision {
                unit,
                first,
                second,
            }) => {
                assert_eq!(unit, "a_bin");
                assert_eq!(first, "a.bin");
                assert_eq!(second, "a_bin");
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn test_emit_unit_writes_file() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let pair = CorpusPair {
            name: "a.bin".to_string(),
            original: vec![0x01, 0x02, 0x03],
            compressed: vec![0x28, 0xb5, 0x2f, 0xfd, 0x00],
        };

        let unit = emit_unit(dir.path(), &CairoTarget::default(), &pair, "a_bin")?;

        assert_eq!(unit.path, dir.path().join("a_bin.cairo"));
        assert_eq!(unit.file_name(), "a_bin.cairo");
        assert_eq!(unit.original_size, 3);
        assert_eq!(unit.compressed_size, 5);

        let written = fs::read(&unit.path).unwrap();
        assert_eq!(unit.sha256, hex::encode(Sha256::digest(&written)));
        assert!(String::from_utf8(written)
            .unwrap()
            .contains("fn test_decode_a_bin()"));
        Ok(())
    }

    #[test]
    fn test_emit_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pair = CorpusPair {
            name: "x".to_string(),
            original: vec![],
            compressed: vec![],
        };

        let result = emit_unit(&dir.path().join("gone"), &CairoTarget::default(), &pair, "x");
        assert!(result.is_err());
    }
}
