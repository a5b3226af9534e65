use crate::emit::target::TestTarget;
use crate::error::{GenError, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// List the module names of all units currently in `output_dir`
///
/// Names are the file names with `.<ext>` stripped, sorted so the aggregator
/// does not depend on directory enumeration order. Entries without the
/// target extension are left out.
pub fn list_unit_modules(output_dir: &Path, target: &dyn TestTarget) -> Result<Vec<String>> {
    let suffix = format!(".{}", target.extension());
    let dir = fs::read_dir(output_dir).map_err(|e| GenError::io(output_dir, e))?;

    let mut modules = Vec::new();
    for dir_entry in dir {
        let dir_entry = dir_entry.map_err(|e| GenError::io(output_dir, e))?;
        let path = dir_entry.path();

        let module = dir_entry
            .file_name()
            .to_str()
            .and_then(|name| name.strip_suffix(suffix.as_str()))
            .filter(|stem| !stem.is_empty())
            .map(str::to_string);

        match module {
            Some(module) if path.is_file() => modules.push(module),
            _ => warn!(path = %path.display(), "not referencing foreign entry in output directory"),
        }
    }

    modules.sort();
    Ok(modules)
}

/// Write the aggregator at `index_path` from the current contents of `output_dir`
///
/// Any previous aggregator is overwritten. Returns the referenced modules.
pub fn emit_index(
    output_dir: &Path,
    index_path: &Path,
    target: &dyn TestTarget,
) -> Result<Vec<String>> {
    let modules = list_unit_modules(output_dir, target)?;
    let source = target.render_index(&modules);

    fs::write(index_path, source.as_bytes()).map_err(|e| GenError::io(index_path, e))?;

    info!(
        path = %index_path.display(),
        units = modules.len(),
        "wrote aggregator"
    );
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::target::{CairoTarget, RustTarget};

    #[test]
    fn test_modules_are_sorted_and_stripped() -> Result<()> {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("decode_corpus");
        fs::create_dir(&out).unwrap();
        for name in ["z9.cairo", "a_bin.cairo", "m.cairo"] {
            fs::write(out.join(name), "").unwrap();
        }

        let modules = list_unit_modules(&out, &CairoTarget::default())?;
        assert_eq!(modules, vec!["a_bin", "m", "z9"]);
        Ok(())
    }

    #[test]
    fn test_foreign_entries_are_skipped() -> Result<()> {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("decode_corpus");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("unit.rs"), "").unwrap();
        fs::write(out.join("notes.txt"), "").unwrap();
        fs::write(out.join(".rs"), "").unwrap();
        fs::create_dir(out.join("dir.rs")).unwrap();

        let modules = list_unit_modules(&out, &RustTarget::default())?;
        assert_eq!(modules, vec!["unit"]);
        Ok(())
    }

    #[test]
    fn test_emit_index_overwrites() -> Result<()> {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("decode_corpus");
        let index = root.path().join("decode_corpus.cairo");
        fs::create_dir(&out).unwrap();
        fs::write(&index, "stale contents").unwrap();
        fs::write(out.join("b.cairo"), "").unwrap();
        fs::write(out.join("a.cairo"), "").unwrap();

        let modules = emit_index(&out, &index, &CairoTarget::default())?;

        assert_eq!(modules, vec!["a", "b"]);
        assert_eq!(
            fs::read_to_string(&index).unwrap(),
            "// auto-generated file\n\nmod a;\nmod b;\n"
        );
        Ok(())
    }
}
