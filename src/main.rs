//! Regenerate the decode corpus tests with the built-in configuration

use anyhow::Context;
use corpus_testgen::{generate, GeneratorConfig};

fn main() -> anyhow::Result<()> {
    let config = GeneratorConfig::default();

    println!(
        "Generating tests for {} files at or below {} bytes...",
        config.compressed_suffix, config.max_size_bytes
    );

    let report = generate(&config).with_context(|| {
        format!(
            "generating tests from {} into {}",
            config.input_dir.display(),
            config.output_dir.display()
        )
    })?;

    for unit in &report.units {
        println!("✓ Generated: {}", unit.path.display());
    }

    println!(
        "\nGenerated {} tests ({} removed, {} over the size limit), aggregator at {}",
        report.units.len(),
        report.removed,
        report.excluded.len(),
        report.index_path.display()
    );
    println!("Done!");
    Ok(())
}
