//! Target languages for generated test units
//!
//! A [`TestTarget`] owns everything language-specific about the output: the
//! file extension, how a unit embeds its byte arrays and calls the external
//! round-trip helper, and how the aggregator references units. The pipeline
//! only ever talks to the trait.

use crate::emit::literal::render_literal_rows;
use serde::{Deserialize, Serialize};

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// auto-generated file";

/// Prefix of every generated test function name
pub const TEST_FN_PREFIX: &str = "test_decode_";

/// Data needed to render one generated unit
#[derive(Debug, Clone, Copy)]
pub struct UnitSource<'a> {
    /// Identifier derived from the corpus file name
    pub unit_name: &'a str,
    pub compressed: &'a [u8],
    pub original: &'a [u8],
}

impl UnitSource<'_> {
    /// Name of the generated test entry point
    pub fn test_fn_name(&self) -> String {
        format!("{}{}", TEST_FN_PREFIX, self.unit_name)
    }
}

/// Language-specific rendering of units and the aggregator
pub trait TestTarget: Send + Sync {
    /// File extension of generated units, without the dot
    fn extension(&self) -> &str;

    /// Render the full source of one generated unit
    fn render_unit(&self, unit: &UnitSource<'_>) -> String;

    /// Render the aggregator referencing `modules` in the given order
    fn render_index(&self, modules: &[String]) -> String;
}

/// Last `::` segment of a path, i.e. the name in scope after `use path;`
fn imported_name(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Module-per-line aggregator shared by both targets
fn render_mod_index(modules: &[String]) -> String {
    let mut lines = vec![GENERATED_HEADER.to_string(), String::new()];
    lines.extend(modules.iter().map(|module| format!("mod {};", module)));
    lines.push(String::new());
    lines.join("\n")
}

/// Cairo output for the `cairo_zstd` decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CairoTarget {
    /// Path of the round-trip assertion helper
    pub round_trip_helper: String,
    /// Trait impl that turns `Span<u8>` into `ByteArray`
    pub byte_conversion: String,
    pub available_gas: u64,
}

impl Default for CairoTarget {
    fn default() -> Self {
        Self {
            round_trip_helper: "cairo_zstd::tests::decoding::_test_decode".to_string(),
            byte_conversion: "cairo_zstd::utils::byte_array::U8SpanIntoByteArray".to_string(),
            available_gas: 200_000_000_000,
        }
    }
}

impl CairoTarget {
    fn render_accessor(name: &str, bytes: &[u8]) -> String {
        let mut out = format!("fn {}() -> ByteArray {{\n    array![\n", name);
        if let Some(rows) = render_literal_rows(bytes, "        ") {
            out.push_str(&rows);
            out.push('\n');
        }
        out.push_str("    ].span().into()\n}\n");
        out
    }
}

impl TestTarget for CairoTarget {
    fn extension(&self) -> &str {
        "cairo"
    }

    fn render_unit(&self, unit: &UnitSource<'_>) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_HEADER);
        out.push_str("\n\n");
        out.push_str(&format!("use {};\n", self.round_trip_helper));
        out.push_str(&format!("use {};\n\n", self.byte_conversion));
        out.push_str(&Self::render_accessor("get_compressed", unit.compressed));
        out.push('\n');
        out.push_str(&Self::render_accessor("get_original", unit.original));
        out.push('\n');
        out.push_str("#[test]\n");
        out.push_str(&format!("#[available_gas({})]\n", self.available_gas));
        out.push_str(&format!("fn {}() {{\n", unit.test_fn_name()));
        out.push_str(&format!(
            "    {}(@get_compressed(), @get_original());\n}}\n",
            imported_name(&self.round_trip_helper)
        ));
        out
    }

    fn render_index(&self, modules: &[String]) -> String {
        render_mod_index(modules)
    }
}

/// Rust output for a decoder crate's own test tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RustTarget {
    /// Path of the round-trip assertion helper, called as `helper(&[u8], &[u8])`
    pub round_trip_helper: String,
    /// Type returned by the accessors; must implement `From<Vec<u8>>`
    pub byte_container: String,
}

impl Default for RustTarget {
    fn default() -> Self {
        Self {
            round_trip_helper: "crate::tests::decoding::assert_round_trip".to_string(),
            byte_container: "Vec<u8>".to_string(),
        }
    }
}

impl RustTarget {
    fn render_accessor(&self, name: &str, bytes: &[u8]) -> String {
        let mut out = format!(
            "fn {}() -> {} {{\n    let bytes: Vec<u8> = vec![\n",
            name, self.byte_container
        );
        if let Some(rows) = render_literal_rows(bytes, "        ") {
            out.push_str(&rows);
            out.push('\n');
        }
        out.push_str("    ];\n    bytes.into()\n}\n");
        out
    }
}

impl TestTarget for RustTarget {
    fn extension(&self) -> &str {
        "rs"
    }

    fn render_unit(&self, unit: &UnitSource<'_>) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_HEADER);
        out.push('\n');
        // Identity `.into()` when the container is Vec<u8>
        out.push_str("#![allow(clippy::useless_conversion)]\n\n");
        out.push_str(&format!("use {};\n\n", self.round_trip_helper));
        out.push_str(&self.render_accessor("get_compressed", unit.compressed));
        out.push('\n');
        out.push_str(&self.render_accessor("get_original", unit.original));
        out.push('\n');
        out.push_str("#[test]\n");
        out.push_str(&format!("fn {}() {{\n", unit.test_fn_name()));
        out.push_str(&format!(
            "    {}(&get_compressed(), &get_original());\n}}\n",
            imported_name(&self.round_trip_helper)
        ));
        out
    }

    fn render_index(&self, modules: &[String]) -> String {
        render_mod_index(modules)
    }
}
