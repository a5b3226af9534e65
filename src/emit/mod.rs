mod index;
mod literal;
pub mod target;
mod unit;

pub use index::{emit_index, list_unit_modules};
pub use literal::{byte_literals, render_literal_rows, LITERALS_PER_ROW};
pub use target::{CairoTarget, RustTarget, TestTarget, UnitSource, GENERATED_HEADER};
pub use unit::{assign_unit_names, emit_unit, unit_name, GeneratedUnit};
