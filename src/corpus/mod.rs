mod filter;
mod reader;

pub use filter::SizeFilter;
pub use reader::{CorpusEntry, CorpusPair, CorpusReader};
