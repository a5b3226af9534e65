use crate::corpus::reader::CorpusEntry;
use tracing::debug;

/// Admits corpus entries whose original is at most `max_size_bytes` long
///
/// Oversized entries are excluded, never reported as errors. The compressed
/// size plays no part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    pub max_size_bytes: u64,
}

impl SizeFilter {
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    /// Inclusive threshold check
    pub fn admits(&self, original_len: u64) -> bool {
        original_len <= self.max_size_bytes
    }

    /// Split entries into `(admitted, excluded)`, keeping their order
    pub fn partition(&self, entries: Vec<CorpusEntry>) -> (Vec<CorpusEntry>, Vec<CorpusEntry>) {
        let (admitted, excluded): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|entry| self.admits(entry.original_len));

        for entry in &excluded {
            debug!(
                name = %entry.name,
                size = entry.original_len,
                max = self.max_size_bytes,
                "excluding oversized corpus entry"
            );
        }

        (admitted, excluded)
    }
}
