use derive_more::{Display, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error)]
pub enum ScanError {
    /// The sequence contains a symbol outside the configured alphabet.
    /// Position is absolute, i.e. relative to the start of the full sequence.
    #[display(
        "invalid nucleotide symbol {:?} at position {position} (chunk {chunk})",
        *symbol as char
    )]
    InvalidSymbol {
        chunk: usize,
        position: usize,
        symbol: u8,
    },
    /// One or more chunk scans failed, the batch was aborted.
    #[display("{failed} of {total} chunk scans failed, results were discarded")]
    TaskFailure { failed: usize, total: usize },
}
