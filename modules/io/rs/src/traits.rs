use eyre::Result;

/// Reads structured records into caller-provided buffers, so allocations can be reused.
pub trait ReadRecord {
    type Record;

    /// Read a single record into the buffer.
    /// Returns `true` if a record was read and `false` if the end of the input was reached.
    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool>;

    /// Read all remaining records, appending them to the vector.
    /// Returns the number of records read.
    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize>;
}
