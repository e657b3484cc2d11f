use derive_getters::{Dissolve, Getters};
use derive_more::Into;
use eyre::{ensure, Result};

/// A single FASTA record:
/// - The ID is a non-empty UTF-8 string without newline characters.
/// - The sequence is non-empty and contains only ASCII letters.
///
/// Letters are kept as-is, the record doesn't interpret them as nucleotides.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Dissolve, Getters, Into)]
pub struct Record {
    id: String,
    seq: Vec<u8>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            id: "Default ID".to_string(),
            seq: b"ACGT".to_vec(),
        }
    }
}

impl TryFrom<(&str, &str)> for Record {
    type Error = eyre::Report;

    fn try_from(value: (&str, &str)) -> Result<Self> {
        Self::new(value.0.to_string(), value.1.as_bytes().to_vec())
    }
}

impl Record {
    pub fn new(id: String, seq: Vec<u8>) -> Result<Self> {
        Self::validate(&id, &seq)?;
        Ok(Self { id, seq })
    }

    pub fn validate(id: &str, seq: &[u8]) -> Result<()> {
        ensure!(!id.is_empty(), "FASTA ID cannot be empty");
        ensure!(
            !id.contains(['\n', '\r']),
            "Newline characters are not allowed in the FASTA ID: {id}"
        );
        ensure!(!seq.is_empty(), "FASTA sequence cannot be empty (ID: {id})");
        if let Some(i) = seq.iter().position(|x| !x.is_ascii_alphabetic()) {
            eyre::bail!(
                "Non-alphabetic character {:?} at index {i} of the FASTA record {id}",
                seq[i] as char
            );
        }
        Ok(())
    }

    /// Buffers for in-place parsing. The caller must validate the record afterward.
    pub(super) fn buffers(&mut self) -> (&mut String, &mut Vec<u8>) {
        (&mut self.id, &mut self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() -> Result<()> {
        for (id, seq) in [
            ("chr1", "ACGTACGT"),
            ("id with spaces ", "acgtn"),
            ("gene|42|coding", "N"),
        ] {
            let record: Record = (id, seq).try_into()?;
            assert_eq!(record.id(), id);
            assert_eq!(record.seq(), seq.as_bytes());
        }
        Ok(())
    }

    #[test]
    fn test_invalid_records() {
        for (id, seq) in [
            ("", "ACGT"),
            ("id\n", "ACGT"),
            ("id\r", "ACGT"),
            ("id", ""),
            ("id", "ACGT1"),
            ("id", "AC GT"),
            ("id", "ACGT\n"),
        ] {
            let record: Result<Record> = (id, seq).try_into();
            assert!(record.is_err(), "Record: {:?}", record);
        }
    }
}
