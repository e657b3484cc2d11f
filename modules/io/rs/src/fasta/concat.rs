use std::path::Path;

use derive_getters::{Dissolve, Getters};
use eyre::{Result, WrapErr};

use super::reader::Reader;
use super::record::Record;
use crate::compression::decode;
use crate::traits::ReadRecord;

/// A flat nucleotide sequence assembled from consecutive FASTA records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Dissolve, Getters)]
pub struct Loaded {
    sequence: Vec<u8>,
    records: usize,
}

/// Concatenate sequences of the first `limit` records (all records if `None`).
/// Symbols are upper-cased, soft-masked regions are treated as regular sequence.
pub fn concatenate<R>(reader: &mut R, limit: Option<usize>) -> Result<Loaded>
where
    R: ReadRecord<Record = Record> + ?Sized,
{
    let mut loaded = Loaded::default();
    let mut record = Record::default();

    while limit.is_none_or(|limit| loaded.records < limit) {
        if !reader.read_record(&mut record)? {
            break;
        }
        loaded
            .sequence
            .extend(record.seq().iter().map(u8::to_ascii_uppercase));
        loaded.records += 1;
    }

    if let Some(limit) = limit {
        if loaded.records < limit {
            log::warn!(
                "Requested {limit} FASTA records, but only {} were available",
                loaded.records
            );
        }
    }
    log::info!(
        "Concatenated {} FASTA records, total sequence length: {}",
        loaded.records,
        loaded.sequence.len()
    );

    Ok(loaded)
}

/// Open a (possibly compressed) FASTA file and concatenate its first `limit` records.
pub fn load(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Loaded> {
    let path = path.as_ref();
    let config = decode::Config::infer(path)?;
    let mut reader = Reader::from_path(path, &config)?;
    concatenate(&mut *reader, limit)
        .wrap_err_with(|| format!("Failed to load FASTA records from {}", path.display()))
}
