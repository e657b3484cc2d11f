use super::record::Record;
use crate::compression::decode;
use crate::traits::ReadRecord;
use eyre::{ensure, Result};
use std::io::BufRead;
use std::path::Path;

/// A strict FASTA reader. Tolerates:
/// - Windows line endings (CR-LF)
/// - Empty lines inside and between records
///
/// Fails on:
/// - Any content before the first '>'
/// - Header lines that are not terminated by a newline
/// - Records with an empty ID or an empty sequence
/// - Non-alphabetic characters inside sequence lines
#[derive(Debug)]
pub struct Reader<R> {
    reader: R,
}

impl Reader<()> {
    /// Open a FASTA file with the given compression settings.
    pub fn from_path(
        path: impl AsRef<Path>,
        decode: &decode::Config,
    ) -> Result<Box<dyn ReadRecord<Record = Record> + Send + Sync + 'static>> {
        let file = std::fs::File::open(path.as_ref())?;
        let stream = decode::Stream::new(file, decode)?;
        Ok(Box::new(Reader::new(std::io::BufReader::new(stream))?))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let buffer = reader.fill_buf()?;
        ensure!(
            buffer.first().map(|x| *x == b'>').unwrap_or(true),
            "Expected '>' at the start of the FASTA file"
        );
        Ok(Self { reader })
    }

    fn read_header(&mut self, id: &mut String) -> Result<()> {
        id.clear();
        let read = self.reader.read_line(id)?;
        ensure!(read > 0, "Unexpected EOF after '>'");
        ensure!(
            id.ends_with('\n'),
            "FASTA ID line is not terminated with a newline: {id}"
        );
        id.pop();
        if id.ends_with('\r') {
            id.pop();
        }
        Ok(())
    }

    fn read_sequence(&mut self, seq: &mut Vec<u8>) -> Result<()> {
        seq.clear();

        // '>' is a record separator only at the beginning of a line
        let mut at_line_start = true;
        loop {
            let buffer = self.reader.fill_buf()?;
            if buffer.is_empty() || (at_line_start && buffer[0] == b'>') {
                break;
            }

            let consumed = match memchr::memchr(b'\n', buffer) {
                Some(pos) => {
                    seq.extend_from_slice(&buffer[..pos]);
                    at_line_start = true;
                    pos + 1
                }
                None => {
                    seq.extend_from_slice(buffer);
                    at_line_start = false;
                    buffer.len()
                }
            };
            self.reader.consume(consumed);

            // Drop the CR of CR-LF line endings
            if at_line_start && seq.last() == Some(&b'\r') {
                seq.pop();
            }
        }
        Ok(())
    }

    fn read_parts(&mut self, record: &mut Record) -> Result<bool> {
        let buffer = self.reader.fill_buf()?;
        if buffer.is_empty() {
            return Ok(false);
        }
        ensure!(
            buffer[0] == b'>',
            "Expected '>' at the start of the FASTA record"
        );
        self.reader.consume(1);

        let (id, seq) = record.buffers();
        self.read_header(id)?;
        self.read_sequence(seq)?;
        Record::validate(id, seq)?;

        Ok(true)
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Record;

    /// On failure the buffer is left in an unspecified state, but can be reused for the next read.
    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        self.read_parts(into)
    }

    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize> {
        let mut total = 0;
        loop {
            let mut record = Record::default();
            if !self.read_parts(&mut record)? {
                return Ok(total);
            }
            into.push(record);
            total += 1;
        }
    }
}
