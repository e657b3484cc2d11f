use std::fmt::Display;

use derive_more::{Display, Error};
use eyre::{bail, Result};

/// A symbol that doesn't belong to the alphabet used to interpret a sequence.
/// The position is relative to the start of the inspected slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error)]
#[display("invalid nucleotide symbol {:?} at position {position}", *symbol as char)]
pub struct InvalidSymbol {
    pub symbol: u8,
    pub position: usize,
}

impl InvalidSymbol {
    /// Same symbol, position moved by `offset` (e.g. from arm-relative to chunk-relative).
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            symbol: self.symbol,
            position: self.position + offset,
        }
    }
}

/// Nucleotide alphabets accepted by the scanners. Only uppercase symbols are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Alphabet {
    /// Canonical DNA: A, C, G, T
    #[default]
    Dna,
    /// DNA with IUPAC ambiguity codes (R, Y, S, W, K, M, B, D, H, V, N)
    Iupac,
}

const fn dna_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    table[b'A' as usize] = b'T';
    table[b'T' as usize] = b'A';
    table[b'C' as usize] = b'G';
    table[b'G' as usize] = b'C';
    table
}

const fn iupac_table() -> [u8; 256] {
    let mut table = dna_table();
    let pairs: [(u8, u8); 7] = [
        (b'R', b'Y'),
        (b'K', b'M'),
        (b'S', b'S'),
        (b'W', b'W'),
        (b'B', b'V'),
        (b'D', b'H'),
        (b'N', b'N'),
    ];
    let mut i = 0;
    while i < pairs.len() {
        let (a, b) = pairs[i];
        table[a as usize] = b;
        table[b as usize] = a;
        i += 1;
    }
    table
}

// Zero marks symbols outside the alphabet
static DNA: [u8; 256] = dna_table();
static IUPAC: [u8; 256] = iupac_table();

impl Alphabet {
    #[inline(always)]
    fn table(&self) -> &'static [u8; 256] {
        match self {
            Alphabet::Dna => &DNA,
            Alphabet::Iupac => &IUPAC,
        }
    }

    /// Base-pairing partner of the symbol, if the symbol belongs to the alphabet.
    #[inline(always)]
    pub fn complement(&self, symbol: u8) -> Option<u8> {
        match self.table()[symbol as usize] {
            0 => None,
            x => Some(x),
        }
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.complement(symbol).is_some()
    }

    /// Ensure that every symbol of the sequence belongs to the alphabet.
    pub fn validate(&self, seq: &[u8]) -> Result<(), InvalidSymbol> {
        let table = self.table();
        match seq.iter().position(|x| table[*x as usize] == 0) {
            Some(position) => Err(InvalidSymbol {
                symbol: seq[position],
                position,
            }),
            None => Ok(()),
        }
    }

    /// Write the reverse complement of `seq` into `into`, replacing its content.
    /// On error the buffer is left in an unspecified state.
    pub fn reverse_complement_into(
        &self,
        seq: &[u8],
        into: &mut Vec<u8>,
    ) -> Result<(), InvalidSymbol> {
        let table = self.table();
        into.clear();
        into.reserve(seq.len());
        for (i, symbol) in seq.iter().enumerate().rev() {
            match table[*symbol as usize] {
                0 => {
                    return Err(InvalidSymbol {
                        symbol: *symbol,
                        position: i,
                    })
                }
                x => into.push(x),
            }
        }
        Ok(())
    }

    pub fn reverse_complement(&self, seq: &[u8]) -> Result<Vec<u8>, InvalidSymbol> {
        let mut result = Vec::with_capacity(seq.len());
        self.reverse_complement_into(seq, &mut result)?;
        Ok(result)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Alphabet::Dna => "dna",
            Alphabet::Iupac => "iupac",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "dna" => Ok(Alphabet::Dna),
            "iupac" => Ok(Alphabet::Iupac),
            _ => bail!("Unknown nucleotide alphabet: {}", s),
        }
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
