use std::fmt::{Debug, Display, Formatter};

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use invrep_core_rs::nucleotide::Alphabet;

/// Identity of an inverted repeat motif: the left arm and the right arm, where the right arm
/// is the reverse complement of the left one. Positions and spacers are not part of the key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, Dissolve)]
pub struct RepeatKey {
    first: Vec<u8>,
    second: Vec<u8>,
}

impl RepeatKey {
    pub fn new(first: Vec<u8>, second: Vec<u8>, alphabet: Alphabet) -> Result<Self> {
        ensure!(!first.is_empty(), "Repeat arms must not be empty");
        ensure!(
            first.len() == second.len(),
            "Repeat arms' length must be equal: {} vs {}",
            String::from_utf8_lossy(&first),
            String::from_utf8_lossy(&second)
        );

        let complement = alphabet.reverse_complement(&first)?;
        ensure!(
            complement == second,
            "Second arm must be the reverse complement of the first arm: {} vs {}",
            String::from_utf8_lossy(&first),
            String::from_utf8_lossy(&second)
        );

        Ok(Self { first, second })
    }

    /// The caller guarantees that `second` is the reverse complement of `first`.
    pub(crate) fn new_unchecked(first: &[u8], second: &[u8]) -> Self {
        debug_assert_eq!(first.len(), second.len());
        Self {
            first: first.to_vec(),
            second: second.to_vec(),
        }
    }

    /// Length of a single arm.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

impl Debug for RepeatKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RepeatKey {self}")
    }
}

impl Display for RepeatKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {}",
            String::from_utf8_lossy(&self.first),
            String::from_utf8_lossy(&self.second)
        )
    }
}

/// The two scans performed on every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Arms are adjacent
    NoSpacer,
    /// Arms are separated by a bounded spacer
    Spacer,
}

impl Kind {
    pub fn title(&self) -> &'static str {
        match self {
            Kind::NoSpacer => "Inverted repeats with no spacer",
            Kind::Spacer => "Inverted repeats with spacer",
        }
    }
}
