use ahash::HashMap;

use invrep_core_rs::nucleotide::{Alphabet, InvalidSymbol};

/// Memoized reverse complements of arms. Private to a single chunk scan.
#[derive(Debug, Clone, Default)]
pub struct ReverseComplementCache {
    alphabet: Alphabet,
    cache: HashMap<Vec<u8>, Vec<u8>>,
    // Reusable buffer for the computation of new entries
    buffer: Vec<u8>,
}

impl ReverseComplementCache {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            cache: HashMap::default(),
            buffer: Vec::new(),
        }
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Reverse complement of the arm, computed on the first request and cached afterward.
    /// Arms with symbols outside the alphabet are never cached.
    pub fn get(&mut self, arm: &[u8]) -> Result<&[u8], InvalidSymbol> {
        if !self.cache.contains_key(arm) {
            self.alphabet
                .reverse_complement_into(arm, &mut self.buffer)?;
            self.cache.insert(arm.to_vec(), self.buffer.clone());
        }
        Ok(&self.cache[arm])
    }

    /// Number of cached arms.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
