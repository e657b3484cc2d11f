use std::ops::RangeInclusive;

use derive_getters::Getters;
use eyre::Result;

use invrep_core_rs::num::PrimUInt;

use super::{scan_with_gap, Scanner};
use crate::cache::ReverseComplementCache;
use crate::config::Config;
use crate::counts::CountMap;

/// Inverted repeats with arms separated by a spacer of bounded length (hairpins / stem-loops).
/// The same motif found with different spacer lengths is counted under a single key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Spacer {
    min_half_length: usize,
    spacers: RangeInclusive<usize>,
}

impl Spacer {
    pub fn new(min_half_length: usize, min_spacer: usize, max_spacer: usize) -> Self {
        Self {
            min_half_length,
            spacers: min_spacer..=max_spacer,
        }
    }
}

impl From<&Config> for Spacer {
    fn from(config: &Config) -> Self {
        Self::new(
            *config.min_half_length(),
            *config.min_spacer(),
            *config.max_spacer(),
        )
    }
}

impl Scanner for Spacer {
    fn scan<Cnts: PrimUInt>(
        &self,
        chunk: &[u8],
        cache: &mut ReverseComplementCache,
        into: &mut CountMap<Cnts>,
    ) -> Result<()> {
        for spacer in self.spacers.clone() {
            // Chunk can't fit even the spacer itself
            let Some(rest) = chunk.len().checked_sub(spacer) else {
                break;
            };
            scan_with_gap(
                chunk,
                self.min_half_length..=rest / 2,
                spacer,
                cache,
                into,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repeats::RepeatKey;
    use crate::scanner::testing::{naive, random_dna};
    use invrep_core_rs::nucleotide::Alphabet;

    fn scan(seq: &str, scanner: Spacer) -> CountMap<u64> {
        let mut cache = ReverseComplementCache::new(Alphabet::Dna);
        let mut counts = CountMap::new();
        scanner
            .scan(seq.as_bytes(), &mut cache, &mut counts)
            .unwrap();
        counts
    }

    fn key(first: &str, second: &str) -> RepeatKey {
        RepeatKey::new(first.into(), second.into(), Alphabet::Dna).unwrap()
    }

    #[test]
    fn test_rejected_candidates() {
        // Candidates: AC|G|TA and CG|T|AA, neither is complementary
        assert!(scan("ACGTAA", Spacer::new(2, 1, 1)).is_empty());
    }

    #[test]
    fn test_hairpin() {
        // GAAC + TTT loop + GTTC
        let counts = scan("GAACTTTGTTC", Spacer::new(4, 3, 3));
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&key("GAAC", "GTTC")), 1);

        // The same stem is visible with a shorter arm and a longer spacer
        let counts = scan("GAACTTTGTTC", Spacer::new(3, 1, 5));
        assert_eq!(counts.get(&key("GAAC", "GTTC")), 1);
        assert_eq!(counts.get(&key("AAC", "GTT")), 1);
    }

    #[test]
    fn test_spacer_bounds() {
        // AC and GT separated by exactly 2 symbols
        let seq = "ACTTGT";
        assert!(scan(seq, Spacer::new(2, 1, 1)).is_empty());
        assert!(scan(seq, Spacer::new(2, 3, 4)).is_empty());
        assert_eq!(scan(seq, Spacer::new(2, 2, 2)).get(&key("AC", "GT")), 1);
        assert_eq!(scan(seq, Spacer::new(2, 1, 10)).get(&key("AC", "GT")), 1);
    }

    #[test]
    fn test_short_chunks() {
        for seq in ["", "A", "ACG", "ACGTACG"] {
            assert!(scan(seq, Spacer::new(4, 1, 10)).is_empty(), "{seq}");
        }
        // Spacers longer than the chunk
        assert!(scan("AT", Spacer::new(1, 5, 10)).is_empty());
    }

    #[test]
    fn test_matches_naive_scan() {
        for seed in 0..12 {
            let seq = random_dna(seed + 100, 48 + seed as usize * 5);
            for (min_half_length, min_spacer, max_spacer) in [(1, 1, 1), (2, 1, 10), (4, 3, 7)] {
                let mut cache = ReverseComplementCache::new(Alphabet::Dna);
                let mut counts = CountMap::<u64>::new();
                Spacer::new(min_half_length, min_spacer, max_spacer)
                    .scan(&seq, &mut cache, &mut counts)
                    .unwrap();

                let gaps = (min_spacer..=max_spacer).collect::<Vec<_>>();
                assert_eq!(counts, naive(&seq, min_half_length, &gaps));
                for (key, _) in counts.iter() {
                    assert!(key.len() >= min_half_length);
                    assert_eq!(
                        Alphabet::Dna.reverse_complement(key.first()).unwrap(),
                        *key.second()
                    );
                }
            }
        }
    }
}
