use std::ops::RangeInclusive;

use eyre::Result;
use impl_tools::autoimpl;

use invrep_core_rs::num::PrimUInt;

use crate::cache::ReverseComplementCache;
use crate::counts::CountMap;
use crate::repeats::RepeatKey;

pub use no_spacer::NoSpacer;
pub use spacer::Spacer;

mod no_spacer;
mod spacer;

/// Exhaustive search for inverted repeats inside a single chunk.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait Scanner {
    /// Count every inverted repeat of the chunk into the map. Reverse complements of the
    /// arms are requested from the cache, so it must be private to the current chunk scan.
    ///
    /// Fails on the first arm that contains a symbol outside the cache alphabet
    /// ([InvalidSymbol](invrep_core_rs::nucleotide::InvalidSymbol), position relative to the
    /// chunk start) or when a count doesn't fit into `Cnts`.
    fn scan<Cnts: PrimUInt>(
        &self,
        chunk: &[u8],
        cache: &mut ReverseComplementCache,
        into: &mut CountMap<Cnts>,
    ) -> Result<()>;
}

// Compare s[i, i + L) against s[i + L + gap, i + 2L + gap) for all L in `half_lengths`
// and all offsets that keep both arms inside the chunk.
fn scan_with_gap<Cnts: PrimUInt>(
    chunk: &[u8],
    half_lengths: RangeInclusive<usize>,
    gap: usize,
    cache: &mut ReverseComplementCache,
    into: &mut CountMap<Cnts>,
) -> Result<()> {
    let n = chunk.len();
    for half in half_lengths {
        let span = 2 * half + gap;
        if span > n {
            break;
        }

        for i in 0..=(n - span) {
            let first = &chunk[i..i + half];
            let second = &chunk[i + half + gap..i + span];

            let complement = cache.get(first).map_err(|err| err.shifted(i))?;
            if second == complement {
                into.increment(RepeatKey::new_unchecked(first, second))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use invrep_core_rs::nucleotide::Alphabet;

    use crate::counts::CountMap;
    use crate::repeats::RepeatKey;

    /// Deterministic pseudo-random DNA (xorshift64*).
    pub fn random_dna(seed: u64, len: usize) -> Vec<u8> {
        let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
        (0..len)
            .map(|_| {
                state ^= state >> 12;
                state ^= state << 25;
                state ^= state >> 27;
                b"ACGT"[(state.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 62) as usize]
            })
            .collect()
    }

    /// Straightforward count of inverted repeats without any caching.
    pub fn naive(seq: &[u8], min_half_length: usize, gaps: &[usize]) -> CountMap<u64> {
        let mut counts = CountMap::new();
        for &gap in gaps {
            for half in min_half_length..=seq.len() {
                for i in 0.. {
                    if i + 2 * half + gap > seq.len() {
                        break;
                    }
                    let first = &seq[i..i + half];
                    let second = &seq[i + half + gap..i + 2 * half + gap];
                    if Alphabet::Dna.reverse_complement(first).unwrap() == second {
                        counts
                            .increment(
                                RepeatKey::new(first.to_vec(), second.to_vec(), Alphabet::Dna)
                                    .unwrap(),
                            )
                            .unwrap();
                    }
                }
            }
        }
        counts
    }

    #[test]
    fn test_random_dna_is_deterministic() {
        assert_eq!(random_dna(7, 100), random_dna(7, 100));
        assert_ne!(random_dna(7, 100), random_dna(8, 100));
        assert!(random_dna(1, 1000).iter().all(|x| b"ACGT".contains(x)));
    }
}
