use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

/// Contiguous [start, end) slice of the sequence processed by a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, Dissolve)]
pub struct Chunk {
    index: usize,
    start: usize,
    end: usize,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn slice<'a>(&self, sequence: &'a [u8]) -> &'a [u8] {
        &sequence[self.range()]
    }
}

/// Split a sequence of `length` symbols into `chunks` contiguous, non-overlapping slices of
/// `length / chunks` symbols each. The last slice absorbs the remainder.
///
/// Repeats crossing a boundary between slices are not visible to any of them.
pub fn partition(length: usize, chunks: usize) -> Result<Vec<Chunk>> {
    ensure!(chunks >= 1, "Sequence must be split into at least one chunk");

    let size = length / chunks;
    let result = (0..chunks)
        .map(|index| Chunk {
            index,
            start: index * size,
            end: if index + 1 == chunks {
                length
            } else {
                (index + 1) * size
            },
        })
        .collect();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition() -> Result<()> {
        for (length, chunks, expected) in [
            (0, 1, vec![(0, 0)]),
            (10, 1, vec![(0, 10)]),
            (10, 2, vec![(0, 5), (5, 10)]),
            (10, 3, vec![(0, 3), (3, 6), (6, 10)]),
            (11, 4, vec![(0, 2), (2, 4), (4, 6), (6, 11)]),
            (3, 4, vec![(0, 0), (0, 0), (0, 0), (0, 3)]),
        ] {
            let partitions = partition(length, chunks)?;
            let bounds = partitions
                .iter()
                .map(|x| (*x.start(), *x.end()))
                .collect::<Vec<_>>();
            assert_eq!(bounds, expected, "{length} / {chunks}");

            for (i, chunk) in partitions.iter().enumerate() {
                assert_eq!(*chunk.index(), i);
            }
        }
        Ok(())
    }

    #[test]
    fn test_union_is_the_whole_sequence() -> Result<()> {
        let sequence = b"ACGTACGTTTGCAAAC";
        for chunks in 1..=20 {
            let partitions = partition(sequence.len(), chunks)?;
            assert_eq!(partitions.len(), chunks);

            let joined = partitions
                .iter()
                .flat_map(|x| x.slice(sequence).iter().copied())
                .collect::<Vec<_>>();
            assert_eq!(joined, sequence);
            assert_eq!(partitions.iter().map(|x| x.len()).sum::<usize>(), sequence.len());
        }
        Ok(())
    }

    #[test]
    fn test_zero_chunks() {
        assert!(partition(10, 0).is_err());
    }
}
