use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use invrep_core_rs::num::PrimUInt;

use crate::counts::CountMap;
use crate::partition::Chunk;
use crate::repeats::Kind;

/// Processing statistics of a single chunk.
#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct Summary {
    chunk: Chunk,
    // Wall time spent scanning the chunk
    time_s: f64,
    // Distinct keys found by each scanner
    no_spacer_keys: usize,
    spacer_keys: usize,
    // Arms with a cached reverse complement at the end of the scan
    cached_arms: usize,
}

/// Counts produced by one worker for one chunk.
#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct ChunkCounts<Cnts: PrimUInt> {
    no_spacer: CountMap<Cnts>,
    spacer: CountMap<Cnts>,
    summary: Summary,
}

/// Global inverted repeat counts of a sequence.
#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct Scan<Cnts: PrimUInt> {
    no_spacer: CountMap<Cnts>,
    spacer: CountMap<Cnts>,
    // Ordered by the chunk index
    summaries: Vec<Summary>,
}

impl<Cnts: PrimUInt> Scan<Cnts> {
    pub fn counts(&self, kind: Kind) -> &CountMap<Cnts> {
        match kind {
            Kind::NoSpacer => &self.no_spacer,
            Kind::Spacer => &self.spacer,
        }
    }
}
