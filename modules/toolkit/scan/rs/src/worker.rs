use std::time::Instant;

use eyre::Result;

use invrep_core_rs::num::PrimUInt;

use crate::cache::ReverseComplementCache;
use crate::config::Config;
use crate::counts::CountMap;
use crate::error::ScanError;
use crate::partition::Chunk;
use crate::result::{ChunkCounts, Summary};
use crate::scanner::{NoSpacer, Scanner, Spacer};

/// Scans a single chunk with both scanners. Workers are created for a task and consumed by it,
/// so the reverse complement cache is never shared between chunks.
#[derive(Debug, Clone)]
pub struct Worker {
    no_spacer: NoSpacer,
    spacer: Spacer,
    cache: ReverseComplementCache,
}

impl Worker {
    pub fn new(config: &Config) -> Self {
        Self {
            no_spacer: NoSpacer::from(config),
            spacer: Spacer::from(config),
            cache: ReverseComplementCache::new(*config.alphabet()),
        }
    }

    /// Ensure that every symbol of the chunk belongs to the alphabet. Positions in the error
    /// are absolute.
    pub fn validate(&self, sequence: &[u8], chunk: &Chunk) -> Result<()> {
        self.cache
            .alphabet()
            .validate(chunk.slice(sequence))
            .map_err(|err| ScanError::InvalidSymbol {
                chunk: *chunk.index(),
                position: chunk.start() + err.position,
                symbol: err.symbol,
            })?;
        Ok(())
    }

    pub fn process<Cnts: PrimUInt>(
        mut self,
        sequence: &[u8],
        chunk: &Chunk,
    ) -> Result<ChunkCounts<Cnts>> {
        let launched_at = Instant::now();

        // Reject the whole chunk upfront instead of failing on the first mismatching arm
        self.validate(sequence, chunk)?;
        let slice = chunk.slice(sequence);

        let mut no_spacer = CountMap::new();
        self.no_spacer.scan(slice, &mut self.cache, &mut no_spacer)?;

        let mut spacer = CountMap::new();
        self.spacer.scan(slice, &mut self.cache, &mut spacer)?;

        let summary = Summary::new(
            *chunk,
            launched_at.elapsed().as_secs_f64(),
            no_spacer.len(),
            spacer.len(),
            self.cache.len(),
        );
        log::debug!(
            "Chunk {} [{}, {}) scanned in {:.3}s: {} + {} keys, {} cached arms",
            chunk.index(),
            chunk.start(),
            chunk.end(),
            summary.time_s(),
            summary.no_spacer_keys(),
            summary.spacer_keys(),
            summary.cached_arms()
        );

        Ok(ChunkCounts::new(no_spacer, spacer, summary))
    }
}
