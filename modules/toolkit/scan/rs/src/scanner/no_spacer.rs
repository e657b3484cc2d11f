use derive_getters::Getters;
use derive_more::Constructor;
use eyre::Result;

use invrep_core_rs::num::PrimUInt;

use super::{scan_with_gap, Scanner};
use crate::cache::ReverseComplementCache;
use crate::config::Config;
use crate::counts::CountMap;

/// Inverted repeats with adjacent arms, i.e. perfect palindromes of even length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Constructor, Getters)]
pub struct NoSpacer {
    min_half_length: usize,
}

impl From<&Config> for NoSpacer {
    fn from(config: &Config) -> Self {
        Self::new(*config.min_half_length())
    }
}

impl Scanner for NoSpacer {
    fn scan<Cnts: PrimUInt>(
        &self,
        chunk: &[u8],
        cache: &mut ReverseComplementCache,
        into: &mut CountMap<Cnts>,
    ) -> Result<()> {
        let max_half_length = chunk.len() / 2;
        scan_with_gap(
            chunk,
            self.min_half_length..=max_half_length,
            0,
            cache,
            into,
        )
    }
}
