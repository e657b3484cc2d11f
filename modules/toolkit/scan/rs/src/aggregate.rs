use eyre::Result;

use invrep_core_rs::num::PrimUInt;

use crate::counts::CountMap;
use crate::result::{ChunkCounts, Scan};

/// Sum per-chunk counts into global counts. The order of chunks doesn't affect the result.
/// Fails if a global count doesn't fit into `Cnts`.
pub fn aggregate<Cnts: PrimUInt>(
    chunks: impl IntoIterator<Item = ChunkCounts<Cnts>>,
) -> Result<Scan<Cnts>> {
    let mut no_spacer = CountMap::new();
    let mut spacer = CountMap::new();
    let mut summaries = Vec::new();

    for counts in chunks {
        let (chunk_no_spacer, chunk_spacer, summary) = counts.dissolve();
        no_spacer.merge(chunk_no_spacer)?;
        spacer.merge(chunk_spacer)?;
        summaries.push(summary);
    }
    summaries.sort_by_key(|x| *x.chunk().index());

    Ok(Scan::new(no_spacer, spacer, summaries))
}
