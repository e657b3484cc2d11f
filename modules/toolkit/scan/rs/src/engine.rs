use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use eyre::Result;
use rayon::{ThreadPool, ThreadPoolBuilder};

use invrep_core_rs::num::PrimUInt;

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::error::ScanError;
use crate::partition::partition;
use crate::result::{ChunkCounts, Scan};
use crate::worker::Worker;

#[derive(Default)]
pub struct EngineBuilder {
    config: Option<Config>,
    thread_pool: Option<ThreadPool>,
}

impl EngineBuilder {
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Run scans inside the given pool instead of a dedicated one with `num_workers` threads.
    pub fn set_thread_pool(mut self, thread_pool: ThreadPool) -> Self {
        self.thread_pool = Some(thread_pool);
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            config: self.config.unwrap_or_default(),
            thread_pool: self.thread_pool,
        }
    }
}

/// Splits a sequence into `num_workers` chunks and scans them in parallel, one task per chunk.
pub struct Engine {
    config: Config,
    thread_pool: Option<ThreadPool>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan the sequence and merge per-chunk counts into global ones.
    pub fn run<Cnts: PrimUInt>(&mut self, sequence: &[u8]) -> Result<Scan<Cnts>> {
        self.run_chunks(sequence).and_then(aggregate)
    }

    /// Scan every chunk of the sequence. Results are ordered by the chunk index.
    ///
    /// If any chunk fails, the whole batch fails: no partial results are returned. The error
    /// of the lowest failed chunk is reported, wrapped into [ScanError::TaskFailure].
    /// Symbols are validated in every chunk even after a failure, so invalid input is always
    /// reported from the lowest invalid chunk.
    pub fn run_chunks<Cnts: PrimUInt>(
        &mut self,
        sequence: &[u8],
    ) -> Result<Vec<ChunkCounts<Cnts>>> {
        match self.thread_pool.take() {
            Some(pool) => {
                let result = pool.install(|| self._run(sequence));
                self.thread_pool = Some(pool);
                result
            }
            None => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(*self.config.num_workers())
                    .build()?;
                pool.install(|| self._run(sequence))
            }
        }
    }

    fn _run<Cnts: PrimUInt>(&self, sequence: &[u8]) -> Result<Vec<ChunkCounts<Cnts>>> {
        let config = &self.config;
        let chunks = partition(sequence.len(), *config.num_workers())?;
        log::info!(
            "Scanning {} symbols in {} chunks (min half length: {}, spacers: {}..={}, {})",
            sequence.len(),
            chunks.len(),
            config.min_half_length(),
            config.min_spacer(),
            config.max_spacer(),
            config.alphabet()
        );
        if *config.num_workers() > sequence.len() {
            log::warn!(
                "More workers ({}) than symbols in the sequence ({}), some chunks will be empty",
                config.num_workers(),
                sequence.len()
            );
        }

        let has_failed = AtomicBool::new(false);
        let results = Mutex::new(Vec::with_capacity(chunks.len()));
        let errors = Mutex::new(Vec::new());
        let (has_failed_ref, results_ref, errors_ref) = (&has_failed, &results, &errors);

        rayon::scope(|s| {
            for chunk in &chunks {
                s.spawn(move |_| {
                    let worker = Worker::new(config);
                    // Scanning is skipped once any task has failed, validation is not
                    let result = worker.validate(sequence, chunk).and_then(|()| {
                        if has_failed_ref.load(Ordering::Relaxed) {
                            Ok(None)
                        } else {
                            worker.process::<Cnts>(sequence, chunk).map(Some)
                        }
                    });

                    match result {
                        Ok(Some(counts)) => results_ref
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(counts),
                        Ok(None) => {}
                        Err(err) => {
                            has_failed_ref.store(true, Ordering::Relaxed);
                            log::error!("Scan of chunk {} failed: {:?}", chunk.index(), err);
                            errors_ref
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .push((*chunk.index(), err));
                        }
                    }
                });
            }
        });

        let mut errors = errors.into_inner().unwrap_or_else(PoisonError::into_inner);
        if has_failed.into_inner() {
            let failed = errors.len();
            errors.sort_by_key(|x| x.0);
            let failure = ScanError::TaskFailure {
                failed,
                total: chunks.len(),
            };
            return match errors.into_iter().next() {
                Some((_, err)) => Err(err.wrap_err(failure)),
                None => Err(failure.into()),
            };
        }

        let mut results = results.into_inner().unwrap_or_else(PoisonError::into_inner);
        results.sort_by_key(|x| *x.summary().chunk().index());
        Ok(results)
    }
}
