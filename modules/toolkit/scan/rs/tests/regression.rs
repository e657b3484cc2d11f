use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use eyre::{ensure, eyre, Result};
use rayon::ThreadPoolBuilder;

use invrep_core_rs::nucleotide::Alphabet;
use invrep_core_rs::parallelism;
use invrep_io_rs::fasta;
use invrep_scan_rs::report::{self, Order};
use invrep_scan_rs::{Config, CountMap, Engine, NoSpacer, ReverseComplementCache, Scanner, Spacer};

const THREADS: isize = -1;
const RECORDS: usize = 3;
const WORKERS: usize = 3;

pub fn get_resource_path(resource: impl AsRef<Path>) -> Result<PathBuf> {
    let resource = resource.as_ref();
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|x| x.join("resources"))
        .map(|x| x.join(resource))
        .ok_or_else(|| {
            eyre!(
                "Failed to locate requested resource: {}",
                resource.display()
            )
        })?;
    ensure!(
        path.exists(),
        "Requested resource does not exist: {}",
        path.display()
    );
    Ok(path)
}

fn config(num_workers: usize) -> Result<Config> {
    Config::builder()
        .with_min_half_length(3)
        .with_spacers(1, 6)
        .with_num_workers(num_workers)
        .build()
}

fn engine(num_workers: usize) -> Result<Engine> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(parallelism::available(THREADS)?.get())
        .use_current_thread()
        .build()?;
    Ok(Engine::builder()
        .with_config(config(num_workers)?)
        .set_thread_pool(pool)
        .build())
}

fn load(resource: &str, limit: Option<usize>) -> Result<Vec<u8>> {
    let path = get_resource_path(format!("regression-tests/{resource}"))?;
    Ok(fasta::load(path, limit)?.dissolve().0)
}

#[test]
fn regression() -> Result<()> {
    let sequence = load("sequences.fa", Some(RECORDS))?;
    ensure!(sequence.len() == 341, "Unexpected sequence length: {}", sequence.len());

    let scan = engine(WORKERS)?.run::<u64>(&sequence)?;
    ensure!(scan.summaries().len() == WORKERS, "Every chunk must be summarized");

    let mut rendered = Vec::new();
    report::write(&scan, &mut rendered, Order::Key)?;

    let expected = std::fs::read_to_string(get_resource_path(
        "regression-tests/expected-report.txt",
    )?)?;
    ensure!(
        String::from_utf8(rendered)? == expected,
        "Scan report doesn't match the expected one"
    );

    let parsed = report::parse::<u64>(BufReader::new(File::open(get_resource_path(
        "regression-tests/expected-report.txt",
    )?)?))?;
    ensure!(parsed.no_spacer() == scan.no_spacer(), "Parsed no-spacer counts differ");
    ensure!(parsed.spacer() == scan.spacer(), "Parsed spacer counts differ");
    Ok(())
}

#[test]
fn compressed_input() -> Result<()> {
    for limit in [None, Some(1), Some(RECORDS), Some(100)] {
        let plain = load("sequences.fa", limit)?;
        let gzipped = load("sequences.fa.gz", limit)?;
        ensure!(plain == gzipped, "Compressed input differs (limit: {limit:?})");
        ensure!(
            plain.iter().all(|x| Alphabet::Dna.contains(*x)),
            "Loaded sequence must be upper-cased DNA"
        );
    }
    Ok(())
}

#[test]
fn single_worker_matches_whole_sequence_scan() -> Result<()> {
    let sequence = load("sequences.fa", None)?;
    let scan = engine(1)?.run::<u32>(&sequence)?;

    let config = config(1)?;
    let mut cache = ReverseComplementCache::new(*config.alphabet());
    let mut no_spacer = CountMap::<u32>::new();
    NoSpacer::from(&config).scan(&sequence, &mut cache, &mut no_spacer)?;
    let mut spacer = CountMap::<u32>::new();
    Spacer::from(&config).scan(&sequence, &mut cache, &mut spacer)?;

    ensure!(*scan.no_spacer() == no_spacer, "No-spacer counts differ");
    ensure!(*scan.spacer() == spacer, "Spacer counts differ");
    Ok(())
}

#[test]
fn worker_count_only_affects_boundaries() -> Result<()> {
    let sequence = load("sequences.fa", None)?;
    let whole = engine(1)?.run::<u64>(&sequence)?;

    for workers in [2, 5, 16] {
        let chunked = engine(workers)?.run::<u64>(&sequence)?;
        for (chunked, whole) in [
            (chunked.no_spacer(), whole.no_spacer()),
            (chunked.spacer(), whole.spacer()),
        ] {
            // Repeats crossing chunk boundaries are lost, nothing is ever gained
            for (key, count) in chunked.iter() {
                ensure!(*count <= whole.get(key), "{key} is over-counted");
            }
            ensure!(chunked.total() <= whole.total(), "Chunked scan is over-counted");
        }

        let again = engine(workers)?.run::<u64>(&sequence)?;
        ensure!(again.no_spacer() == chunked.no_spacer(), "Scan is not deterministic");
        ensure!(again.spacer() == chunked.spacer(), "Scan is not deterministic");
    }
    Ok(())
}
