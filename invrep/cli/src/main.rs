use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use rayon::ThreadPoolBuilder;

use invrep_core_rs::nucleotide::Alphabet;
use invrep_core_rs::parallelism;
use invrep_io_rs::compression::{decode, encode};
use invrep_io_rs::fasta;
use invrep_scan_rs::report::{self, Order, Parsed};
use invrep_scan_rs::stats::Distribution;
use invrep_scan_rs::{Config, Engine};

#[derive(Parser)]
#[command(name = "invrep")]
#[command(
    about = "Exhaustive parallel search for inverted repeats in nucleotide sequences",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Increase logging verbosity (-v = debug, -vv = trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count inverted repeats in the concatenated sequence of FASTA records
    Scan(ScanArgs),

    /// Find repeats of a report that are unusually abundant or rare relative to background reports
    Compare(CompareArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Input FASTA file, optionally gzip/bgzf compressed
    #[arg(short = 'i', long, value_name = "FASTA")]
    input: PathBuf,

    /// Number of leading records to concatenate (default: all)
    #[arg(short = 'n', long, value_name = "INT")]
    records: Option<usize>,

    /// Output report, compressed if it ends with .gz (default: stdout)
    #[arg(short = 'o', long, value_name = "REPORT")]
    output: Option<PathBuf>,

    /// Shortest arm to report
    #[arg(long, value_name = "INT", default_value_t = *Config::DEFAULT.min_half_length())]
    min_half_length: usize,

    /// Shortest spacer between arms
    #[arg(long, value_name = "INT", default_value_t = *Config::DEFAULT.min_spacer())]
    min_spacer: usize,

    /// Longest spacer between arms
    #[arg(long, value_name = "INT", default_value_t = *Config::DEFAULT.max_spacer())]
    max_spacer: usize,

    /// Number of chunks scanned in parallel. Repeats crossing chunk boundaries are not counted.
    /// Zero or negative values are resolved against the available cores (-1 = all)
    #[arg(
        short = 'w',
        long,
        value_name = "INT",
        default_value_t = *Config::DEFAULT.num_workers() as isize,
        allow_negative_numbers = true
    )]
    workers: isize,

    /// Order of report entries
    #[arg(
        long,
        default_value = "key",
        value_parser = PossibleValuesParser::new(["key", "count", "unordered"])
    )]
    order: String,

    /// Accepted nucleotide symbols
    #[arg(
        long,
        default_value = "dna",
        value_parser = PossibleValuesParser::new(["dna", "iupac"])
    )]
    alphabet: String,
}

#[derive(Args)]
struct CompareArgs {
    /// Report of the sequence under study
    #[arg(short = 'r', long, value_name = "REPORT")]
    reference: PathBuf,

    /// Name of the reference used in the output headers
    #[arg(short = 'l', long, value_name = "LABEL")]
    label: String,

    /// Reports of background (e.g. shuffled) sequences
    #[arg(short = 'b', long, value_name = "REPORT", required = true, num_args = 1..)]
    background: Vec<PathBuf>,

    /// Width of the expected interval in standard deviations
    #[arg(short = 's', long, value_name = "FLOAT", default_value_t = Distribution::DEFAULT_SIGMAS)]
    sigmas: f64,

    /// Output file, compressed if it ends with .gz (default: stdout)
    #[arg(short = 'o', long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Info,
        (false, 1) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

// Run the closure against the output file (compression inferred from its name) or stdout
fn with_output(
    output: Option<&Path>,
    write: impl FnOnce(&mut dyn Write) -> Result<()>,
) -> Result<()> {
    match output {
        Some(path) => {
            let mut stream = encode::infer_from_path(path)
                .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
            write(&mut stream)?;
            stream.finish()?;
            log::info!("Results written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write(&mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

// Positive requests are the number of chunks as is, independent of the machine
fn resolve_chunks(requested: isize) -> Result<usize> {
    match usize::try_from(requested) {
        Ok(chunks) if chunks > 0 => Ok(chunks),
        _ => Ok(parallelism::available(requested)?.get()),
    }
}

fn scan(args: ScanArgs) -> Result<()> {
    let chunks = resolve_chunks(args.workers)?;
    let threads = chunks.min(parallelism::available(-1)?.get());
    log::info!("Scanning in {chunks} chunks using {threads} threads");

    let config = Config::builder()
        .with_min_half_length(args.min_half_length)
        .with_spacers(args.min_spacer, args.max_spacer)
        .with_num_workers(chunks)
        .with_alphabet(Alphabet::from_str(&args.alphabet)?)
        .build()?;
    let order = Order::from_str(&args.order)?;

    let (sequence, records) = fasta::load(&args.input, args.records)?.dissolve();
    log::info!("DNA sequence length: {} ({} records)", sequence.len(), records);

    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    let scan = Engine::builder()
        .with_config(config)
        .set_thread_pool(pool)
        .build()
        .run::<u64>(&sequence)?;
    log::info!(
        "Found {} distinct repeats with no spacer and {} distinct repeats with spacer",
        scan.no_spacer().len(),
        scan.spacer().len()
    );

    with_output(args.output.as_deref(), |mut writer| {
        report::write(&scan, &mut writer, order)
    })
}

fn read_report(path: &Path) -> Result<Parsed<u64>> {
    let stream = decode::infer_from_path(path)?;
    report::parse(BufReader::new(stream))
        .wrap_err_with(|| format!("Failed to parse report {}", path.display()))
}

fn log_distribution(name: &str, distribution: &Distribution) {
    log::info!(
        "{name}: {} repeats, mean count {:.3}, standard deviation {:.3}, limits [{:.3}, {:.3}]",
        distribution.samples(),
        distribution.mean(),
        distribution.sd(),
        distribution.lower(),
        distribution.upper()
    );
}

fn compare(args: CompareArgs) -> Result<()> {
    let mut background = Vec::new();
    for path in &args.background {
        let parsed = read_report(path)?;
        background.extend(parsed.entries().map(|(_, count)| *count));
    }
    let background = Distribution::new(background).with_sigmas(args.sigmas)?;
    log_distribution("Background", &background);

    let reference = read_report(&args.reference)?;
    let summary = Distribution::new(reference.entries().map(|(_, count)| *count))
        .with_sigmas(args.sigmas)?;
    log_distribution(&args.label, &summary);

    let significance = background.classify(reference.entries());
    log::info!(
        "{}: {} repeats above and {} repeats below the background limits",
        args.label,
        significance.abundant().len(),
        significance.rare().len()
    );

    with_output(args.output.as_deref(), |mut writer| {
        report::write_significance(&significance, &args.label, &mut writer)
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Scan(args) => scan(args),
        Commands::Compare(args) => compare(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:?}", err);
            ExitCode::FAILURE
        }
    }
}
