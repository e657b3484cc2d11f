//! Plain-text reports of inverted repeat counts.
//!
//! ```text
//! Inverted repeats with no spacer:
//! Repeat: AC | GT, Count: 1
//!
//! Inverted repeats with spacer:
//! Repeat: GAAC | GTTC, Count: 3
//! ```

use std::fmt::Display;
use std::io::{BufRead, Write};

use derive_getters::{Dissolve, Getters};
use eyre::{bail, eyre, Result, WrapErr};

use invrep_core_rs::nucleotide::Alphabet;
use invrep_core_rs::num::PrimUInt;

use crate::counts::CountMap;
use crate::repeats::{Kind, RepeatKey};
use crate::result::Scan;
use crate::stats::Significance;

/// Order of entries inside each report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// By the first arm, then by the second arm
    #[default]
    Key,
    /// By the descending count, ties are ordered by key
    Count,
    /// Hash map iteration order, differs between runs
    Unordered,
}

impl Order {
    pub fn symbol(&self) -> &'static str {
        match self {
            Order::Key => "key",
            Order::Count => "count",
            Order::Unordered => "unordered",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "key" => Ok(Order::Key),
            "count" => Ok(Order::Count),
            "unordered" => Ok(Order::Unordered),
            _ => bail!("Unknown report order: {}", s),
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

fn write_entries<'a, Cnts: PrimUInt + 'a>(
    entries: impl IntoIterator<Item = (&'a RepeatKey, &'a Cnts)>,
    writer: &mut impl Write,
) -> Result<()> {
    for (key, count) in entries {
        writeln!(writer, "Repeat: {key}, Count: {count}")?;
    }
    Ok(())
}

fn write_section<Cnts: PrimUInt>(
    title: &str,
    counts: &CountMap<Cnts>,
    order: Order,
    writer: &mut impl Write,
) -> Result<()> {
    writeln!(writer, "{title}:")?;
    match order {
        Order::Key => write_entries(counts.sorted_by_key(), writer),
        Order::Count => write_entries(counts.sorted_by_count(), writer),
        Order::Unordered => write_entries(counts.iter(), writer),
    }
}

/// Render both sections of the scan: repeats without a spacer first, then repeats with a spacer.
pub fn write<Cnts: PrimUInt>(
    scan: &Scan<Cnts>,
    writer: &mut impl Write,
    order: Order,
) -> Result<()> {
    write_section(Kind::NoSpacer.title(), scan.no_spacer(), order, writer)?;
    writeln!(writer)?;
    write_section(Kind::Spacer.title(), scan.spacer(), order, writer)?;
    writer.flush()?;
    Ok(())
}

/// Counts restored from a report.
#[derive(Clone, PartialEq, Debug, Default, Dissolve, Getters)]
pub struct Parsed<Cnts: PrimUInt> {
    no_spacer: CountMap<Cnts>,
    spacer: CountMap<Cnts>,
}

impl<Cnts: PrimUInt> Parsed<Cnts> {
    pub fn counts(&self, kind: Kind) -> &CountMap<Cnts> {
        match kind {
            Kind::NoSpacer => &self.no_spacer,
            Kind::Spacer => &self.spacer,
        }
    }

    /// Entries of both sections. A key present in both sections is yielded twice.
    pub fn entries(&self) -> impl Iterator<Item = (&RepeatKey, &Cnts)> {
        self.no_spacer.iter().chain(self.spacer.iter())
    }
}

fn parse_entry<Cnts: PrimUInt>(line: &str) -> Result<(RepeatKey, Cnts)> {
    let (repeat, count) = line
        .strip_prefix("Repeat: ")
        .and_then(|x| x.split_once(", Count: "))
        .ok_or_else(|| eyre!("Expected 'Repeat: <first> | <second>, Count: <n>'"))?;
    let (first, second) = repeat
        .split_once(" | ")
        .ok_or_else(|| eyre!("Repeat arms must be separated by ' | ': {}", repeat))?;
    let count = Cnts::from_str_radix(count.trim(), 10)
        .map_err(|_| eyre!("Invalid repeat count: {}", count))?;

    // IUPAC is a superset of DNA, reports of both alphabets are accepted
    let key = RepeatKey::new(first.into(), second.into(), Alphabet::Iupac)?;
    Ok((key, count))
}

/// Read a report back into counts. Blank lines are skipped, repeated keys within a section
/// are summed.
pub fn parse<Cnts: PrimUInt>(reader: impl BufRead) -> Result<Parsed<Cnts>> {
    let mut parsed = Parsed::default();
    let mut section = None;

    for (ind, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(title) = line.strip_suffix(':') {
            if title == Kind::NoSpacer.title() {
                section = Some(Kind::NoSpacer);
                continue;
            } else if title == Kind::Spacer.title() {
                section = Some(Kind::Spacer);
                continue;
            }
        }

        let Some(kind) = section else {
            bail!("Line {}: repeat entry outside of a report section", ind + 1);
        };
        let (key, count) =
            parse_entry(line).wrap_err_with(|| format!("Line {}: {}", ind + 1, line))?;
        let counts = match kind {
            Kind::NoSpacer => &mut parsed.no_spacer,
            Kind::Spacer => &mut parsed.spacer,
        };
        counts
            .add(key, count)
            .wrap_err_with(|| format!("Line {}: {}", ind + 1, line))?;
    }

    Ok(parsed)
}

/// Render repeats of the reference that are unusually abundant or rare relative to
/// the background distribution.
pub fn write_significance<Cnts: PrimUInt>(
    significance: &Significance<Cnts>,
    label: &str,
    writer: &mut impl Write,
) -> Result<()> {
    let sigmas = significance.sigmas();
    writeln!(
        writer,
        "Repeats More Abundant than Expected in {label} ({sigmas} SD above mean of background):"
    )?;
    write_entries(significance.abundant().iter().map(|(k, c)| (k, c)), writer)?;

    writeln!(writer)?;
    writeln!(
        writer,
        "Repeats Less Abundant than Expected in {label} ({sigmas} SD below mean of background):"
    )?;
    write_entries(significance.rare().iter().map(|(k, c)| (k, c)), writer)?;
    writer.flush()?;
    Ok(())
}
