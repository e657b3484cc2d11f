use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};
use itertools::Itertools;

use invrep_core_rs::num::PrimUInt;

use crate::repeats::RepeatKey;

/// Summary of repeat counts pooled from one or more (background) reports.
#[derive(Debug, Clone, Copy, PartialEq, Getters)]
pub struct Distribution {
    samples: usize,
    mean: f64,
    // Sample standard deviation, zero for less than two samples
    sd: f64,
    // Width of the expected interval in standard deviations
    sigmas: f64,
}

impl Distribution {
    pub const DEFAULT_SIGMAS: f64 = 3.0;

    pub fn new<Cnts: PrimUInt>(counts: impl IntoIterator<Item = Cnts>) -> Self {
        let counts = counts
            .into_iter()
            .filter_map(|x| x.to_f64())
            .collect::<Vec<_>>();

        let samples = counts.len();
        let mean = if samples == 0 {
            0.0
        } else {
            counts.iter().sum::<f64>() / samples as f64
        };
        let sd = if samples < 2 {
            0.0
        } else {
            let ss = counts.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
            (ss / (samples - 1) as f64).sqrt()
        };

        Self {
            samples,
            mean,
            sd,
            sigmas: Self::DEFAULT_SIGMAS,
        }
    }

    pub fn with_sigmas(mut self, sigmas: f64) -> Result<Self> {
        ensure!(
            sigmas.is_finite() && sigmas >= 0.0,
            "Number of standard deviations must be a non-negative number, got {}",
            sigmas
        );
        self.sigmas = sigmas;
        Ok(self)
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.sigmas * self.sd
    }

    /// Lower bound of the expected interval, never below zero.
    pub fn lower(&self) -> f64 {
        (self.mean - self.sigmas * self.sd).max(0.0)
    }

    /// Select reference entries with counts outside of the expected interval.
    pub fn classify<'a, Cnts: PrimUInt + 'a>(
        &self,
        reference: impl IntoIterator<Item = (&'a RepeatKey, &'a Cnts)>,
    ) -> Significance<Cnts> {
        let (upper, lower) = (self.upper(), self.lower());

        let mut abundant = Vec::new();
        let mut rare = Vec::new();
        for (key, count) in reference {
            let Some(value) = count.to_f64() else {
                continue;
            };
            if value > upper {
                abundant.push((key.clone(), *count));
            } else if value < lower {
                rare.push((key.clone(), *count));
            }
        }

        Significance {
            sigmas: self.sigmas,
            abundant: abundant.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)).collect(),
            rare: rare.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)).collect(),
        }
    }
}

/// Reference repeats that fall outside of the background's expected interval, sorted by key.
#[derive(Debug, Clone, PartialEq, Getters, Dissolve)]
pub struct Significance<Cnts: PrimUInt> {
    sigmas: f64,
    abundant: Vec<(RepeatKey, Cnts)>,
    rare: Vec<(RepeatKey, Cnts)>,
}
