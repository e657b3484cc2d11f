use std::ops::RangeInclusive;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use invrep_core_rs::nucleotide::Alphabet;

/// Parameters of an inverted repeats scan. Use [ConfigBuilder] to construct a validated instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Dissolve, Getters)]
pub struct Config {
    // Shortest arm to report
    min_half_length: usize,
    // Spacer lengths examined by the spacer scanner, inclusive bounds
    min_spacer: usize,
    max_spacer: usize,
    // Number of chunks the sequence is split into (and the default thread pool size)
    num_workers: usize,
    alphabet: Alphabet,
}

impl Config {
    pub const DEFAULT: Config = Config {
        min_half_length: 4,
        min_spacer: 1,
        max_spacer: 10,
        num_workers: 4,
        alphabet: Alphabet::Dna,
    };

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn spacers(&self) -> RangeInclusive<usize> {
        self.min_spacer..=self.max_spacer
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::DEFAULT
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    min_half_length: Option<usize>,
    min_spacer: Option<usize>,
    max_spacer: Option<usize>,
    num_workers: Option<usize>,
    alphabet: Option<Alphabet>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_half_length(mut self, min_half_length: usize) -> Self {
        self.min_half_length = Some(min_half_length);
        self
    }

    pub fn with_spacers(mut self, min_spacer: usize, max_spacer: usize) -> Self {
        self.min_spacer = Some(min_spacer);
        self.max_spacer = Some(max_spacer);
        self
    }

    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = Some(num_workers);
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    pub fn build(self) -> Result<Config> {
        let config = Config {
            min_half_length: self.min_half_length.unwrap_or(Config::DEFAULT.min_half_length),
            min_spacer: self.min_spacer.unwrap_or(Config::DEFAULT.min_spacer),
            max_spacer: self.max_spacer.unwrap_or(Config::DEFAULT.max_spacer),
            num_workers: self.num_workers.unwrap_or(Config::DEFAULT.num_workers),
            alphabet: self.alphabet.unwrap_or(Config::DEFAULT.alphabet),
        };

        ensure!(
            config.min_half_length >= 1,
            "Minimum half length must be at least 1"
        );
        ensure!(config.min_spacer >= 1, "Minimum spacer must be at least 1");
        ensure!(
            config.min_spacer <= config.max_spacer,
            "Minimum spacer ({}) must not exceed the maximum spacer ({})",
            config.min_spacer,
            config.max_spacer
        );
        ensure!(config.num_workers >= 1, "Number of workers must be at least 1");

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> Result<()> {
        let config = ConfigBuilder::new().build()?;
        assert_eq!(config, Config::default());
        assert_eq!(*config.min_half_length(), 4);
        assert_eq!(config.spacers(), 1..=10);
        assert_eq!(*config.num_workers(), 4);
        assert_eq!(*config.alphabet(), Alphabet::Dna);
        Ok(())
    }

    #[test]
    fn test_custom() -> Result<()> {
        let config = Config::builder()
            .with_min_half_length(2)
            .with_spacers(3, 3)
            .with_num_workers(16)
            .with_alphabet(Alphabet::Iupac)
            .build()?;
        assert_eq!(config.dissolve(), (2, 3, 3, 16, Alphabet::Iupac));
        Ok(())
    }

    #[test]
    fn test_invalid() {
        for builder in [
            Config::builder().with_min_half_length(0),
            Config::builder().with_spacers(0, 10),
            Config::builder().with_spacers(5, 4),
            Config::builder().with_num_workers(0),
        ] {
            assert!(builder.clone().build().is_err(), "{:?}", builder);
        }
    }
}
