use derive_getters::Getters;
use derive_more::Into;
use eyre::{bail, Result};
use std::path::Path;

/// DEFLATE compression level in the [0, 9] range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, Into)]
pub struct Level {
    level: u8,
}

impl Level {
    pub const FAST: Level = Level { level: 1 };
    pub const DEFAULT: Level = Level { level: 6 };
    pub const BEST: Level = Level { level: 9 };

    pub fn new(level: u8) -> Result<Self> {
        if level > 9 {
            bail!("Invalid DEFLATE compression level: {}", level);
        }
        Ok(Self { level })
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Config {
    #[default]
    Uncompressed,
    Gzip(Level),
}

impl Config {
    pub fn infer(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| match ext {
                "gz" | "gzip" => Config::Gzip(Level::default()),
                _ => Config::Uncompressed,
            })
            .unwrap_or(Config::Uncompressed)
    }
}
