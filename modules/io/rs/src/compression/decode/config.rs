use std::path::Path;

use eyre::{ensure, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Config {
    #[default]
    Uncompressed,
    Gzip,
    Bgzf,
}

impl Config {
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext {
                "gz" | "gzip" => Some(Config::Gzip),
                "bgz" | "bgzf" => Some(Config::Bgzf),
                _ => None,
            })
    }

    /// Infer the compression from the file extension. Files with unknown extensions are
    /// sniffed for a gzip signature and treated as plain text otherwise.
    pub fn infer(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure!(path.exists(), "File {} does not exist", path.display());

        if let Some(config) = Self::from_extension(path) {
            return Ok(config);
        }

        let config = match infer::get_from_path(path)? {
            // BGZF is a valid multi-member gzip stream
            Some(kind) if kind.mime_type() == "application/gzip" => Config::Gzip,
            _ => Config::Uncompressed,
        };
        Ok(config)
    }
}
