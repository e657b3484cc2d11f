mod config;
mod stream;

pub use config::{Config, Level};
pub use stream::Stream;

/// Create (or truncate) the file and wrap it into a compressing stream inferred from its name.
pub fn infer_from_path(path: impl AsRef<std::path::Path>) -> eyre::Result<Stream<std::fs::File>> {
    let path = path.as_ref();
    Stream::new(std::fs::File::create(path)?, &Config::infer(path))
}
