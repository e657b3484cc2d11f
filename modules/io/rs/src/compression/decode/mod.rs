mod config;
mod stream;

pub use config::Config;
pub use stream::Stream;

/// Open the file and wrap it into a decompressing stream inferred from its name and content.
pub fn infer_from_path(path: impl AsRef<std::path::Path>) -> eyre::Result<Stream<std::fs::File>> {
    let path = path.as_ref();
    Stream::new(std::fs::File::open(path)?, &Config::infer(path)?)
}
