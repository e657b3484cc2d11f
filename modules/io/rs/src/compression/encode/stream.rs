use super::config::Config;
use eyre::Result;
use std::io::Write;

pub enum Stream<W: Write + Send + 'static> {
    Raw(W),
    Gzip(flate2::write::GzEncoder<W>),
}

impl<W: Write + Send + 'static> Stream<W> {
    pub fn new(inner: W, config: &Config) -> Result<Self> {
        let stream = match config {
            Config::Uncompressed => Stream::Raw(inner),
            Config::Gzip(level) => Stream::Gzip(flate2::write::GzEncoder::new(
                inner,
                flate2::Compression::new(*level.level() as u32),
            )),
        };
        Ok(stream)
    }

    /// Flush all pending data, write compression trailers, and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        match self {
            Stream::Raw(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Stream::Gzip(encoder) => Ok(encoder.finish()?),
        }
    }
}

impl<W: Write + Send + 'static> Write for Stream<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Stream::Raw(w) => w.write(buf),
            Stream::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Stream::Raw(w) => w.flush(),
            Stream::Gzip(w) => w.flush(),
        }
    }
}
