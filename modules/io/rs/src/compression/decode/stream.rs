use super::config::Config;
use eyre::Result;
use noodles::bgzf;
use std::io::Read;

pub enum Stream<R: Read + Send + Sync + 'static> {
    Raw(R),
    Gzip(flate2::read::MultiGzDecoder<R>),
    Bgzf(bgzf::io::Reader<R>),
}

impl<R: Read + Send + Sync + 'static> Stream<R> {
    pub fn new(inner: R, config: &Config) -> Result<Self> {
        let stream = match config {
            Config::Uncompressed => Stream::Raw(inner),
            Config::Gzip => Stream::Gzip(flate2::read::MultiGzDecoder::new(inner)),
            Config::Bgzf => Stream::Bgzf(bgzf::io::Reader::new(inner)),
        };
        Ok(stream)
    }

    pub fn boxed(self) -> Box<dyn Read + Send + Sync + 'static> {
        match self {
            Stream::Raw(r) => Box::new(r),
            Stream::Gzip(r) => Box::new(r),
            Stream::Bgzf(r) => Box::new(r),
        }
    }
}

impl<R: Read + Send + Sync + 'static> Read for Stream<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Stream::Raw(r) => r.read(buf),
            Stream::Gzip(r) => r.read(buf),
            Stream::Bgzf(r) => r.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_gzip_roundtrip() -> Result<()> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b">id\nACGT\n")?;
        let compressed = encoder.finish()?;

        let mut decoded = String::new();
        Stream::new(std::io::Cursor::new(compressed), &Config::Gzip)?
            .read_to_string(&mut decoded)?;
        assert_eq!(decoded, ">id\nACGT\n");
        Ok(())
    }

    #[test]
    fn test_bgzf() -> Result<()> {
        let mut writer = bgzf::io::Writer::new(Vec::new());
        writer.write_all(b">id\nACGT\n")?;
        let compressed = writer.finish()?;

        let mut decoded = String::new();
        Stream::new(std::io::Cursor::new(compressed), &Config::Bgzf)?
            .read_to_string(&mut decoded)?;
        assert_eq!(decoded, ">id\nACGT\n");
        Ok(())
    }

    #[test]
    fn test_raw_passthrough() -> Result<()> {
        let mut decoded = Vec::new();
        Stream::new(&b"ACGT"[..], &Config::Uncompressed)?
            .boxed()
            .read_to_end(&mut decoded)?;
        assert_eq!(decoded, b"ACGT");
        Ok(())
    }
}
