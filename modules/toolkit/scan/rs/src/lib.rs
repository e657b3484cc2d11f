pub use aggregate::aggregate;
pub use cache::ReverseComplementCache;
pub use config::{Config, ConfigBuilder};
pub use counts::CountMap;
pub use engine::{Engine, EngineBuilder};
pub use error::ScanError;
pub use partition::{partition, Chunk};
pub use repeats::{Kind, RepeatKey};
pub use result::{ChunkCounts, Scan, Summary};
pub use scanner::{NoSpacer, Scanner, Spacer};
pub use worker::Worker;

mod aggregate;
mod cache;
mod config;
mod counts;
mod engine;
mod error;
mod partition;
mod repeats;
pub mod report;
mod result;
mod scanner;
pub mod stats;
mod worker;
