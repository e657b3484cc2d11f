mod concat;
mod reader;
mod record;

pub use concat::{concatenate, load, Loaded};
pub use reader::Reader;
pub use record::Record;
