pub mod file_source;

pub use file_source::{ByteStream, FileSource};
