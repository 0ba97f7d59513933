pub mod archive_error;

pub use archive_error::ArchiveError;
