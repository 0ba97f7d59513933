pub mod download_task;
pub mod manifest_entry;
pub mod materialize_error;

pub use download_task::DownloadTask;
pub use manifest_entry::{total_size, ManifestEntry};
pub use materialize_error::MaterializeError;
