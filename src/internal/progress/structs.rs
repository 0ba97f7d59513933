pub mod progress_aggregator;
pub mod progress_snapshot;

pub use progress_aggregator::{ProgressAggregator, ProgressWatcher};
pub use progress_snapshot::ProgressSnapshot;
