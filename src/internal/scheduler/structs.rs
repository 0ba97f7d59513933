pub mod batch_scheduler;
pub mod scheduler_config;
pub mod task_outcome;

pub use batch_scheduler::{plan_batches, BatchScheduler};
pub use scheduler_config::{
    ErrorPolicy, SchedulerConfig, SchedulingMode, DEFAULT_INTER_BATCH_DELAY_MS,
    DEFAULT_MAX_CONCURRENCY,
};
pub use task_outcome::{SchedulerReport, TaskOutcome};
