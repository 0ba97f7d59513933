//! 整批放行：一批全部进入终态后，等待批次间隔，再放行下一批。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::internal::scheduler::structs::scheduler_config::ErrorPolicy;
use crate::internal::scheduler::structs::task_outcome::SchedulerReport;
use crate::internal::site_file::structs::ManifestEntry;

use super::{plan_batches, BatchScheduler};

pub(super) async fn run(
    scheduler: &BatchScheduler,
    manifest: &[ManifestEntry],
) -> SchedulerReport {
    let failed_flag = Arc::new(AtomicBool::new(false));
    let batches = plan_batches(manifest.len(), scheduler.config.max_concurrency);
    let mut report = SchedulerReport {
        outcomes: Vec::with_capacity(manifest.len()),
        ..Default::default()
    };

    for (batch_no, range) in batches.into_iter().enumerate() {
        if batch_no > 0 {
            if scheduler.config.error_policy == ErrorPolicy::AbortOnFirstError
                && failed_flag.load(Ordering::Acquire)
            {
                tracing::warn!("出现失败，停止放行后续批次");
                break;
            }
            scheduler.pause_between_batches().await;
        }

        tracing::debug!(batch = batch_no, start = range.start, end = range.end, "放行批次");
        report.batches_admitted += 1;

        let handles: Vec<_> = range
            .map(|index| {
                let handle =
                    scheduler.spawn_task(index, &manifest[index], &failed_flag, None);
                (index, handle)
            })
            .collect();

        for (index, handle) in handles {
            let outcome = scheduler.settle(index, &manifest[index], handle).await;
            if !outcome.is_success() {
                failed_flag.store(true, Ordering::Release);
            }
            report.outcomes.push(outcome);
        }
    }

    report.not_admitted = manifest.len() - report.outcomes.len();
    report
}
