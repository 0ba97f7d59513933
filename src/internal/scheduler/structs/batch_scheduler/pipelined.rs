//! 连续放行：信号量控制在途名额，任一任务结束即可放行下一个。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::internal::scheduler::structs::scheduler_config::ErrorPolicy;
use crate::internal::scheduler::structs::task_outcome::SchedulerReport;
use crate::internal::site_file::structs::ManifestEntry;

use super::BatchScheduler;

pub(super) async fn run(
    scheduler: &BatchScheduler,
    manifest: &[ManifestEntry],
) -> SchedulerReport {
    let max = scheduler.config.max_concurrency;
    let semaphore = Arc::new(Semaphore::new(max));
    let failed_flag = Arc::new(AtomicBool::new(false));
    let abort_on_error =
        scheduler.config.error_policy == ErrorPolicy::AbortOnFirstError;

    let mut report = SchedulerReport {
        outcomes: Vec::with_capacity(manifest.len()),
        ..Default::default()
    };
    let mut handles = Vec::with_capacity(manifest.len());

    for (index, entry) in manifest.iter().enumerate() {
        if index > 0 && index % max == 0 {
            scheduler.pause_between_batches().await;
        }

        // 名额在任务结束时随 permit 一起释放
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(p) => p,
            Err(_) => break,
        };

        if abort_on_error && failed_flag.load(Ordering::Acquire) {
            tracing::warn!("出现失败，停止放行后续任务");
            break;
        }

        if index % max == 0 {
            report.batches_admitted += 1;
        }

        let handle =
            scheduler.spawn_task(index, entry, &failed_flag, Some(permit));
        handles.push((index, handle));
    }

    for (index, handle) in handles {
        let outcome = scheduler.settle(index, &manifest[index], handle).await;
        report.outcomes.push(outcome);
    }

    report.not_admitted = manifest.len() - report.outcomes.len();
    report
}
