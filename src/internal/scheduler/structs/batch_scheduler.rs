//! 批次调度器
//!
//! 把清单切成至多 `max_concurrency` 个条目的批次并发下载，任何时刻在途的下载数都不超过
//! `max_concurrency`，这是针对托管方限流的准入控制。
//!
//! ## 放行方式
//!
//! - **整批放行**（[`SchedulingMode::Batched`]）：取 `manifest[i..i + max]` 为一批，全部结束后
//!   等待 `inter_batch_delay`，再放行下一批
//! - **连续放行**（[`SchedulingMode::Pipelined`]）：信号量控制名额，任一任务结束即放行下一个；
//!   每放行 `max_concurrency` 个任务后同样等待一次 `inter_batch_delay`
//!
//! ## 失败处理
//!
//! 单个任务失败不会取消同批的其它任务。[`ErrorPolicy::Continue`] 下继续跑完整个清单；
//! [`ErrorPolicy::AbortOnFirstError`] 下不再放行新任务，已在途的任务照常结束。
//!
//! ## 内部实现说明
//!
//! - `run_task` 子模块：单个任务的完整流程（建目录、下载、计数、可选清理）
//! - `batched` / `pipelined` 子模块：两种放行方式

mod batched;
mod pipelined;
mod run_task;

use std::ops::Range;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;
use tokio::task::JoinHandle;

use crate::internal::fetcher::structs::{FetchError, FileFetcher};
use crate::internal::site_file::structs::ManifestEntry;

use super::scheduler_config::{SchedulerConfig, SchedulingMode};
use super::task_outcome::{SchedulerReport, TaskOutcome};

pub struct BatchScheduler {
    pub(crate) fetcher: FileFetcher,
    pub(crate) root: Arc<PathBuf>,
    pub(crate) config: SchedulerConfig,
}

impl BatchScheduler {
    pub fn new(
        fetcher: FileFetcher,
        root: impl Into<PathBuf>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            fetcher,
            root: Arc::new(root.into()),
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// 下载整份清单，全部任务进入终态后返回。
    pub async fn run_all(&self, manifest: &[ManifestEntry]) -> SchedulerReport {
        if manifest.is_empty() {
            return SchedulerReport::default();
        }

        tracing::info!(
            files = manifest.len(),
            max_concurrency = self.config.max_concurrency,
            delay_ms = self.config.inter_batch_delay.as_millis() as u64,
            mode = ?self.config.mode,
            "开始调度下载"
        );

        let report = match self.config.mode {
            SchedulingMode::Batched => batched::run(self, manifest).await,
            SchedulingMode::Pipelined => pipelined::run(self, manifest).await,
        };

        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            not_admitted = report.not_admitted,
            "调度结束"
        );

        report
    }

    /// 批次间等待；间隔为 0 时不等待。
    async fn pause_between_batches(&self) {
        let delay = self.config.inter_batch_delay;
        if !delay.is_zero() {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "批次间等待");
            tokio::time::sleep(delay).await;
        }
    }

    fn spawn_task(
        &self,
        index: usize,
        entry: &ManifestEntry,
        failed_flag: &Arc<AtomicBool>,
        permit: Option<OwnedSemaphorePermit>,
    ) -> JoinHandle<TaskOutcome> {
        tokio::spawn(run_task::run_task(run_task::RunTaskParams {
            index,
            entry: entry.clone(),
            fetcher: self.fetcher.clone(),
            root: Arc::clone(&self.root),
            cleanup_partial_files: self.config.cleanup_partial_files,
            failed_flag: Arc::clone(failed_flag),
            permit,
        }))
    }

    /// 等待单个任务句柄；任务 panic 时记为该条目失败，不影响整体。
    async fn settle(
        &self,
        index: usize,
        entry: &ManifestEntry,
        handle: JoinHandle<TaskOutcome>,
    ) -> TaskOutcome {
        match handle.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                tracing::error!(path = %entry.path, "下载任务异常退出: {join_err}");
                self.fetcher.progress().file_failed();
                TaskOutcome {
                    index,
                    source_path: entry.path.clone(),
                    destination_path: None,
                    bytes_received: 0,
                    result: Err(FetchError::TaskJoin(join_err)),
                }
            }
        }
    }
}

/// 按 `max_concurrency` 切分批次，返回每批在清单中的下标区间。
pub fn plan_batches(len: usize, max_concurrency: usize) -> Vec<Range<usize>> {
    let step = max_concurrency.max(1);
    (0..len)
        .step_by(step)
        .map(|start| start..(start + step).min(len))
        .collect()
}
