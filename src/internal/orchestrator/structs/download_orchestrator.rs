//! 下载编排器
//!
//! 一次运行的完整流程：
//!
//! 1. 构造时一次算定清单总字节数，作为整个运行期间的进度分母
//! 2. 校验站点 id，删除上一次运行留下的站点目录后重新创建
//! 3. 交给 [`BatchScheduler`] 按并发上限下载
//! 4. 汇总为 [`DownloadSummary`]
//!
//! 状态通过 `watch` 广播，调用方可在 `run` 之前订阅。

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;

use crate::internal::fetcher::structs::FileFetcher;
use crate::internal::progress::structs::{ProgressAggregator, ProgressWatcher};
use crate::internal::scheduler::structs::BatchScheduler;
use crate::internal::site_file::structs::ManifestEntry;

use super::download_summary::DownloadSummary;
use super::orchestrator_error::OrchestratorError;
use super::orchestrator_state::OrchestratorState;
use super::run_context::RunContext;

pub struct DownloadOrchestrator {
    context: RunContext,
    manifest: Vec<ManifestEntry>,
    progress: Arc<ProgressAggregator>,
    state: watch::Sender<OrchestratorState>,
}

impl DownloadOrchestrator {
    pub fn new(context: RunContext, manifest: Vec<ManifestEntry>) -> Self {
        let progress = Arc::new(ProgressAggregator::new(&manifest));
        let (state, _) = watch::channel(OrchestratorState::Idle);
        Self {
            context,
            manifest,
            progress,
            state,
        }
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn manifest(&self) -> &[ManifestEntry] {
        &self.manifest
    }

    pub fn progress(&self) -> &Arc<ProgressAggregator> {
        &self.progress
    }

    /// 订阅进度展示帧。
    pub fn watch_progress(&self) -> ProgressWatcher {
        self.progress.watch()
    }

    /// 订阅状态变化。
    pub fn state(&self) -> watch::Receiver<OrchestratorState> {
        self.state.subscribe()
    }

    pub fn current_state(&self) -> OrchestratorState {
        *self.state.borrow()
    }

    /// 执行下载。单个文件失败记入汇总，只有初始化失败才返回错误。
    pub async fn run(self) -> Result<DownloadSummary, OrchestratorError> {
        let site_dir = self.context.site_dir();
        self.transition(OrchestratorState::Preparing);

        if let Err(e) = self.prepare(&site_dir).await {
            tracing::error!(site = %self.context.site_id, "初始化失败: {e}");
            self.transition(OrchestratorState::Aborted);
            return Err(e);
        }

        self.transition(OrchestratorState::Downloading);
        tracing::info!(
            site = %self.context.site_id,
            files = self.manifest.len(),
            total_bytes = self.progress.total(),
            dir = %site_dir.display(),
            "开始下载站点"
        );

        let fetcher = FileFetcher::new(
            Arc::clone(&self.context.source),
            Arc::clone(&self.progress),
        );
        let scheduler = BatchScheduler::new(
            fetcher,
            site_dir.clone(),
            self.context.scheduler.clone(),
        );
        let report = scheduler.run_all(&self.manifest).await;

        let summary = DownloadSummary::from_report(
            &report,
            self.progress.total(),
            site_dir,
        );
        self.transition(OrchestratorState::Completed);

        if summary.is_clean() {
            tracing::info!(
                files = summary.files_succeeded,
                bytes = summary.total_bytes_received,
                "站点下载完成"
            );
        } else {
            tracing::warn!(
                succeeded = summary.files_succeeded,
                failed = summary.files_failed,
                bytes = summary.total_bytes_received,
                "站点下载完成，部分文件失败"
            );
        }

        Ok(summary)
    }

    async fn prepare(&self, site_dir: &Path) -> Result<(), OrchestratorError> {
        self.context.validate_site_id()?;

        match tokio::fs::remove_dir_all(site_dir).await {
            Ok(()) => {
                tracing::debug!(dir = %site_dir.display(), "已清理上次运行的站点目录")
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(OrchestratorError::ClearSiteDir {
                    path: site_dir.to_path_buf(),
                    source,
                });
            }
        }

        tokio::fs::create_dir_all(site_dir).await.map_err(|source| {
            OrchestratorError::CreateSiteDir {
                path: site_dir.to_path_buf(),
                source,
            }
        })
    }

    fn transition(&self, next: OrchestratorState) {
        tracing::debug!(state = ?next, "编排器状态变更");
        self.state.send_replace(next);
    }
}
