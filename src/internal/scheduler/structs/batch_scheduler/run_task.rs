//! 单个任务：建目录、下载、更新文件计数，失败时按配置清理部分文件。

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;

use crate::internal::fetcher::structs::{FetchError, FileFetcher};
use crate::internal::scheduler::structs::task_outcome::TaskOutcome;
use crate::internal::site_file::functions::materialize::ensure_directory_for;
use crate::internal::site_file::structs::{DownloadTask, ManifestEntry};

/// 执行单个任务时的参数（形参超过 3 个，用 struct 承载）。
pub(super) struct RunTaskParams {
    pub index: usize,
    pub entry: ManifestEntry,
    pub fetcher: FileFetcher,
    pub root: Arc<PathBuf>,
    pub cleanup_partial_files: bool,
    pub failed_flag: Arc<AtomicBool>,
    /// 连续放行模式下的在途名额，任务结束（或被中途丢弃）时释放
    pub permit: Option<OwnedSemaphorePermit>,
}

pub(super) async fn run_task(params: RunTaskParams) -> TaskOutcome {
    let progress = Arc::clone(params.fetcher.progress());
    progress.file_started();

    let mut outcome = TaskOutcome {
        index: params.index,
        source_path: params.entry.path.clone(),
        destination_path: None,
        bytes_received: 0,
        result: Ok(()),
    };

    match execute(&params, &mut outcome).await {
        Ok(()) => progress.file_completed(),
        Err(e) => {
            tracing::warn!(path = %params.entry.path, kind = ?e.kind(), "文件下载失败: {e}");
            if params.cleanup_partial_files {
                remove_partial(outcome.destination_path.as_ref()).await;
            }
            params.failed_flag.store(true, Ordering::Release);
            progress.file_failed();
            outcome.result = Err(e);
        }
    }

    drop(params.permit);
    outcome
}

async fn execute(
    params: &RunTaskParams,
    outcome: &mut TaskOutcome,
) -> Result<(), FetchError> {
    let mut task = DownloadTask::from_entry(&params.entry, &params.root)?;
    outcome.destination_path = Some(task.destination_path.clone());

    ensure_directory_for(&params.root, &params.entry.path).await?;

    let result = params.fetcher.fetch(&mut task).await;
    outcome.bytes_received = task.bytes_received;
    result.map(|_| ())
}

async fn remove_partial(path: Option<&PathBuf>) {
    let Some(path) = path else {
        return;
    };
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "已删除部分文件"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "删除部分文件失败: {e}"),
    }
}
