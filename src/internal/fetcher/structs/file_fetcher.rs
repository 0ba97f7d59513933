//! 单文件流式下载：打开来源、逐块写盘、逐块上报进度，最后刷新落盘。

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::internal::fetcher::traits::file_source::{ByteStream, FileSource};
use crate::internal::progress::structs::ProgressAggregator;
use crate::internal::site_file::structs::DownloadTask;

use super::fetch_error::FetchError;

/// 单文件下载器，持有共享的来源与进度聚合器，可被多个 worker 同时使用。
#[derive(Clone)]
pub struct FileFetcher {
    source: Arc<dyn FileSource>,
    progress: Arc<ProgressAggregator>,
}

impl FileFetcher {
    pub fn new(
        source: Arc<dyn FileSource>,
        progress: Arc<ProgressAggregator>,
    ) -> Self {
        Self { source, progress }
    }

    pub fn progress(&self) -> &Arc<ProgressAggregator> {
        &self.progress
    }

    /// 下载一个任务，返回写入的字节数。
    ///
    /// 每块数据先写盘、再上报进度，顺序固定。中途出错时已写入的部分文件保留在磁盘上。
    pub async fn fetch(
        &self,
        task: &mut DownloadTask,
    ) -> Result<u64, FetchError> {
        let mut stream = self.source.open(&task.source_path).await?;

        let mut file = File::create(&task.destination_path)
            .await
            .map_err(FetchError::CreateFile)?;

        let streamed = self.pump(&mut stream, &mut file, task).await;
        // 出错时也先把已写入的部分刷到磁盘，再把错误交给调用方
        let flushed = file.flush().await.map_err(FetchError::FlushFile);
        streamed?;
        flushed?;

        tracing::debug!(
            path = %task.source_path,
            bytes = task.bytes_received,
            expected = task.expected_size,
            "文件下载完成"
        );

        Ok(task.bytes_received)
    }

    async fn pump(
        &self,
        stream: &mut ByteStream,
        file: &mut File,
        task: &mut DownloadTask,
    ) -> Result<(), FetchError> {
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            if chunk.is_empty() {
                continue;
            }

            file.write_all(&chunk)
                .await
                .map_err(FetchError::WriteFile)?;

            let len = chunk.len() as u64;
            task.bytes_received += len;
            self.progress.add_bytes(len);
        }
        Ok(())
    }
}
