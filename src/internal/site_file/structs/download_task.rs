use std::path::{Path, PathBuf};

use super::manifest_entry::ManifestEntry;
use super::materialize_error::MaterializeError;
use crate::internal::site_file::functions::materialize::destination_path;

/// 单个文件的下载任务：批次放行时由清单记录派生，只归执行它的 worker 所有。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// 请求托管方时使用的相对路径
    pub source_path: String,
    /// 本地落盘的完整路径
    pub destination_path: PathBuf,
    /// 清单声明的大小（字节）
    pub expected_size: u64,
    /// 目前已写入的字节数
    pub bytes_received: u64,
}

impl DownloadTask {
    /// 根据清单记录与站点根目录构建任务；路径非法时直接返回错误，任务不会被执行。
    pub fn from_entry(
        entry: &ManifestEntry,
        root: &Path,
    ) -> Result<Self, MaterializeError> {
        let destination_path = destination_path(root, &entry.path)?;
        Ok(Self {
            source_path: entry.relative_path().to_string(),
            destination_path,
            expected_size: entry.size,
            bytes_received: 0,
        })
    }
}
