//! 单文件下载错误。

use thiserror::Error;

use crate::internal::site_file::structs::MaterializeError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Directory(#[from] MaterializeError),

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("请求地址非法 {path}: {reason}")]
    InvalidUrl { path: String, reason: String },

    #[error("服务端返回异常状态 {status}: {path}")]
    Status { status: u16, path: String },

    #[error("数据流中断: {0}")]
    Stream(String),

    #[error("创建文件失败: {0}")]
    CreateFile(std::io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(std::io::Error),

    #[error("刷新文件失败: {0}")]
    FlushFile(std::io::Error),

    #[error("下载任务异常退出: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// 错误归类：目录创建 / 网络流 / 本地写入。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    DirectoryCreation,
    Stream,
    Write,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Directory(_) => FetchErrorKind::DirectoryCreation,
            FetchError::Request(_)
            | FetchError::InvalidUrl { .. }
            | FetchError::Status { .. }
            | FetchError::Stream(_)
            | FetchError::TaskJoin(_) => FetchErrorKind::Stream,
            FetchError::CreateFile(_)
            | FetchError::WriteFile(_)
            | FetchError::FlushFile(_) => FetchErrorKind::Write,
        }
    }
}
