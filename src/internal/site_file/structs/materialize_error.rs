use std::path::PathBuf;

use thiserror::Error;

/// 目录还原相关错误。
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("文件路径缺少文件名: {0:?}")]
    EmptyFileName(String),

    #[error("父目录不允许: {0:?}")]
    ParentTraversal(String),

    #[error("创建目录 {path:?} 失败: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
