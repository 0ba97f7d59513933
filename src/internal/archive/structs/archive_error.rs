use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("站点目录不存在: {0}")]
    MissingSiteDir(PathBuf),

    #[error("读写文件失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("写入 zip 失败: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("打包任务异常退出: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
