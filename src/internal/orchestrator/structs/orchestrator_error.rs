use std::path::PathBuf;

use thiserror::Error;

/// 编排器初始化失败，出现即进入 `Aborted`。
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("站点 id 非法: {0:?}")]
    InvalidSiteId(String),

    #[error("清理旧的站点目录失败 {path}: {source}")]
    ClearSiteDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("创建站点目录失败 {path}: {source}")]
    CreateSiteDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
