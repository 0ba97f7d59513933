use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::internal::fetcher::traits::FileSource;
use crate::internal::scheduler::structs::SchedulerConfig;

use super::orchestrator_error::OrchestratorError;

/// 一次运行所需的全部上下文，由编排器在运行期间独占。
///
/// 站点 id、下载根目录、文件来源都显式传入，不存在跨运行共享的全局状态。
#[derive(Clone)]
pub struct RunContext {
    pub site_id: String,
    /// 下载根目录，站点目录为 `downloads_root/<site_id>`
    pub downloads_root: PathBuf,
    pub source: Arc<dyn FileSource>,
    pub scheduler: SchedulerConfig,
}

impl RunContext {
    pub fn new(
        site_id: impl Into<String>,
        downloads_root: impl Into<PathBuf>,
        source: Arc<dyn FileSource>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            downloads_root: downloads_root.into(),
            source,
            scheduler: SchedulerConfig::default(),
        }
    }

    pub fn with_scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// 本次运行的站点目录。
    pub fn site_dir(&self) -> PathBuf {
        self.downloads_root.join(&self.site_id)
    }

    /// 站点 id 只能作为单层目录名使用。
    pub(crate) fn validate_site_id(&self) -> Result<(), OrchestratorError> {
        let id = self.site_id.as_str();
        let single_segment = Path::new(id).components().count() == 1;
        if id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(['/', '\\'])
            || !single_segment
        {
            return Err(OrchestratorError::InvalidSiteId(id.to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("site_id", &self.site_id)
            .field("downloads_root", &self.downloads_root)
            .field("source", &"<dyn FileSource>")
            .field("scheduler", &self.scheduler)
            .finish()
    }
}
