use std::path::PathBuf;
use std::sync::Arc;

use crate::internal::netlify::functions::list_site_files;
use crate::internal::netlify::structs::{
    ManifestFetchError, NetlifyAuth, NetlifyFileSource,
};
use crate::internal::orchestrator::structs::{DownloadOrchestrator, RunContext};
use crate::internal::scheduler::structs::SchedulerConfig;

/// 准备一次站点下载时的参数
#[derive(Debug, Clone)]
pub struct SiteDownloadParams {
    pub site_id: String,
    /// 下载根目录，站点文件落在 `downloads_root/<site_id>/` 下
    pub downloads_root: PathBuf,
    pub scheduler: SchedulerConfig,
}

/// 拉取站点文件清单，构造好编排器但不开始下载
///
/// 调用方可以先订阅进度与状态、检查清单是否为空，再调用 `run`。
///
/// example:
/// ```ignore
/// let auth = NetlifyAuth::new(&token)?;
/// let orchestrator = prepare_site_download(&auth, SiteDownloadParams {
///     site_id: "my-site".into(),
///     downloads_root: "downloads".into(),
///     scheduler: SchedulerConfig::default(),
/// }).await?;
/// let summary = orchestrator.run().await?;
/// ```
pub async fn prepare_site_download(
    auth: &NetlifyAuth,
    params: SiteDownloadParams,
) -> Result<DownloadOrchestrator, ManifestFetchError> {
    let manifest = list_site_files(auth, &params.site_id).await?;

    let source = Arc::new(NetlifyFileSource::new(
        auth.clone(),
        params.site_id.clone(),
    ));
    let context = RunContext::new(params.site_id, params.downloads_root, source)
        .with_scheduler(params.scheduler);

    Ok(DownloadOrchestrator::new(context, manifest))
}
