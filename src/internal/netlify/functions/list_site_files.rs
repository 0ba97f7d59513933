use crate::internal::netlify::structs::{ManifestFetchError, NetlifyAuth};
use crate::internal::netlify::structs::netlify_file_source::encode_path;
use crate::internal::site_file::structs::ManifestEntry;

/// 拉取站点的文件清单
///
/// 返回顺序与服务端一致。记录中除 `path` 与 `size` 外的字段全部忽略。
pub async fn list_site_files(
    auth: &NetlifyAuth,
    site_id: &str,
) -> Result<Vec<ManifestEntry>, ManifestFetchError> {
    let url = auth.endpoint(&format!("sites/{}/files", encode_path(site_id)))?;
    tracing::debug!(%url, "请求文件清单");

    let response = auth.client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ManifestFetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let entries = response
        .json::<Vec<ManifestEntry>>()
        .await
        .map_err(ManifestFetchError::Decode)?;

    tracing::info!(site = site_id, files = entries.len(), "已获取文件清单");
    Ok(entries)
}
