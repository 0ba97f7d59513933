use serde::{Deserialize, Serialize};

/// 清单中的一条文件记录，对应托管方文件列表接口返回的单个对象。
///
/// 只关心 `path` 与 `size`，其它字段（id、sha、mime_type 等）反序列化时直接忽略。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// 站点内的相对路径，`/` 分隔，托管方返回时通常带前导 `/`
    pub path: String,
    /// 托管方声明的文件大小（字节），缺失时按 0 处理
    #[serde(default)]
    pub size: u64,
}

impl ManifestEntry {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// 去掉前导 `/` 后的相对路径，用于拼接本地目录与请求地址。
    pub fn relative_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

/// 计算整份清单的声明总大小（饱和加法，避免异常数据溢出）。
pub fn total_size(entries: &[ManifestEntry]) -> u64 {
    entries
        .iter()
        .fold(0u64, |acc, entry| acc.saturating_add(entry.size))
}
