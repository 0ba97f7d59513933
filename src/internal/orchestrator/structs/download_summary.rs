use std::path::PathBuf;

use crate::internal::scheduler::structs::SchedulerReport;

/// 下载失败的文件及原因。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub path: String,
    pub reason: String,
}

/// 一次运行的汇总。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub files_attempted: usize,
    pub files_succeeded: usize,
    pub files_failed: usize,
    pub total_bytes_received: u64,
    /// 清单声明的总字节数
    pub total_bytes_expected: u64,
    /// 下载结果所在的站点目录
    pub site_dir: PathBuf,
    pub failures: Vec<FailedFile>,
}

impl DownloadSummary {
    pub(crate) fn from_report(
        report: &SchedulerReport,
        total_bytes_expected: u64,
        site_dir: PathBuf,
    ) -> Self {
        let failures = report
            .outcomes
            .iter()
            .filter_map(|o| {
                o.error().map(|e| FailedFile {
                    path: o.source_path.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Vec<_>>();

        Self {
            files_attempted: report.outcomes.len(),
            files_succeeded: report.succeeded(),
            files_failed: failures.len(),
            total_bytes_received: report.bytes_received(),
            total_bytes_expected,
            site_dir,
            failures,
        }
    }

    /// 没有任何文件失败。
    pub fn is_clean(&self) -> bool {
        self.files_failed == 0
    }
}
