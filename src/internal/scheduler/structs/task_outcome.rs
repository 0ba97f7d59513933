use std::path::PathBuf;

use crate::internal::fetcher::structs::FetchError;

/// 单个任务的终态。
#[derive(Debug)]
pub struct TaskOutcome {
    /// 在清单中的位置
    pub index: usize,
    /// 清单中的原始路径
    pub source_path: String,
    /// 本地路径；路径非法时为 `None`
    pub destination_path: Option<PathBuf>,
    /// 实际写入的字节数（失败时为部分写入量）
    pub bytes_received: u64,
    pub result: Result<(), FetchError>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.result.as_ref().err()
    }
}

/// 一次调度的汇总。
#[derive(Debug, Default)]
pub struct SchedulerReport {
    /// 按清单顺序排列的任务终态，只包含真正放行过的任务
    pub outcomes: Vec<TaskOutcome>,
    /// 放行过的批次数（连续放行模式下按每 `max_concurrency` 个任务计一批）
    pub batches_admitted: usize,
    /// 因提前中止而未放行的条目数
    pub not_admitted: usize,
}

impl SchedulerReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn bytes_received(&self) -> u64 {
        self.outcomes.iter().map(|o| o.bytes_received).sum()
    }
}
