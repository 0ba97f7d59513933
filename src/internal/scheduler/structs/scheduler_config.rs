use std::time::Duration;

/// 默认最大并发下载数
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// 默认批次间隔（毫秒）
pub const DEFAULT_INTER_BATCH_DELAY_MS: u64 = 1000;

/// 放行方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulingMode {
    /// 整批放行：一批全部结束后再放行下一批
    Batched,
    /// 连续放行：任一名额空出即放行下一个任务，每放行 `max_concurrency` 个后等待一次间隔
    #[default]
    Pipelined,
}

/// 单个任务失败后的处理方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// 记录失败，继续下载其余文件
    #[default]
    Continue,
    /// 出现首个失败后不再放行新任务，已在途的任务照常结束
    AbortOnFirstError,
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// 同时在途的下载数上限
    pub max_concurrency: usize,
    /// 批次之间的固定等待
    pub inter_batch_delay: Duration,
    pub mode: SchedulingMode,
    pub error_policy: ErrorPolicy,
    /// 失败时是否删除已写入的部分文件，默认保留
    pub cleanup_partial_files: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            inter_batch_delay: Duration::from_millis(
                DEFAULT_INTER_BATCH_DELAY_MS,
            ),
            mode: SchedulingMode::default(),
            error_policy: ErrorPolicy::default(),
            cleanup_partial_files: false,
        }
    }
}

impl SchedulerConfig {
    /// 修正非法取值：并发数为 0 时按 1 处理。
    pub fn normalized(mut self) -> Self {
        if self.max_concurrency == 0 {
            tracing::warn!("max_concurrency 为 0，按 1 处理");
            self.max_concurrency = 1;
        }
        self
    }
}
