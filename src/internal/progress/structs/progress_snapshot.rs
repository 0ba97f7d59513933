/// 整体进度快照：字节与文件计数的一次读取结果。
///
/// 字节计数与文件计数之间不保证同一时刻冻结，仅用于展示。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// 已写入磁盘的字节数
    pub received: u64,
    /// 清单声明的总字节数，运行开始前一次算定
    pub total: u64,
    /// 已开始的文件数
    pub files_started: usize,
    /// 成功完成的文件数
    pub files_done: usize,
    /// 失败的文件数
    pub files_failed: usize,
    /// 清单中的文件总数
    pub files_total: usize,
}

impl ProgressSnapshot {
    /// 进度百分比（0～100）。
    ///
    /// 总大小为 0 时：全部文件完成记 100，否则记 0。
    pub fn pct(&self) -> f64 {
        if self.total == 0 {
            return if self.files_done >= self.files_total {
                100.0
            } else {
                0.0
            };
        }
        (self.received as f64 / self.total as f64) * 100.0
    }

    /// 已结束（成功或失败）的文件数。
    pub fn files_settled(&self) -> usize {
        self.files_done + self.files_failed
    }

    /// 把另一帧合并进来，每个计数取较大值，保证展示单调不回退。
    pub(crate) fn merge_max(&mut self, other: &ProgressSnapshot) {
        self.received = self.received.max(other.received);
        self.files_started = self.files_started.max(other.files_started);
        self.files_done = self.files_done.max(other.files_done);
        self.files_failed = self.files_failed.max(other.files_failed);
    }
}
