//! 进度聚合器：多个 worker 并发上报字节与文件计数，计数本身走原子操作，
//! 展示帧通过 [`tokio::sync::watch`] 广播。
//!
//! 计数是正确性的一部分，一个字节都不能丢；展示帧只是副作用，可以被合并或跳过。

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::sync::watch;

use crate::internal::site_file::structs::{total_size, ManifestEntry};

use super::progress_snapshot::ProgressSnapshot;

/// 进度聚合器，通常以 `Arc` 形式在 worker 间共享。
#[derive(Debug)]
pub struct ProgressAggregator {
    total: u64,
    files_total: usize,
    received: AtomicU64,
    files_started: AtomicUsize,
    files_done: AtomicUsize,
    files_failed: AtomicUsize,
    display: watch::Sender<ProgressSnapshot>,
}

impl ProgressAggregator {
    /// 用整份清单初始化：总字节数在任何下载开始前一次算定，整个运行期间不再变化。
    pub fn new(manifest: &[ManifestEntry]) -> Self {
        Self::with_totals(total_size(manifest), manifest.len())
    }

    pub fn with_totals(total: u64, files_total: usize) -> Self {
        let (display, _) = watch::channel(ProgressSnapshot {
            total,
            files_total,
            ..Default::default()
        });
        Self {
            total,
            files_total,
            received: AtomicU64::new(0),
            files_started: AtomicUsize::new(0),
            files_done: AtomicUsize::new(0),
            files_failed: AtomicUsize::new(0),
            display,
        }
    }

    /// 累加已接收字节，并发布新的展示帧；返回累加后的总数。
    pub fn add_bytes(&self, n: u64) -> u64 {
        let current = self.received.fetch_add(n, Ordering::AcqRel) + n;
        self.publish();
        current
    }

    pub fn file_started(&self) {
        self.files_started.fetch_add(1, Ordering::AcqRel);
        self.publish();
    }

    pub fn file_completed(&self) {
        self.files_done.fetch_add(1, Ordering::AcqRel);
        self.publish();
    }

    pub fn file_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::AcqRel);
        self.publish();
    }

    /// 清单声明的总字节数。
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn files_total(&self) -> usize {
        self.files_total
    }

    /// 读取当前计数。
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            received: self.received.load(Ordering::Acquire),
            total: self.total,
            files_started: self.files_started.load(Ordering::Acquire),
            files_done: self.files_done.load(Ordering::Acquire),
            files_failed: self.files_failed.load(Ordering::Acquire),
            files_total: self.files_total,
        }
    }

    /// 创建一个展示帧监听器。
    pub fn watch(&self) -> ProgressWatcher {
        ProgressWatcher {
            receiver: self.display.subscribe(),
        }
    }

    fn publish(&self) {
        let frame = self.snapshot();
        self.display.send_modify(|shown| shown.merge_max(&frame));
    }
}

/// 展示帧监听器：`changed().await` 等待下一帧。
#[derive(Debug)]
pub struct ProgressWatcher {
    receiver: watch::Receiver<ProgressSnapshot>,
}

impl ProgressWatcher {
    /// 等待展示帧变化并返回最新一帧；聚合器被销毁后返回 `None`。
    pub async fn changed(&mut self) -> Option<ProgressSnapshot> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    /// 当前展示帧。
    pub fn borrow(&self) -> ProgressSnapshot {
        *self.receiver.borrow()
    }
}
