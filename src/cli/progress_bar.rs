use indicatif::{ProgressBar, ProgressStyle};
use site_downloader::progress::{ProgressSnapshot, ProgressWatcher};
use tokio::task::JoinHandle;

const PB_TEMPLATE: &str = "[{bar:30}] {percent}% {msg}";

const PB_CHARS: &str = "█░";

/// 字节数换算为 MB，保留两位小数
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0 / 1024.0)
}

/// 过长的文件名只保留首尾各 10 个字符
pub fn short_file_name(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    let chars = name.chars().collect::<Vec<_>>();
    if chars.len() <= 20 {
        return name.to_string();
    }
    let head = chars[..10].iter().collect::<String>();
    let tail = chars[chars.len() - 10..].iter().collect::<String>();
    format!("{head}...{tail}")
}

fn message(frame: &ProgressSnapshot) -> String {
    format!(
        "{}/{} files [{}/{} MB]",
        frame.files_settled(),
        frame.files_total,
        format_mb(frame.received),
        format_mb(frame.total),
    )
}

/// 由展示帧驱动的终端进度条
pub struct ProgressDisplay {
    pb: ProgressBar,
    updater: JoinHandle<()>,
}

impl ProgressDisplay {
    pub fn start(mut watcher: ProgressWatcher) -> Self {
        let first = watcher.borrow();
        let pb = ProgressBar::new(first.total);
        if let Ok(style) = ProgressStyle::with_template(PB_TEMPLATE) {
            pb.set_style(style.progress_chars(PB_CHARS));
        }
        pb.set_message(message(&first));

        let bar = pb.clone();
        let updater = tokio::spawn(async move {
            while let Some(frame) = watcher.changed().await {
                bar.set_position(frame.received.min(frame.total));
                bar.set_message(message(&frame));
            }
        });

        Self { pb, updater }
    }

    /// 停止刷新并画出最终状态
    pub fn finish(self, last: ProgressSnapshot) {
        self.updater.abort();
        self.pb.set_position(last.received.min(last.total));
        self.pb.finish_with_message(message(&last));
    }
}
