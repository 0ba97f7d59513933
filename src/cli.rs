//! 命令行外壳：参数、交互式补全、进度条与日志初始化。

pub mod args;
pub mod logging;
pub mod progress_bar;
pub mod prompts;
