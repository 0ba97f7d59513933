use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use site_downloader::netlify::constants::{DEFAULT_API_BASE, DEFAULT_CALLBACK_PORT};
use site_downloader::scheduler::{
    ErrorPolicy, SchedulerConfig, SchedulingMode, DEFAULT_INTER_BATCH_DELAY_MS,
    DEFAULT_MAX_CONCURRENCY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// 整批放行，一批全部结束后再放行下一批
    Batched,
    /// 任一名额空出即放行下一个任务
    Pipelined,
}

/// 下载 Netlify 站点当前部署的全部文件
#[derive(Debug, Parser)]
#[command(name = "site-downloader", version)]
pub struct Args {
    /// Netlify OAuth 应用的 client id
    #[arg(long = "client-id", alias = "client", env = "NETLIFY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// 要下载的站点 id
    #[arg(long = "site-id", alias = "site", env = "NETLIFY_SITE_ID")]
    pub site_id: Option<String>,

    /// 直接使用已有令牌，跳过浏览器授权
    #[arg(long, env = "NETLIFY_AUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// 下载完成后打包为 zip
    #[arg(long, conflicts_with = "no_zip")]
    pub zip: bool,

    /// 下载完成后不打包
    #[arg(long = "no-zip")]
    pub no_zip: bool,

    /// 同时在途的下载数上限
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    /// 批次间隔（毫秒）
    #[arg(long = "batch-delay-ms", default_value_t = DEFAULT_INTER_BATCH_DELAY_MS)]
    pub batch_delay_ms: u64,

    /// 放行方式
    #[arg(long, value_enum, default_value_t = ModeArg::Pipelined)]
    pub mode: ModeArg,

    /// 出现首个失败后不再放行新任务
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// 删除失败任务留下的部分文件
    #[arg(long = "cleanup-partial")]
    pub cleanup_partial: bool,

    /// 下载根目录
    #[arg(long = "out-dir", default_value = "downloads")]
    pub out_dir: PathBuf,

    /// Netlify API 地址
    #[arg(long = "api-base", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// 本地授权回调端口
    #[arg(long, default_value_t = DEFAULT_CALLBACK_PORT)]
    pub port: u16,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 命令行明确指定的打包选择，未指定时为 `None`
    pub fn zip_choice(&self) -> Option<bool> {
        match (self.zip, self.no_zip) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_concurrency: self.concurrency,
            inter_batch_delay: Duration::from_millis(self.batch_delay_ms),
            mode: match self.mode {
                ModeArg::Batched => SchedulingMode::Batched,
                ModeArg::Pipelined => SchedulingMode::Pipelined,
            },
            error_policy: if self.fail_fast {
                ErrorPolicy::AbortOnFirstError
            } else {
                ErrorPolicy::Continue
            },
            cleanup_partial_files: self.cleanup_partial,
        }
    }
}
