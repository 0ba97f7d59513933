mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use site_downloader::archive::archive_site;
use site_downloader::netlify::constants::DEFAULT_AUTHORIZE_TIMEOUT;
use site_downloader::netlify::functions::authorize;
use site_downloader::netlify::structs::NetlifyAuth;
use site_downloader::orchestrator::DownloadSummary;
use site_downloader::{prepare_site_download, SiteDownloadParams};

use cli::args::Args;
use cli::progress_bar::{format_mb, short_file_name, ProgressDisplay};
use cli::{logging, prompts};

/// 有文件失败但运行完成
const EXIT_DEGRADED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("错误: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let ids = prompts::resolve_ids(
        args.client_id.clone(),
        args.site_id.clone(),
        args.token.is_some(),
    )?;
    let zip = prompts::resolve_zip(args.zip_choice())?;

    let token = match args.token.clone() {
        Some(token) => token,
        None => {
            let client_id = ids.client_id.as_deref().unwrap_or_default();
            authorize(client_id, args.port, DEFAULT_AUTHORIZE_TIMEOUT)
                .await
                .context("授权失败")?
        }
    };
    let auth = NetlifyAuth::with_api_base(&token, &args.api_base)
        .context("创建认证信息失败")?;
    println!("授权成功，正在获取文件列表...");

    let orchestrator = prepare_site_download(
        &auth,
        SiteDownloadParams {
            site_id: ids.site_id.clone(),
            downloads_root: args.out_dir.clone(),
            scheduler: args.scheduler_config(),
        },
    )
    .await
    .context("获取文件清单失败")?;

    if orchestrator.manifest().is_empty() {
        println!("No files found.");
        return Ok(ExitCode::SUCCESS);
    }
    println!(
        "找到 {} 个文件（{} MB），开始下载...",
        orchestrator.manifest().len(),
        format_mb(orchestrator.progress().total()),
    );

    let progress = Arc::clone(orchestrator.progress());
    let display = ProgressDisplay::start(orchestrator.watch_progress());
    let result = orchestrator.run().await;
    display.finish(progress.snapshot());
    let summary = result.context("下载中止")?;

    print_summary(&summary);

    if zip {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let zip_path = archive_site(&args.out_dir, &ids.site_id, timestamp)
            .await
            .context("打包失败")?;
        println!("已打包: {}", zip_path.display());
    }

    if summary.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DEGRADED))
    }
}

fn print_summary(summary: &DownloadSummary) {
    println!(
        "下载完成：成功 {} 个，失败 {} 个，共 {} MB",
        summary.files_succeeded,
        summary.files_failed,
        format_mb(summary.total_bytes_received),
    );
    for failure in &summary.failures {
        eprintln!("  失败 {}: {}", short_file_name(&failure.path), failure.reason);
    }
}
