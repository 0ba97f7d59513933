//! 编排测试：完整运行汇总、空清单、重复运行幂等、初始化失败进入 Aborted。

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use crate::orchestrator::{
    DownloadOrchestrator, OrchestratorError, OrchestratorState, RunContext,
};
use crate::scheduler::{SchedulerConfig, SchedulingMode};
use crate::site_file::ManifestEntry;
use crate::tests::{manifest_of, source_for, MockSource};

fn context(root: &TempDir, site_id: &str, source: MockSource) -> RunContext {
    RunContext::new(site_id, root.path(), Arc::new(source)).with_scheduler(
        SchedulerConfig {
            max_concurrency: 2,
            inter_batch_delay: Duration::ZERO,
            mode: SchedulingMode::Batched,
            ..Default::default()
        },
    )
}

fn sample_manifest() -> Vec<ManifestEntry> {
    manifest_of(&[
        ("/index.html", 100),
        ("/img/a.png", 2000),
        ("/img/b.png", 3000),
    ])
}

#[tokio::test]
async fn run_produces_summary_and_site_tree() {
    let tmp = TempDir::new().unwrap();
    let manifest = sample_manifest();
    let orchestrator = DownloadOrchestrator::new(
        context(&tmp, "site-1", source_for(&manifest)),
        manifest.clone(),
    );
    // 总量在运行前就已确定
    assert_eq!(orchestrator.progress().snapshot().total, 5100);
    let mut state = orchestrator.state();
    assert_eq!(*state.borrow_and_update(), OrchestratorState::Idle);

    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.files_attempted, 3);
    assert_eq!(summary.files_succeeded, 3);
    assert_eq!(summary.files_failed, 0);
    assert_eq!(summary.total_bytes_received, 5100);
    assert_eq!(summary.total_bytes_expected, 5100);
    assert!(summary.is_clean());
    assert_eq!(*state.borrow(), OrchestratorState::Completed);

    let site_dir = tmp.path().join("site-1");
    assert_eq!(summary.site_dir, site_dir);
    assert!(site_dir.join("img").is_dir());
    assert_eq!(std::fs::metadata(site_dir.join("index.html")).unwrap().len(), 100);
}

#[tokio::test]
async fn failed_file_degrades_but_completes() {
    let tmp = TempDir::new().unwrap();
    let manifest = sample_manifest();
    let source = source_for(&manifest)
        .with_chunk_size(500)
        .failing_after("img/b.png", 1500);
    let orchestrator =
        DownloadOrchestrator::new(context(&tmp, "site-1", source), manifest);
    let state = orchestrator.state();

    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_succeeded, 2);
    assert_eq!(summary.total_bytes_received, 100 + 2000 + 1500);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].path, "/img/b.png");
    assert!(!summary.is_clean());
    assert_eq!(*state.borrow(), OrchestratorState::Completed);
}

#[tokio::test]
async fn empty_manifest_completes_immediately() {
    let tmp = TempDir::new().unwrap();
    let orchestrator =
        DownloadOrchestrator::new(context(&tmp, "site-1", MockSource::new()), Vec::new());

    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.files_attempted, 0);
    assert_eq!(summary.files_succeeded, 0);
    assert_eq!(summary.files_failed, 0);
    assert_eq!(summary.total_bytes_received, 0);
    assert!(tmp.path().join("site-1").is_dir());
}

#[tokio::test]
async fn second_run_replaces_previous_site_dir() {
    let tmp = TempDir::new().unwrap();
    let manifest = sample_manifest();
    let source = source_for(&manifest);

    let first = DownloadOrchestrator::new(
        context(&tmp, "site-1", source.clone()),
        manifest.clone(),
    );
    first.run().await.unwrap();

    let site_dir = tmp.path().join("site-1");
    let first_bytes = std::fs::read(site_dir.join("img/a.png")).unwrap();
    std::fs::write(site_dir.join("stale.txt"), b"left over").unwrap();

    let second =
        DownloadOrchestrator::new(context(&tmp, "site-1", source), manifest);
    let summary = second.run().await.unwrap();

    assert_eq!(summary.total_bytes_received, 5100);
    assert!(!site_dir.join("stale.txt").exists());
    assert_eq!(std::fs::read(site_dir.join("img/a.png")).unwrap(), first_bytes);
}

#[tokio::test]
async fn invalid_site_id_aborts() {
    let tmp = TempDir::new().unwrap();

    for site_id in ["", "..", "a/b", "a\\b"] {
        let orchestrator = DownloadOrchestrator::new(
            context(&tmp, site_id, MockSource::new()),
            sample_manifest(),
        );
        let state = orchestrator.state();

        let err = orchestrator.run().await.unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidSiteId(_)), "{site_id:?}");
        assert_eq!(*state.borrow(), OrchestratorState::Aborted);
    }
}

#[tokio::test]
async fn unusable_root_aborts() {
    let tmp = TempDir::new().unwrap();
    let root_file = tmp.path().join("not-a-dir");
    std::fs::write(&root_file, b"").unwrap();

    let context = RunContext::new("site-1", &root_file, Arc::new(MockSource::new()));
    let orchestrator = DownloadOrchestrator::new(context, sample_manifest());
    let state = orchestrator.state();

    assert!(orchestrator.run().await.is_err());
    assert_eq!(*state.borrow(), OrchestratorState::Aborted);
    assert!(state.borrow().is_terminal());
}
