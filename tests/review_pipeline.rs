// tests/review_pipeline.rs

mod common;
use crate::common::{empty_workspace, site_drush, WS};

use std::path::PathBuf;

use drupalci::config::CategoryFlags;
use drupalci::errors::DrupalCiError;
use drupalci::exec::InvocationOutput;
use drupalci::fs::mock::MockFileSystem;
use drupalci::steps::{ReviewStep, StepContext};
use drupalci::types::Stage;
use drupalci_test_utils::builders::JobConfigBuilder;
use drupalci_test_utils::init_tracing;
use drupalci_test_utils::recording_backend::RecordingBackend;

fn drupal_tree() -> MockFileSystem {
    let fs = empty_workspace();
    fs.add_file("/ws/drupal/a/b/mymodule.info", "name = My module");
    fs.add_file("/ws/drupal/a/b/mymodule.module", "<?php");
    fs.add_file("/ws/drupal/x/y/theme1.info", "name = Theme one");
    fs
}

fn step(builder: JobConfigBuilder) -> ReviewStep {
    ReviewStep::from_config(&builder.build()).unwrap()
}

#[tokio::test]
async fn review_downloads_enables_and_reviews_filtered_targets() {
    init_tracing();
    let fs = drupal_tree();
    let backend = RecordingBackend::new().respond(
        Stage::CoderReview,
        InvocationOutput::success().with_stdout("<checkstyle version=\"1.0\"/>\n"),
    );
    let mut handle = backend.clone();
    let mut ctx = StepContext::new(WS, &fs, &mut handle);

    step(JobConfigBuilder::new().except("x/y/*"))
        .execute(&mut ctx)
        .await
        .unwrap();

    assert_eq!(
        backend.command_lines(),
        vec![
            site_drush("pm-download coder-7.x-2.5 --destination=modules"),
            site_drush("pm-enable coder_review"),
            site_drush("coder-review --checkstyle mymodule"),
        ]
    );
    assert_eq!(fs.created_dirs(), vec![PathBuf::from("/ws/logs")]);
    assert_eq!(
        fs.file_contents("/ws/logs/coder_review.xml").as_deref(),
        Some("<checkstyle version=\"1.0\"/>\n")
    );
}

#[tokio::test]
async fn selected_categories_are_passed_in_one_batched_call() {
    init_tracing();
    let fs = drupal_tree();
    let backend = RecordingBackend::new();
    let mut handle = backend.clone();
    let mut ctx = StepContext::new(WS, &fs, &mut handle);

    step(JobConfigBuilder::new().categories(CategoryFlags::all()))
        .execute(&mut ctx)
        .await
        .unwrap();

    let reviews: Vec<_> = backend
        .calls()
        .into_iter()
        .filter(|c| c.stage == Stage::CoderReview)
        .collect();
    assert_eq!(reviews.len(), 1);
    assert_eq!(
        reviews[0].args,
        vec![
            "--reviews=style,comment,sql,security,i18n",
            "--checkstyle",
            "mymodule",
            "theme1"
        ]
    );
}

#[tokio::test]
async fn existing_logs_directory_is_reused() {
    init_tracing();
    let fs = drupal_tree();
    fs.add_dir("/ws/logs");
    let mut backend = RecordingBackend::new();
    let mut ctx = StepContext::new(WS, &fs, &mut backend);

    step(JobConfigBuilder::new()).execute(&mut ctx).await.unwrap();

    assert!(fs.created_dirs().is_empty());
    assert!(fs.file_contents("/ws/logs/coder_review.xml").is_some());
}

#[tokio::test]
async fn custom_root_and_logs_are_resolved_under_the_workspace() {
    init_tracing();
    let fs = empty_workspace();
    fs.add_file("/ws/web/profiles/minimal/minimal.info", "name = Minimal");
    let backend = RecordingBackend::new();
    let mut handle = backend.clone();
    let mut ctx = StepContext::new(WS, &fs, &mut handle);

    step(
        JobConfigBuilder::new()
            .review_root("web")
            .review_logs("build/coder"),
    )
    .execute(&mut ctx)
    .await
    .unwrap();

    assert_eq!(fs.created_dirs(), vec![PathBuf::from("/ws/build/coder")]);
    let last = backend.command_lines().pop().unwrap();
    assert_eq!(
        last,
        "drush --yes --nocolor --root=/ws/web coder-review --checkstyle minimal"
    );
}

#[tokio::test]
async fn missing_drupal_root_fails_before_any_command() {
    init_tracing();
    let fs = empty_workspace();
    let backend = RecordingBackend::new();
    let mut handle = backend.clone();
    let mut ctx = StepContext::new(WS, &fs, &mut handle);

    let err = step(JobConfigBuilder::new())
        .execute(&mut ctx)
        .await
        .unwrap_err();

    match err {
        DrupalCiError::Filesystem { path, .. } => assert_eq!(path, PathBuf::from("/ws/drupal")),
        other => panic!("expected Filesystem error, got {other:?}"),
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn review_command_failure_aborts_and_writes_no_report() {
    init_tracing();
    let fs = drupal_tree();
    let backend = RecordingBackend::new().fail_stage(Stage::CoderReview, 255, "Drush command terminated abnormally");
    let mut handle = backend.clone();
    let mut ctx = StepContext::new(WS, &fs, &mut handle);

    let err = step(JobConfigBuilder::new())
        .execute(&mut ctx)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::CoderReview));
    assert!(err.to_string().contains("terminated abnormally"));
    assert!(fs.file_contents("/ws/logs/coder_review.xml").is_none());
}

#[tokio::test]
async fn download_failure_stops_the_review() {
    init_tracing();
    let fs = drupal_tree();
    let backend = RecordingBackend::new().fail_stage(Stage::Download, 1, "Project coder not found");
    let mut handle = backend.clone();
    let mut ctx = StepContext::new(WS, &fs, &mut handle);

    let err = step(JobConfigBuilder::new())
        .execute(&mut ctx)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Download));
    assert_eq!(backend.stages(), vec![Stage::Download]);
}
