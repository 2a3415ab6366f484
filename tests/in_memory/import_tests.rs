//! Import flow tests against the in-memory tracker.

use super::helpers::{Harness, comment, harness};
use eyre::ensure;
use rstest::rstest;
use tdg_sync::backlog::{
    config::ImportConfig,
    domain::{CommentKind, ItemOutcome},
    ports::CategoryStore,
    services::{ImportError, ImportTodoCommentsRequest},
};

const REQUEST: &str = r#"{
    "root": "/home/dev/backend",
    "branch": "main",
    "author": "alice",
    "project_name": "backend",
    "comments": [
        {
            "type": "TODO",
            "title": "add retries",
            "body": "network calls give up too early",
            "file": "src/client.rs",
            "line": 42,
            "category": "network"
        },
        {
            "type": "BUG",
            "title": "off by one",
            "body": null,
            "file": "src/pager.rs",
            "line": 7,
            "issue": 88
        }
    ]
}"#;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn json_request_creates_tagged_colored_tasks(harness: Harness) -> Result<(), eyre::Report> {
    let request = ImportTodoCommentsRequest::from_json_str(REQUEST)?;

    let report = harness.service().import_todo_comments(&request).await?;

    ensure!(report.created() == 2, "expected two creations");
    ensure!(report.is_success(), "run should finish");
    ensure!(report.categories_created() == ["network"], "category created");

    let retries = harness.task_titled("add retries").await?;
    ensure!(retries.reference == "src/client.rs:42", "reference is file:line");
    ensure!(
        retries.color_id.as_ref().map(|color| color.as_str()) == Some("green"),
        "TODO is green"
    );
    let categories = harness.tracker.list(harness.project_id).await?;
    ensure!(
        categories.iter().any(|category| Some(category.id) == retries.category_id),
        "task linked to the created category"
    );

    let bug = harness.task_titled("off by one").await?;
    let tags: Vec<&str> = bug.tags.iter().map(|tag| tag.as_str()).collect();
    ensure!(tags == ["@main", "#88"], "branch and issue tags, got {tags:?}");
    ensure!(bug.description.is_empty(), "null body imported as empty");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moved_comment_updates_reference_in_place(harness: Harness) -> Result<(), eyre::Report> {
    let service = harness.service();
    let first = ImportTodoCommentsRequest::new(
        "backend",
        "main",
        vec![comment(CommentKind::Fixme, "flaky", "timing", "src/a.rs", 3)],
    );
    service.import_todo_comments(&first).await?;
    let original = harness.task_titled("flaky").await?;

    let second = ImportTodoCommentsRequest::new(
        "backend",
        "main",
        vec![comment(CommentKind::Fixme, "flaky", "timing", "src/b.rs", 90)],
    );
    let report = service.import_todo_comments(&second).await?;

    ensure!(report.updated() == 1 && report.created() == 0, "one update");
    let refreshed = harness.task_titled("flaky").await?;
    ensure!(refreshed.id == original.id, "same task");
    ensure!(refreshed.reference == "src/b.rs:90", "reference moved");
    ensure!(refreshed.tags == original.tags, "tags untouched");
    ensure!(harness.tasks().await?.len() == 1, "no duplicate task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_reported(harness: Harness) -> Result<(), eyre::Report> {
    let request = ImportTodoCommentsRequest::new("frontend", "main", Vec::new());

    let result = harness.service().import_todo_comments(&request).await;

    ensure!(
        matches!(&result, Err(ImportError::ProjectNotFound(name)) if name == "frontend"),
        "expected project not found, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restricted_project_refuses_non_members(harness: Harness) -> Result<(), eyre::Report> {
    harness
        .tracker
        .restrict_project(harness.project_id, ["alice"])?;
    let comments = vec![comment(CommentKind::Todo, "a", "b", "src/x.rs", 1)];
    let service = harness.service();

    let refused = ImportTodoCommentsRequest::new("backend", "main", comments.clone())
        .with_author("mallory");
    let result = service.import_todo_comments(&refused).await;
    ensure!(
        matches!(result, Err(ImportError::Unauthorized(_))),
        "expected unauthorized, got {result:?}"
    );
    ensure!(harness.tasks().await?.is_empty(), "nothing written");

    let allowed = ImportTodoCommentsRequest::new("backend", "main", comments).with_author("alice");
    let report = service.import_todo_comments(&allowed).await?;
    ensure!(report.created() == 1, "member import succeeds");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dry_run_reports_without_writing(harness: Harness) -> Result<(), eyre::Report> {
    let request = ImportTodoCommentsRequest::from_json_str(REQUEST)?;

    let report = harness
        .service_with(ImportConfig::default().with_dry_run(true))
        .import_todo_comments(&request)
        .await?;

    ensure!(report.is_dry_run(), "report flags dry run");
    ensure!(report.created() == 2, "creations still counted");
    ensure!(
        report
            .outcomes()
            .iter()
            .all(|outcome| matches!(outcome, ItemOutcome::Created { task_id: None, .. })),
        "no identifiers assigned"
    );
    ensure!(harness.tasks().await?.is_empty(), "no task written");
    ensure!(
        harness.tracker.list(harness.project_id).await?.is_empty(),
        "no category written"
    );
    Ok(())
}
