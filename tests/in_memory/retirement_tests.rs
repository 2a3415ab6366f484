//! Retirement tests against the in-memory tracker.

use super::helpers::{Harness, comment, harness};
use eyre::ensure;
use rstest::rstest;
use tdg_sync::backlog::{
    adapters::memory::SeedTask,
    config::ImportConfig,
    domain::{CommentKind, ItemOutcome, SkipReason},
    ports::RetirePlacement,
    services::ImportTodoCommentsRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolved_comment_moves_to_last_column(harness: Harness) -> Result<(), eyre::Report> {
    let service = harness.service();
    let keep = comment(CommentKind::Todo, "keep", "still here", "src/a.rs", 1);
    let gone = comment(CommentKind::Hack, "gone", "fixed now", "src/a.rs", 9);
    service
        .import_todo_comments(&ImportTodoCommentsRequest::new(
            "backend",
            "feature/x",
            vec![keep.clone(), gone],
        ))
        .await?;

    let report = service
        .import_todo_comments(&ImportTodoCommentsRequest::new(
            "backend",
            "feature/x",
            vec![keep],
        ))
        .await?;

    ensure!(report.updated() == 1 && report.retired() == 1, "one kept, one retired");
    let columns = harness.tracker.column_ids(harness.project_id)?;
    let done = columns.last().copied().ok_or_else(|| eyre::eyre!("project has columns"))?;
    ensure!(harness.task_titled("gone").await?.column_id == done, "retired task is done");
    ensure!(harness.task_titled("keep").await?.column_id != done, "kept task stays");

    let rerun = service
        .import_todo_comments(&ImportTodoCommentsRequest::new("backend", "feature/x", Vec::new()))
        .await?;
    ensure!(rerun.retired() == 1, "only the open task is retired again");
    ensure!(
        rerun.outcomes().iter().any(|outcome| matches!(
            outcome,
            ItemOutcome::Skipped {
                reason: SkipReason::AlreadyRetired,
                ..
            }
        )),
        "done task reported as already retired"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_from_other_branches_stay_open(harness: Harness) -> Result<(), eyre::Report> {
    harness.tracker.seed_task(
        harness.project_id,
        SeedTask::new("theirs", "written elsewhere").with_tags(["@release"]),
    )?;
    harness
        .tracker
        .seed_task(harness.project_id, SeedTask::new("manual", "no tags"))?;

    let report = harness
        .service()
        .import_todo_comments(&ImportTodoCommentsRequest::new("backend", "main", Vec::new()))
        .await?;

    ensure!(report.retired() == 0, "nothing retired");
    ensure!(report.skipped() == 0, "ownership mismatch is not a failure");
    ensure!(report.outcomes().len() == 2, "both tasks reported");
    ensure!(
        report.outcomes().iter().all(|outcome| matches!(
            outcome,
            ItemOutcome::Skipped {
                reason: SkipReason::BranchNotOwned,
                ..
            }
        )),
        "ownership is the reason"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn append_placement_puts_retired_task_last(harness: Harness) -> Result<(), eyre::Report> {
    harness.tracker.seed_task(
        harness.project_id,
        SeedTask::new("finished", "earlier").in_column(2),
    )?;
    harness.tracker.seed_task(
        harness.project_id,
        SeedTask::new("finished too", "earlier").in_column(2),
    )?;
    let open = harness.tracker.seed_task(
        harness.project_id,
        SeedTask::new("open", "owned").with_tags(["@main"]),
    )?;

    let config = ImportConfig::default().with_retire_placement(RetirePlacement::Append);
    let report = harness
        .service_with(config)
        .import_todo_comments(&ImportTodoCommentsRequest::new("backend", "main", Vec::new()))
        .await?;

    ensure!(report.retired() == 1, "owned task retired");
    let moved = harness
        .tracker
        .task(open)?
        .ok_or_else(|| eyre::eyre!("task exists"))?;
    ensure!(moved.position == 3, "appended after two done tasks, got {}", moved.position);
    Ok(())
}
