//! Then steps for comment import BDD scenarios.

use super::world::{ImportWorld, run_async};
use rstest_bdd_macros::then;
use tdg_sync::backlog::{
    domain::{ItemOutcome, SkipReason},
    ports::{BoardStore, TaskStore},
    services::ImportError,
};

#[then("the project has {count:usize} open task")]
fn project_has_open_task(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    assert_open_tasks(world, count)
}

#[then("the project has {count:usize} open tasks")]
fn project_has_open_tasks(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    assert_open_tasks(world, count)
}

fn assert_open_tasks(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let last_column = run_async(world.tracker.last_column_id(project_id))?;
    let open = run_async(world.tracker.list_all(project_id))?
        .into_iter()
        .filter(|task| task.column_id != last_column)
        .count();
    if open != count {
        return Err(eyre::eyre!("expected {count} open tasks, found {open}"));
    }
    Ok(())
}

#[then(r#"task "{title}" is tagged "{tag}""#)]
fn task_is_tagged(world: &ImportWorld, title: String, tag: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    if !task.tags.iter().any(|candidate| candidate.as_str() == tag) {
        return Err(eyre::eyre!("task '{title}' lacks tag {tag}: {:?}", task.tags));
    }
    Ok(())
}

#[then(r#"task "{title}" is in the last column"#)]
fn task_in_last_column(world: &ImportWorld, title: String) -> Result<(), eyre::Report> {
    if !is_in_last_column(world, &title)? {
        return Err(eyre::eyre!("task '{title}' was not retired"));
    }
    Ok(())
}

#[then(r#"task "{title}" is not in the last column"#)]
fn task_not_in_last_column(world: &ImportWorld, title: String) -> Result<(), eyre::Report> {
    if is_in_last_column(world, &title)? {
        return Err(eyre::eyre!("task '{title}' was retired"));
    }
    Ok(())
}

fn is_in_last_column(world: &ImportWorld, title: &str) -> Result<bool, eyre::Report> {
    let task = world.task_titled(title)?;
    let last_column = run_async(world.tracker.last_column_id(world.project_id()?))?;
    Ok(task.column_id == last_column)
}

#[then("the report shows {count:usize} {counter}")]
fn report_counter(world: &ImportWorld, count: usize, counter: String) -> Result<(), eyre::Report> {
    let report = world.report()?;
    let actual = match counter.as_str() {
        "created" => report.created(),
        "updated" => report.updated(),
        "retired" => report.retired(),
        "skipped" => report.skipped(),
        other => return Err(eyre::eyre!("unknown report counter '{other}'")),
    };
    if actual != count {
        return Err(eyre::eyre!("expected {count} {counter}, found {actual}"));
    }
    Ok(())
}

#[then("{count:usize} task is left to the branch that owns it")]
fn tasks_left_to_owner(world: &ImportWorld, count: usize) -> Result<(), eyre::Report> {
    let left = world
        .report()?
        .outcomes()
        .iter()
        .filter(|outcome| {
            matches!(
                outcome,
                ItemOutcome::Skipped {
                    reason: SkipReason::BranchNotOwned,
                    ..
                }
            )
        })
        .count();
    if left != count {
        return Err(eyre::eyre!(
            "expected {count} tasks owned by another branch, found {left}"
        ));
    }
    Ok(())
}

#[then("the import fails because the project is unknown")]
fn import_fails_unknown_project(world: &ImportWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing import result in scenario world"))?;
    if !matches!(result, Err(ImportError::ProjectNotFound(_))) {
        return Err(eyre::eyre!("expected project not found, got {result:?}"));
    }
    Ok(())
}
