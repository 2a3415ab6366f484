//! Given steps for comment import BDD scenarios.

use super::world::ImportWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tdg_sync::backlog::adapters::memory::SeedTask;

#[given(r#"an empty "{name}" project"#)]
fn empty_project(world: &mut ImportWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world
        .tracker
        .add_project(&name, &["Backlog", "Doing", "Done"])
        .wrap_err("create scenario project")?;
    world.project_id = Some(project_id);
    Ok(())
}

#[given(r#"task "{title}" was imported from branch "{branch}""#)]
fn task_imported_from_branch(
    world: &mut ImportWorld,
    title: String,
    branch: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    world
        .tracker
        .seed_task(
            project_id,
            SeedTask::new(title, "imported earlier").with_tags([format!("@{branch}")]),
        )
        .wrap_err("seed imported task")?;
    Ok(())
}

#[given("dry run is enabled")]
fn dry_run_enabled(world: &mut ImportWorld) {
    world.config = world.config.clone().with_dry_run(true);
}
