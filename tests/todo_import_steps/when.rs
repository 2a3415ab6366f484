//! When steps for comment import BDD scenarios.

use super::world::{ImportWorld, run_async};
use rstest_bdd_macros::when;
use tdg_sync::backlog::{
    domain::{Comment, CommentKind},
    services::ImportTodoCommentsRequest,
};

fn import(world: &mut ImportWorld, request: &ImportTodoCommentsRequest) {
    let result = run_async(world.service().import_todo_comments(request));
    world.last_result = Some(result);
}

#[when(r#"branch "{branch}" imports a TODO "{title}" in "{file}" at line {line:u32}"#)]
fn import_single_todo(
    world: &mut ImportWorld,
    branch: String,
    title: String,
    file: String,
    line: u32,
) {
    let comment = Comment::new(CommentKind::Todo, title, "found during scan").at(file, line);
    let request = ImportTodoCommentsRequest::new("backend", branch, vec![comment]);
    import(world, &request);
}

#[when(r#"branch "{branch}" imports no comments"#)]
fn import_nothing(world: &mut ImportWorld, branch: String) {
    let request = ImportTodoCommentsRequest::new("backend", branch, Vec::new());
    import(world, &request);
}

#[when(r#"branch "{branch}" imports no comments into "{project}""#)]
fn import_nothing_into(world: &mut ImportWorld, branch: String, project: String) {
    let request = ImportTodoCommentsRequest::new(project, branch, Vec::new());
    import(world, &request);
}
