//! Thread-safe in-memory task tracker.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::backlog::{
    domain::{
        CategoryId, ColorId, ColumnId, ProjectId, SwimlaneId, Task, TaskId, TaskTag, TaskValues,
    },
    ports::{
        BoardStore, Category, CategoryStore, ColorCatalog, MoveTaskRequest, Project,
        ProjectDirectory, StoreError, StoreResult, TaskStore, TaskValidation,
    },
};

/// Longest title the tracker accepts.
const MAX_TITLE_LENGTH: usize = 65_535;

/// Longest `file:line` reference the tracker accepts.
const MAX_REFERENCE_LENGTH: usize = 255;

/// Colors known to the tracker, as `(identifier, display name)`.
const DEFAULT_COLORS: [(&str, &str); 16] = [
    ("yellow", "Yellow"),
    ("blue", "Blue"),
    ("green", "Green"),
    ("purple", "Purple"),
    ("red", "Red"),
    ("orange", "Orange"),
    ("grey", "Grey"),
    ("brown", "Brown"),
    ("deep_orange", "Deep Orange"),
    ("dark_grey", "Dark Grey"),
    ("pink", "Pink"),
    ("teal", "Teal"),
    ("cyan", "Cyan"),
    ("lime", "Lime"),
    ("light_green", "Light Green"),
    ("amber", "Amber"),
];

/// Task placed on the board before a run, for tests and fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTask {
    title: String,
    description: String,
    reference: String,
    tags: Vec<String>,
    column: Option<usize>,
}

impl SeedTask {
    /// Creates a seed task in the first column with no tags.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            reference: String::new(),
            tags: Vec::new(),
            column: None,
        }
    }

    /// Sets the task tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the `file:line` reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Places the task in the column at `index` (zero-based).
    #[must_use]
    pub const fn in_column(mut self, index: usize) -> Self {
        self.column = Some(index);
        self
    }
}

#[derive(Debug)]
struct ProjectState {
    name: String,
    columns: Vec<ColumnId>,
    swimlane: SwimlaneId,
    members: Option<HashSet<String>>,
    categories: Vec<Category>,
}

#[derive(Debug, Default)]
struct TrackerState {
    projects: HashMap<ProjectId, ProjectState>,
    tasks: Vec<Task>,
}

impl TrackerState {
    fn project(&self, project_id: ProjectId) -> StoreResult<&ProjectState> {
        self.projects
            .get(&project_id)
            .ok_or_else(|| StoreError::not_found("project", project_id))
    }

    fn task_index(&self, task_id: TaskId) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or_else(|| StoreError::not_found("task", task_id))
    }

    fn count_in(&self, column_id: ColumnId, swimlane_id: SwimlaneId) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.column_id == column_id && task.swimlane_id == swimlane_id)
            .count()
    }

    /// Shifts positions in a column by `delta` for tasks at or after `from`.
    fn shift_positions(
        &mut self,
        column_id: ColumnId,
        swimlane_id: SwimlaneId,
        from: u32,
        delta: i64,
        skip: TaskId,
    ) {
        for task in &mut self.tasks {
            let in_lane = task.column_id == column_id && task.swimlane_id == swimlane_id;
            if in_lane && task.id != skip && task.position >= from {
                let shifted = i64::from(task.position).saturating_add(delta);
                task.position = u32::try_from(shifted.max(1)).unwrap_or(u32::MAX);
            }
        }
    }
}

/// In-memory task tracker implementing every reconciliation port.
///
/// Projects own an ordered list of workflow columns, a default swimlane and
/// their categories. Tasks are listed in creation order. Projects are open
/// to every author unless restricted with
/// [`InMemoryTracker::restrict_project`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTracker {
    state: Arc<RwLock<TrackerState>>,
}

impl InMemoryTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, TrackerState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, TrackerState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    /// Adds a project with the named workflow columns, in board order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] when the name is taken or no column
    /// is given.
    pub fn add_project(&self, name: &str, columns: &[&str]) -> StoreResult<ProjectId> {
        let mut state = self.write()?;
        if state.projects.values().any(|project| project.name == name) {
            return Err(StoreError::Rejected(format!("project '{name}' already exists")));
        }
        if columns.is_empty() {
            return Err(StoreError::Rejected(format!("project '{name}' needs a column")));
        }
        let project_id = ProjectId::new();
        state.projects.insert(
            project_id,
            ProjectState {
                name: name.to_owned(),
                columns: columns.iter().map(|_| ColumnId::new()).collect(),
                swimlane: SwimlaneId::new(),
                members: None,
                categories: Vec::new(),
            },
        );
        Ok(project_id)
    }

    /// Limits imports into `project_id` to the given authors.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the project does not exist.
    pub fn restrict_project<I, S>(&self, project_id: ProjectId, members: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.write()?;
        let project = state
            .projects
            .get_mut(&project_id)
            .ok_or_else(|| StoreError::not_found("project", project_id))?;
        project.members = Some(members.into_iter().map(Into::into).collect());
        Ok(())
    }

    /// Places a task on the board directly, bypassing validation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the project or column does not
    /// exist.
    pub fn seed_task(&self, project_id: ProjectId, seed: SeedTask) -> StoreResult<TaskId> {
        let mut state = self.write()?;
        let project = state.project(project_id)?;
        let column_index = seed.column.unwrap_or(0);
        let column_id = *project
            .columns
            .get(column_index)
            .ok_or_else(|| StoreError::not_found("column", column_index))?;
        let swimlane_id = project.swimlane;
        let tags = seed
            .tags
            .into_iter()
            .map(TaskTag::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreError::Rejected(err.to_string()))?;
        let position = next_position(state.count_in(column_id, swimlane_id));

        let task = Task {
            id: TaskId::new(),
            project_id,
            title: seed.title,
            description: seed.description,
            color_id: None,
            category_id: None,
            reference: seed.reference,
            tags,
            column_id,
            position,
            swimlane_id,
        };
        let task_id = task.id;
        state.tasks.push(task);
        Ok(task_id)
    }

    /// Returns a copy of the task, if it exists.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn task(&self, task_id: TaskId) -> StoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.iter().find(|task| task.id == task_id).cloned())
    }

    /// Returns the project's workflow columns in board order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the project does not exist.
    pub fn column_ids(&self, project_id: ProjectId) -> StoreResult<Vec<ColumnId>> {
        let state = self.read()?;
        Ok(state.project(project_id)?.columns.clone())
    }

    /// Adds an existing category to a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the project does not exist.
    pub fn seed_category(&self, project_id: ProjectId, name: &str) -> StoreResult<CategoryId> {
        let mut state = self.write()?;
        let project = state
            .projects
            .get_mut(&project_id)
            .ok_or_else(|| StoreError::not_found("project", project_id))?;
        let id = CategoryId::new();
        project.categories.push(Category {
            id,
            name: name.to_owned(),
        });
        Ok(id)
    }
}

fn next_position(count: usize) -> u32 {
    u32::try_from(count).map_or(u32::MAX, |value| value.saturating_add(1))
}

fn known_color(color_id: &ColorId) -> bool {
    DEFAULT_COLORS
        .iter()
        .any(|(id, _)| *id == color_id.as_str())
}

fn validation_errors(state: &TrackerState, values: &TaskValues) -> Vec<String> {
    let mut errors = Vec::new();
    let title_length = values.title.chars().count();
    if values.title.trim().is_empty() {
        errors.push("title is required".to_owned());
    } else if title_length > MAX_TITLE_LENGTH {
        errors.push(format!("title exceeds {MAX_TITLE_LENGTH} characters"));
    }
    if values.reference.chars().count() > MAX_REFERENCE_LENGTH {
        errors.push(format!("reference exceeds {MAX_REFERENCE_LENGTH} characters"));
    }
    if let Some(color_id) = &values.color_id
        && !known_color(color_id)
    {
        errors.push(format!("unknown color '{color_id}'"));
    }
    match state.projects.get(&values.project_id) {
        None => errors.push(format!("unknown project {}", values.project_id)),
        Some(project) => {
            if let Some(category_id) = values.category_id
                && !project.categories.iter().any(|category| category.id == category_id)
            {
                errors.push(format!("unknown category {category_id}"));
            }
        }
    }
    if let Some(task_id) = values.id
        && state.task_index(task_id).is_err()
    {
        errors.push(format!("unknown task {task_id}"));
    }
    errors
}

#[async_trait]
impl ProjectDirectory for InMemoryTracker {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Project>> {
        let state = self.read()?;
        Ok(state
            .projects
            .iter()
            .find(|(_, project)| project.name == name)
            .map(|(id, project)| Project {
                id: *id,
                name: project.name.clone(),
            }))
    }

    async fn authorize_import(&self, project_id: ProjectId, author: &str) -> StoreResult<()> {
        let state = self.read()?;
        let project = state.project(project_id)?;
        match &project.members {
            Some(members) if !members.contains(author) => Err(StoreError::Forbidden(format!(
                "'{author}' is not a member of '{}'",
                project.name
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl TaskStore for InMemoryTracker {
    async fn list_all(&self, project_id: ProjectId) -> StoreResult<Vec<Task>> {
        let state = self.read()?;
        state.project(project_id)?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn validate(&self, values: &TaskValues) -> StoreResult<TaskValidation> {
        let state = self.read()?;
        let errors = validation_errors(&state, values);
        if errors.is_empty() {
            Ok(TaskValidation::Valid)
        } else {
            Ok(TaskValidation::Invalid(errors))
        }
    }

    async fn create(&self, values: &TaskValues) -> StoreResult<TaskId> {
        let mut state = self.write()?;
        let project = state.project(values.project_id)?;
        let column_id = *project
            .columns
            .first()
            .ok_or_else(|| StoreError::not_found("column", values.project_id))?;
        let swimlane_id = project.swimlane;
        let position = next_position(state.count_in(column_id, swimlane_id));

        let task = Task {
            id: TaskId::new(),
            project_id: values.project_id,
            title: values.title.clone(),
            description: values.description.clone(),
            color_id: values.color_id.clone(),
            category_id: values.category_id,
            reference: values.reference.clone(),
            tags: values.tags.clone().unwrap_or_default(),
            column_id,
            position,
            swimlane_id,
        };
        let task_id = task.id;
        state.tasks.push(task);
        Ok(task_id)
    }

    async fn update(&self, values: &TaskValues) -> StoreResult<()> {
        let task_id = values
            .id
            .ok_or_else(|| StoreError::Rejected("update requires a task id".to_owned()))?;
        let mut state = self.write()?;
        let index = state.task_index(task_id)?;
        let task = state
            .tasks
            .get_mut(index)
            .ok_or_else(|| StoreError::not_found("task", task_id))?;
        task.title.clone_from(&values.title);
        task.description.clone_from(&values.description);
        task.reference.clone_from(&values.reference);
        if let Some(color_id) = &values.color_id {
            task.color_id = Some(color_id.clone());
        }
        if let Some(category_id) = values.category_id {
            task.category_id = Some(category_id);
        }
        if let Some(tags) = &values.tags {
            task.tags.clone_from(tags);
        }
        Ok(())
    }
}

#[async_trait]
impl BoardStore for InMemoryTracker {
    async fn last_column_id(&self, project_id: ProjectId) -> StoreResult<ColumnId> {
        let state = self.read()?;
        state
            .project(project_id)?
            .columns
            .last()
            .copied()
            .ok_or_else(|| StoreError::not_found("column", project_id))
    }

    async fn move_task(&self, request: &MoveTaskRequest) -> StoreResult<()> {
        let mut state = self.write()?;
        let project = state.project(request.project_id)?;
        if !project.columns.contains(&request.column_id) {
            return Err(StoreError::not_found("column", request.column_id));
        }
        let index = state.task_index(request.task_id)?;
        let Some(task) = state.tasks.get(index) else {
            return Err(StoreError::not_found("task", request.task_id));
        };
        let (source_column, source_lane, source_position) =
            (task.column_id, task.swimlane_id, task.position);

        state.shift_positions(source_column, source_lane, source_position, -1, request.task_id);

        let occupied = state.count_in(request.column_id, request.swimlane_id);
        let occupied = if source_column == request.column_id && source_lane == request.swimlane_id {
            occupied.saturating_sub(1)
        } else {
            occupied
        };
        let position = if request.append {
            next_position(occupied)
        } else {
            request.position.clamp(1, next_position(occupied))
        };
        state.shift_positions(request.column_id, request.swimlane_id, position, 1, request.task_id);

        let task = state
            .tasks
            .get_mut(index)
            .ok_or_else(|| StoreError::not_found("task", request.task_id))?;
        task.column_id = request.column_id;
        task.swimlane_id = request.swimlane_id;
        task.position = position;
        Ok(())
    }

    async fn tags_for_task(&self, task_id: TaskId) -> StoreResult<Vec<TaskTag>> {
        let state = self.read()?;
        let index = state.task_index(task_id)?;
        Ok(state
            .tasks
            .get(index)
            .map(|task| task.tags.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl CategoryStore for InMemoryTracker {
    async fn list(&self, project_id: ProjectId) -> StoreResult<Vec<Category>> {
        let state = self.read()?;
        Ok(state.project(project_id)?.categories.clone())
    }

    async fn create(&self, project_id: ProjectId, name: &str) -> StoreResult<Option<CategoryId>> {
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(StoreError::Rejected("category name is required".to_owned()));
        }
        let mut state = self.write()?;
        let project = state
            .projects
            .get_mut(&project_id)
            .ok_or_else(|| StoreError::not_found("project", project_id))?;
        if project.categories.iter().any(|category| category.name == normalized) {
            return Err(StoreError::Rejected(format!(
                "category '{normalized}' already exists"
            )));
        }
        let id = CategoryId::new();
        project.categories.push(Category {
            id,
            name: normalized.to_owned(),
        });
        Ok(Some(id))
    }
}

#[async_trait]
impl ColorCatalog for InMemoryTracker {
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<ColorId>> {
        let wanted = name.trim();
        DEFAULT_COLORS
            .iter()
            .find(|(id, display)| {
                id.eq_ignore_ascii_case(wanted) || display.eq_ignore_ascii_case(wanted)
            })
            .map(|(id, _)| ColorId::new(*id))
            .transpose()
            .map_err(|err| StoreError::Rejected(err.to_string()))
    }
}
