//! JSON-file task store.
//!
//! Task definitions are persisted to `tasks.json` (see
//! [`tickler_dirs::tasks_file`](crate::tickler_dirs::tasks_file)) with a
//! schema version. A missing file loads as an empty store.

use crate::error::{Result, TicklerError};
use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Persisted store state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    /// Schema version.
    #[serde(default = "default_state_version")]
    version: u8,
    /// Persisted tasks.
    #[serde(default)]
    tasks: Vec<Task>,
}

fn default_state_version() -> u8 {
    1
}

/// In-memory task collection backed by an optional JSON file.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    path: Option<PathBuf>,
}

impl TaskStore {
    /// Open the store at `path`, loading existing tasks if the file exists.
    ///
    /// # Errors
    /// Returns [`TicklerError::Store`] if the file exists but cannot be read or
    /// parsed, or holds a task that fails validation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tasks = load_tasks_from_path(&path)?;
        debug!("loaded {} tasks from {}", tasks.len(), path.display());
        Ok(Self {
            tasks,
            path: Some(path),
        })
    }

    /// A store that never touches disk.
    #[must_use]
    pub fn in_memory(tasks: Vec<Task>) -> Self {
        Self { tasks, path: None }
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by ID.
    #[must_use]
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Find the unique task whose ID starts with `prefix`.
    ///
    /// # Errors
    /// Returns [`TicklerError::Store`] when no task or several tasks match.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<&Task> {
        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task),
            (None, _) => Err(TicklerError::Store(format!("no task matches '{prefix}'"))),
            (Some(_), Some(_)) => Err(TicklerError::Store(format!(
                "task id prefix '{prefix}' is ambiguous"
            ))),
        }
    }

    /// Add (or replace) a task after validating it.
    ///
    /// # Errors
    /// Returns [`TicklerError::Validation`] if the task is inconsistent.
    pub fn upsert(&mut self, task: Task) -> Result<()> {
        task.validate()?;
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        } else {
            self.tasks.push(task);
        }
        Ok(())
    }

    /// Remove a task by ID. Returns the removed task when found.
    pub fn remove(&mut self, task_id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == task_id)?;
        Some(self.tasks.remove(index))
    }

    /// Mark a task completed or open. Returns `true` when found.
    pub fn set_completed(&mut self, task_id: &str, completed: bool) -> bool {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.completed = completed;
            return true;
        }
        false
    }

    /// Persist all tasks. A no-op for in-memory stores.
    ///
    /// # Errors
    /// Returns [`TicklerError::Store`] if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        save_tasks_to_path(path, &self.tasks)?;
        info!("saved {} tasks to {}", self.tasks.len(), path.display());
        Ok(())
    }
}

fn load_tasks_from_path(path: &Path) -> Result<Vec<Task>> {
    let bytes = match std::fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(TicklerError::Store(format!("cannot read tasks: {e}"))),
    };

    let state: StoreState = serde_json::from_slice(&bytes)
        .map_err(|e| TicklerError::Store(format!("cannot parse tasks: {e}")))?;

    if state.version > default_state_version() {
        return Err(TicklerError::Store(format!(
            "task file version {} is newer than supported version {}",
            state.version,
            default_state_version()
        )));
    }

    for task in &state.tasks {
        task.validate().map_err(|e| {
            warn!("rejecting task file {}: task {} is invalid", path.display(), task.id);
            TicklerError::Store(format!("task {} is invalid: {e}", task.id))
        })?;
    }

    Ok(state.tasks)
}

fn save_tasks_to_path(path: &Path, tasks: &[Task]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| TicklerError::Store(format!("cannot create store dir: {e}")))?;
    }

    let state = StoreState {
        version: default_state_version(),
        tasks: tasks.to_vec(),
    };

    let json = serde_json::to_string_pretty(&state)
        .map_err(|e| TicklerError::Store(format!("cannot serialize tasks: {e}")))?;

    std::fs::write(path, json)
        .map_err(|e| TicklerError::Store(format!("cannot write tasks: {e}")))?;

    Ok(())
}
