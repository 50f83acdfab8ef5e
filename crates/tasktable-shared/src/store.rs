use anyhow::{
  Context,
  ensure
};
use tracing::{
  debug,
  info
};

use crate::ids::IdSource;
use crate::storage::{
  LoadSource,
  StorageBackend,
  TASKS_STORAGE_KEY,
  encode_tasks,
  load_or_seed
};
use crate::task::{
  NewTask,
  Task,
  TaskId,
  TaskStatus
};

type Listener = Box<dyn Fn(&[Task])>;

/// Result of a title edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleEdit {
  Committed,
  Unchanged,
  /// Blank input. The field should show
  /// `previous` again.
  Rejected {
    previous: String
  },
  NotFound
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
  Add(NewTask),
  SetTitle {
    id:    TaskId,
    title: String
  },
  SetStatus {
    id:     TaskId,
    status: String
  },
  SetDeadline {
    id:       TaskId,
    deadline: String
  },
  Remove(TaskId)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
  Added(TaskId),
  Title(TitleEdit),
  Changed(bool)
}

/// Owns the task collection. Every
/// change is written back to the backend
/// in full and announced to subscribers.
pub struct TaskStore<B: StorageBackend> {
  tasks:       Vec<Task>,
  backend:     B,
  ids:         Box<dyn IdSource>,
  listeners:   Vec<Listener>,
  load_source: LoadSource
}

impl<B: StorageBackend> TaskStore<B> {
  #[tracing::instrument(skip_all)]
  pub fn open(
    backend: B,
    ids: Box<dyn IdSource>
  ) -> Self {
    let (tasks, load_source) =
      load_or_seed(&backend);
    info!(
      count = tasks.len(),
      ?load_source,
      "opened task store"
    );
    Self {
      tasks,
      backend,
      ids,
      listeners: Vec::new(),
      load_source
    }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn get(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn load_source(
    &self
  ) -> LoadSource {
    self.load_source
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  /// Registers a callback that receives
  /// the full collection after each
  /// change.
  pub fn subscribe<F>(
    &mut self,
    listener: F
  ) where
    F: Fn(&[Task]) + 'static
  {
    self
      .listeners
      .push(Box::new(listener));
  }

  #[tracing::instrument(skip(self, task), fields(title = %task.title))]
  pub fn add(
    &mut self,
    task: NewTask
  ) -> anyhow::Result<TaskId> {
    ensure!(
      !task.title.trim().is_empty(),
      "task title is required"
    );
    ensure!(
      !task.deadline.trim().is_empty(),
      "task deadline is required"
    );

    let id =
      self.ids.next_id(&self.tasks);
    self.tasks.push(task.into_task(id));
    info!(id, "added task");
    self.commit()?;
    Ok(id)
  }

  /// Blank or unknown statuses are
  /// ignored.
  #[tracing::instrument(skip(self))]
  pub fn update_status(
    &mut self,
    id: TaskId,
    status: &str
  ) -> anyhow::Result<bool> {
    let Some(status) =
      TaskStatus::parse_input(status)
    else {
      debug!("ignoring empty status");
      return Ok(false);
    };

    let Some(task) = self.find_mut(id)
    else {
      return Ok(false);
    };
    if task.status == status {
      return Ok(false);
    }
    task.status = status;
    info!(id, %status, "updated status");
    self.commit()?;
    Ok(true)
  }

  #[tracing::instrument(skip(self))]
  pub fn update_title(
    &mut self,
    id: TaskId,
    title: &str
  ) -> anyhow::Result<TitleEdit> {
    let Some(task) = self.find_mut(id)
    else {
      return Ok(TitleEdit::NotFound);
    };

    if title.trim().is_empty() {
      debug!(
        "rejected empty title; \
         keeping previous"
      );
      return Ok(TitleEdit::Rejected {
        previous: task.title.clone()
      });
    }
    if task.title == title {
      return Ok(TitleEdit::Unchanged);
    }

    task.title = title.to_string();
    info!(id, "updated title");
    self.commit()?;
    Ok(TitleEdit::Committed)
  }

  /// Deadlines are taken as-is.
  #[tracing::instrument(skip(self))]
  pub fn update_deadline(
    &mut self,
    id: TaskId,
    deadline: &str
  ) -> anyhow::Result<bool> {
    let Some(task) = self.find_mut(id)
    else {
      return Ok(false);
    };
    if task.deadline == deadline {
      return Ok(false);
    }
    task.deadline = deadline.to_string();
    info!(id, "updated deadline");
    self.commit()?;
    Ok(true)
  }

  #[tracing::instrument(skip(self))]
  pub fn remove(
    &mut self,
    id: TaskId
  ) -> anyhow::Result<bool> {
    let before = self.tasks.len();
    self
      .tasks
      .retain(|task| task.id != id);
    if self.tasks.len() == before {
      debug!(id, "no task to remove");
      return Ok(false);
    }
    info!(id, "removed task");
    self.commit()?;
    Ok(true)
  }

  pub fn dispatch(
    &mut self,
    action: TaskAction
  ) -> anyhow::Result<ActionOutcome> {
    match action {
      | TaskAction::Add(task) => {
        self
          .add(task)
          .map(ActionOutcome::Added)
      }
      | TaskAction::SetTitle {
        id,
        title
      } => {
        self
          .update_title(id, &title)
          .map(ActionOutcome::Title)
      }
      | TaskAction::SetStatus {
        id,
        status
      } => {
        self
          .update_status(id, &status)
          .map(ActionOutcome::Changed)
      }
      | TaskAction::SetDeadline {
        id,
        deadline
      } => {
        self
          .update_deadline(
            id, &deadline
          )
          .map(ActionOutcome::Changed)
      }
      | TaskAction::Remove(id) => {
        self
          .remove(id)
          .map(ActionOutcome::Changed)
      }
    }
  }

  fn find_mut(
    &mut self,
    id: TaskId
  ) -> Option<&mut Task> {
    self
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
  }

  fn commit(
    &mut self
  ) -> anyhow::Result<()> {
    for listener in &self.listeners {
      listener(&self.tasks);
    }

    let raw = encode_tasks(&self.tasks)?;
    self
      .backend
      .write(TASKS_STORAGE_KEY, &raw)
      .with_context(|| {
        format!(
          "failed to persist {} tasks",
          self.tasks.len()
        )
      })?;
    debug!(
      count = self.tasks.len(),
      bytes = raw.len(),
      "persisted tasks"
    );
    Ok(())
  }
}
