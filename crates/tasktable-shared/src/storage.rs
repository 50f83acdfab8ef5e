use std::collections::{
  BTreeMap,
  BTreeSet
};

use anyhow::{
  Context,
  bail
};
use tracing::{
  debug,
  warn
};

use crate::task::{
  Task,
  seed_tasks
};

/// Key the whole collection is stored
/// under.
pub const TASKS_STORAGE_KEY: &str =
  "tasktable.tasks";

/// A synchronous string key/value
/// store: browser local storage, a data
/// directory, or plain memory.
pub trait StorageBackend {
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries: BTreeMap<String, String>
}

impl MemoryStorage {
  pub fn with_entry(
    key: &str,
    value: &str
  ) -> Self {
    let mut entries = BTreeMap::new();
    entries.insert(
      key.to_string(),
      value.to_string()
    );
    Self { entries }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<&str> {
    self
      .entries
      .get(key)
      .map(String::as_str)
  }
}

impl StorageBackend for MemoryStorage {
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.entries.get(key).cloned())
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self.entries.insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum LoadSource {
  Stored,
  SeedMissing,
  SeedUnreadable
}

pub fn encode_tasks(
  tasks: &[Task]
) -> anyhow::Result<String> {
  serde_json::to_string(tasks)
    .context("failed to encode tasks")
}

/// Decodes a stored collection. Blank
/// titles and repeated ids are treated
/// as corruption, same as bad JSON.
pub fn decode_tasks(
  raw: &str
) -> anyhow::Result<Vec<Task>> {
  let tasks: Vec<Task> =
    serde_json::from_str(raw)
      .context(
        "failed to parse stored tasks"
      )?;

  let mut seen = BTreeSet::new();
  for task in &tasks {
    if !seen.insert(task.id) {
      bail!(
        "duplicate task id {} in \
         stored tasks",
        task.id
      );
    }
    if task.title.trim().is_empty() {
      bail!(
        "task {} has an empty title",
        task.id
      );
    }
  }

  Ok(tasks)
}

/// Reads the stored collection, falling
/// back to the seed tasks when nothing
/// is stored or it cannot be read.
#[tracing::instrument(skip(backend))]
pub fn load_or_seed<B>(
  backend: &B
) -> (Vec<Task>, LoadSource)
where
  B: StorageBackend + ?Sized
{
  let raw = match backend
    .read(TASKS_STORAGE_KEY)
  {
    | Ok(Some(raw)) => raw,
    | Ok(None) => {
      debug!(
        key = TASKS_STORAGE_KEY,
        "no stored tasks; using seed"
      );
      return (
        seed_tasks(),
        LoadSource::SeedMissing
      );
    }
    | Err(error) => {
      warn!(
        error = %format!("{error:#}"),
        "failed reading stored tasks; \
         using seed"
      );
      return (
        seed_tasks(),
        LoadSource::SeedUnreadable
      );
    }
  };

  match decode_tasks(&raw) {
    | Ok(tasks) => {
      debug!(
        count = tasks.len(),
        "loaded stored tasks"
      );
      (tasks, LoadSource::Stored)
    }
    | Err(error) => {
      warn!(
        error = %format!("{error:#}"),
        "discarding unreadable stored \
         tasks; using seed"
      );
      (
        seed_tasks(),
        LoadSource::SeedUnreadable
      )
    }
  }
}
