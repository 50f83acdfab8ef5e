use std::collections::BTreeSet;

use chrono::Utc;

use crate::task::{
  Task,
  TaskId
};

/// Hands out ids for new tasks. The
/// returned id must not collide with any
/// id in `existing`.
pub trait IdSource {
  fn next_id(
    &mut self,
    existing: &[Task]
  ) -> TaskId;
}

/// Millisecond creation timestamps,
/// bumped past any id already in use.
#[derive(Debug, Default)]
pub struct TimestampIds {
  last: TaskId
}

impl IdSource for TimestampIds {
  fn next_id(
    &mut self,
    existing: &[Task]
  ) -> TaskId {
    let now = TaskId::try_from(
      Utc::now().timestamp_millis()
    )
    .unwrap_or_default();
    let id = unique_from(
      now.max(
        self.last.saturating_add(1)
      ),
      existing
    );
    self.last = id;
    id
  }
}

/// Counter starting at a fixed value.
/// Deterministic, so tests use it.
#[derive(Debug)]
pub struct SequentialIds {
  next: TaskId
}

impl SequentialIds {
  pub fn starting_at(
    next: TaskId
  ) -> Self {
    Self { next }
  }
}

impl Default for SequentialIds {
  fn default() -> Self {
    Self::starting_at(1)
  }
}

impl IdSource for SequentialIds {
  fn next_id(
    &mut self,
    existing: &[Task]
  ) -> TaskId {
    let id =
      unique_from(self.next, existing);
    self.next = id.saturating_add(1);
    id
  }
}

fn unique_from(
  candidate: TaskId,
  existing: &[Task]
) -> TaskId {
  if existing
    .iter()
    .all(|task| task.id != candidate)
  {
    return candidate;
  }

  let max = existing
    .iter()
    .map(|task| task.id)
    .max()
    .unwrap_or(0);
  candidate
    .max(max)
    .checked_add(1)
    .unwrap_or_else(|| {
      smallest_free(existing)
    })
}

/// Lowest positive id not in use. Only
/// reached once the top of the range is
/// taken.
fn smallest_free(
  existing: &[Task]
) -> TaskId {
  let used: BTreeSet<TaskId> = existing
    .iter()
    .map(|task| task.id)
    .collect();
  (1..)
    .find(|id| !used.contains(id))
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::{
    IdSource,
    SequentialIds,
    TimestampIds
  };
  use crate::task::{
    Task,
    TaskId,
    TaskStatus,
    seed_tasks
  };

  fn with_ids(ids: &[TaskId]) -> Vec<Task> {
    ids
      .iter()
      .map(|&id| {
        Task {
          id,
          title: format!("task {id}"),
          status: TaskStatus::Active,
          deadline: "2026-11-01"
            .to_string()
        }
      })
      .collect()
  }

  #[test]
  fn sequential_skips_taken_ids() {
    let seed = seed_tasks();
    let mut ids = SequentialIds::default();
    let first = ids.next_id(&seed);
    assert_eq!(first, 4);
    assert_eq!(ids.next_id(&seed), 5);
  }

  #[test]
  fn timestamps_are_strictly_increasing()
  {
    let mut ids =
      TimestampIds::default();
    let a = ids.next_id(&[]);
    let b = ids.next_id(&[]);
    assert!(b > a);
  }

  #[test]
  fn top_of_range_falls_back_to_free_id()
  {
    let existing =
      with_ids(&[1, TaskId::MAX]);
    let mut ids = SequentialIds::default();
    assert_eq!(ids.next_id(&existing), 2);

    let mut ids =
      SequentialIds::starting_at(
        TaskId::MAX
      );
    assert_eq!(ids.next_id(&existing), 2);
    assert_eq!(
      ids.next_id(&with_ids(&[
        1,
        2,
        TaskId::MAX
      ])),
      3
    );
  }

  #[test]
  fn timestamps_survive_max_stored_id() {
    let existing =
      with_ids(&[TaskId::MAX]);
    let mut ids = TimestampIds {
      last: TaskId::MAX
    };
    assert_eq!(ids.next_id(&existing), 1);
    let next = ids.next_id(&existing);
    assert!(next > 1);
    assert_ne!(next, TaskId::MAX);
  }
}
