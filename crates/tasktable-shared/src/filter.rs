use std::fmt;

use crate::task::{
  Task,
  TaskStatus
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum FilterMode {
  #[default]
  All,
  Active,
  Completed
}

impl FilterMode {
  pub const ALL: [FilterMode; 3] = [
    FilterMode::All,
    FilterMode::Active,
    FilterMode::Completed
  ];

  /// Unrecognized modes fall back to
  /// `All`.
  pub fn parse(raw: &str) -> Self {
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "active" => FilterMode::Active,
      | "completed" => {
        FilterMode::Completed
      }
      | _ => FilterMode::All
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | FilterMode::All => "all",
      | FilterMode::Active => "active",
      | FilterMode::Completed => {
        "completed"
      }
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | FilterMode::All => "Все задачи",
      | FilterMode::Active => {
        "Активные задачи"
      }
      | FilterMode::Completed => {
        "Выполненные задачи"
      }
    }
  }

  pub fn matches(
    self,
    task: &Task
  ) -> bool {
    match self {
      | FilterMode::All => true,
      | FilterMode::Active => {
        task.status
          == TaskStatus::Active
      }
      | FilterMode::Completed => {
        matches!(
          task.status,
          TaskStatus::Completed
            | TaskStatus::Cancelled
        )
      }
    }
  }
}

impl fmt::Display for FilterMode {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

pub fn filter_tasks(
  tasks: &[Task],
  mode: FilterMode
) -> Vec<&Task> {
  tasks
    .iter()
    .filter(|task| mode.matches(task))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::{
    FilterMode,
    filter_tasks
  };
  use crate::task::{
    Task,
    TaskStatus
  };

  fn task(
    id: u64,
    status: TaskStatus
  ) -> Task {
    Task {
      id,
      title: format!("task {id}"),
      status,
      deadline: "2026-03-01".to_string()
    }
  }

  fn sample() -> Vec<Task> {
    vec![
      task(1, TaskStatus::Cancelled),
      task(2, TaskStatus::Active),
      task(3, TaskStatus::Completed),
      task(4, TaskStatus::Active),
    ]
  }

  fn ids(tasks: &[&Task]) -> Vec<u64> {
    tasks
      .iter()
      .map(|task| task.id)
      .collect()
  }

  #[test]
  fn all_keeps_order() {
    let tasks = sample();
    assert_eq!(
      ids(&filter_tasks(
        &tasks,
        FilterMode::All
      )),
      vec![1, 2, 3, 4]
    );
  }

  #[test]
  fn active_keeps_only_active() {
    let tasks = sample();
    assert_eq!(
      ids(&filter_tasks(
        &tasks,
        FilterMode::Active
      )),
      vec![2, 4]
    );
  }

  #[test]
  fn completed_includes_cancelled() {
    let tasks = sample();
    assert_eq!(
      ids(&filter_tasks(
        &tasks,
        FilterMode::Completed
      )),
      vec![1, 3]
    );
  }

  #[test]
  fn active_and_completed_partition_all()
  {
    let tasks = sample();
    let active = filter_tasks(
      &tasks,
      FilterMode::Active
    )
    .len();
    let done = filter_tasks(
      &tasks,
      FilterMode::Completed
    )
    .len();
    assert_eq!(
      active + done,
      tasks.len()
    );
  }

  #[test]
  fn unknown_mode_is_all() {
    assert_eq!(
      FilterMode::parse("archived"),
      FilterMode::All
    );
    assert_eq!(
      FilterMode::parse(" Active "),
      FilterMode::Active
    );
  }
}
