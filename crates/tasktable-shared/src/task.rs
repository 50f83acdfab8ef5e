use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{
  Deserialize,
  Serialize
};

pub type TaskId = u64;

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
pub enum TaskStatus {
  #[serde(
    rename = "Активная задача",
    alias = "active"
  )]
  Active,
  #[serde(
    rename = "Задача выполнена",
    alias = "completed"
  )]
  Completed,
  #[serde(
    rename = "Задача отменена",
    alias = "cancelled"
  )]
  Cancelled
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 3] = [
    TaskStatus::Active,
    TaskStatus::Completed,
    TaskStatus::Cancelled
  ];

  pub fn label(self) -> &'static str {
    match self {
      | TaskStatus::Active => {
        "Активная задача"
      }
      | TaskStatus::Completed => {
        "Задача выполнена"
      }
      | TaskStatus::Cancelled => {
        "Задача отменена"
      }
    }
  }

  pub fn css_class(
    self
  ) -> &'static str {
    match self {
      | TaskStatus::Active => {
        "status-active"
      }
      | TaskStatus::Completed => {
        "status-completed"
      }
      | TaskStatus::Cancelled => {
        "status-cancelled"
      }
    }
  }

  /// Background used by the add form's status picker.
  pub fn form_color(
    self
  ) -> &'static str {
    match self {
      | TaskStatus::Active => "#FFDADA",
      | TaskStatus::Completed => {
        "#d4ffda"
      }
      | TaskStatus::Cancelled => {
        "#fff9d4"
      }
    }
  }

  /// Parses a select/CLI value. Blank
  /// input is `None`, as is anything
  /// that is not one of the three
  /// statuses.
  pub fn parse_input(
    raw: &str
  ) -> Option<Self> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return None;
    }

    Self::ALL
      .into_iter()
      .find(|status| {
        status.label() == trimmed
      })
      .or_else(|| {
        match trimmed
          .to_ascii_lowercase()
          .as_str()
        {
          | "active" => {
            Some(TaskStatus::Active)
          }
          | "completed" | "done" => {
            Some(TaskStatus::Completed)
          }
          | "cancelled" | "canceled" => {
            Some(TaskStatus::Cancelled)
          }
          | _ => None
        }
      })
  }
}

impl fmt::Display for TaskStatus {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for TaskStatus {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    Self::parse_input(s).ok_or_else(
      || anyhow!("unknown task status: {s}")
    )
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  pub id:       TaskId,
  pub title:    String,
  pub status:   TaskStatus,
  pub deadline: String
}

/// A validated task that has not been
/// assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
  pub title:    String,
  pub status:   TaskStatus,
  pub deadline: String
}

impl NewTask {
  pub fn into_task(
    self,
    id: TaskId
  ) -> Task {
    Task {
      id,
      title: self.title,
      status: self.status,
      deadline: self.deadline
    }
  }
}

/// Example tasks shown on first start
/// or when stored data is unreadable.
pub fn seed_tasks() -> Vec<Task> {
  vec![
    Task {
      id:       1,
      title:    "Выполнить ЛР7"
        .to_string(),
      status:   TaskStatus::Active,
      deadline: "2025-02-18".to_string()
    },
    Task {
      id:       2,
      title:    "Сдать курсач по БД"
        .to_string(),
      status:   TaskStatus::Completed,
      deadline: "2026-02-27".to_string()
    },
    Task {
      id:       3,
      title:    "Найти работу"
        .to_string(),
      status:   TaskStatus::Cancelled,
      deadline: "2023-02-27".to_string()
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::{
    TaskStatus,
    seed_tasks
  };

  #[test]
  fn status_serializes_as_label() {
    let json = serde_json::to_string(
      &TaskStatus::Completed
    )
    .expect("serialize status");
    assert_eq!(
      json,
      "\"Задача выполнена\""
    );
  }

  #[test]
  fn status_accepts_english_alias() {
    let status: TaskStatus =
      serde_json::from_str(
        "\"cancelled\""
      )
      .expect("alias decodes");
    assert_eq!(
      status,
      TaskStatus::Cancelled
    );
  }

  #[test]
  fn parse_input_rejects_blank_and_unknown()
  {
    assert_eq!(
      TaskStatus::parse_input("   "),
      None
    );
    assert_eq!(
      TaskStatus::parse_input("later"),
      None
    );
    assert_eq!(
      TaskStatus::parse_input(
        " Активная задача "
      ),
      Some(TaskStatus::Active)
    );
    assert_eq!(
      TaskStatus::parse_input("Done"),
      Some(TaskStatus::Completed)
    );
  }

  #[test]
  fn seed_ids_are_unique() {
    let seed = seed_tasks();
    assert_eq!(seed.len(), 3);
    let mut ids: Vec<_> = seed
      .iter()
      .map(|task| task.id)
      .collect();
    ids.dedup();
    assert_eq!(ids, vec![1, 2, 3]);
  }
}
