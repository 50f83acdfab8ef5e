use std::collections::BTreeMap;

use tracing::debug;

use crate::storage::StorageBackend;
use crate::store::TaskStore;
use crate::task::{
  NewTask,
  TaskId,
  TaskStatus
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
)]
pub enum FormField {
  Title,
  Status,
  Deadline
}

impl FormField {
  pub const ALL: [FormField; 3] = [
    FormField::Title,
    FormField::Status,
    FormField::Deadline
  ];

  pub fn label(self) -> &'static str {
    match self {
      | FormField::Title => "Описание",
      | FormField::Status => "Статус",
      | FormField::Deadline => "Дедлайн"
    }
  }

  pub fn required_message(
    self
  ) -> &'static str {
    match self {
      | FormField::Title => {
        "Введите описание задачи"
      }
      | FormField::Status => {
        "Выберите статус"
      }
      | FormField::Deadline => {
        "Укажите дедлайн"
      }
    }
  }
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskDraft {
  pub title:    String,
  pub status:   String,
  pub deadline: String
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct FormErrors {
  by_field: BTreeMap<FormField, String>
}

impl FormErrors {
  pub fn get(
    &self,
    field: FormField
  ) -> Option<&str> {
    self
      .by_field
      .get(&field)
      .map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.by_field.is_empty()
  }

  pub fn len(&self) -> usize {
    self.by_field.len()
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = (FormField, &str)>
  {
    self
      .by_field
      .iter()
      .map(|(field, message)| {
        (*field, message.as_str())
      })
  }

  fn insert(
    &mut self,
    field: FormField
  ) {
    self.by_field.insert(
      field,
      field
        .required_message()
        .to_string()
    );
  }

  fn clear_field(
    &mut self,
    field: FormField
  ) {
    self.by_field.remove(&field);
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  Added(TaskId),
  Invalid(FormErrors)
}

/// Draft state behind the "add task"
/// popup.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct AddTaskForm {
  open:   bool,
  draft:  TaskDraft,
  errors: FormErrors
}

impl AddTaskForm {
  pub fn open(&mut self) {
    self.open = true;
  }

  pub fn is_open(&self) -> bool {
    self.open
  }

  pub fn draft(&self) -> &TaskDraft {
    &self.draft
  }

  pub fn errors(&self) -> &FormErrors {
    &self.errors
  }

  /// Editing a field clears its error.
  pub fn set_field(
    &mut self,
    field: FormField,
    value: impl Into<String>
  ) {
    let value = value.into();
    match field {
      | FormField::Title => {
        self.draft.title = value
      }
      | FormField::Status => {
        self.draft.status = value
      }
      | FormField::Deadline => {
        self.draft.deadline = value
      }
    }
    self.errors.clear_field(field);
  }

  pub fn selected_status(
    &self
  ) -> Option<TaskStatus> {
    TaskStatus::parse_input(
      &self.draft.status
    )
  }

  pub fn status_color(
    &self
  ) -> &'static str {
    self
      .selected_status()
      .map(TaskStatus::form_color)
      .unwrap_or("white")
  }

  /// Checks every field independently
  /// and reports all failures at once.
  pub fn validate(
    &self
  ) -> Result<NewTask, FormErrors> {
    let mut errors =
      FormErrors::default();

    if self.draft.title.trim().is_empty()
    {
      errors.insert(FormField::Title);
    }
    let status = self.selected_status();
    if status.is_none() {
      errors.insert(FormField::Status);
    }
    if self
      .draft
      .deadline
      .trim()
      .is_empty()
    {
      errors
        .insert(FormField::Deadline);
    }

    match status {
      | Some(status)
        if errors.is_empty() =>
      {
        Ok(NewTask {
          title: self.draft.title.clone(),
          status,
          deadline: self
            .draft
            .deadline
            .clone()
        })
      }
      | _ => Err(errors)
    }
  }

  /// Adds the draft to `store`. Nothing
  /// is committed when any field fails.
  ///
  /// A failed write still leaves the task
  /// in the store, so the draft is
  /// cleared whenever the collection grew.
  pub fn submit<B: StorageBackend>(
    &mut self,
    store: &mut TaskStore<B>
  ) -> anyhow::Result<SubmitOutcome> {
    match self.validate() {
      | Ok(task) => {
        let before = store.len();
        let added = store.add(task);
        if store.len() > before {
          self.reset();
        }
        added.map(SubmitOutcome::Added)
      }
      | Err(errors) => {
        debug!(
          failed = errors.len(),
          "add form rejected"
        );
        self.errors = errors.clone();
        Ok(SubmitOutcome::Invalid(errors))
      }
    }
  }

  pub fn cancel(&mut self) {
    self.reset();
  }

  fn reset(&mut self) {
    *self = Self::default();
  }
}

#[cfg(test)]
mod tests {
  use super::{
    AddTaskForm,
    FormField,
    SubmitOutcome,
    TaskDraft
  };
  use crate::filter::{
    FilterMode,
    filter_tasks
  };
  use crate::ids::SequentialIds;
  use crate::storage::{
    MemoryStorage,
    StorageBackend
  };
  use crate::store::TaskStore;

  struct QuotaExceeded;

  impl StorageBackend for QuotaExceeded {
    fn read(
      &self,
      _key: &str
    ) -> anyhow::Result<Option<String>> {
      Ok(None)
    }

    fn write(
      &mut self,
      _key: &str,
      _value: &str
    ) -> anyhow::Result<()> {
      anyhow::bail!("quota exceeded")
    }
  }

  fn store() -> TaskStore<MemoryStorage> {
    TaskStore::open(
      MemoryStorage::default(),
      Box::new(SequentialIds::default())
    )
  }

  fn filled() -> AddTaskForm {
    let mut form = AddTaskForm::default();
    form.open();
    form.set_field(
      FormField::Title,
      "Submit report"
    );
    form.set_field(
      FormField::Status,
      "Задача выполнена"
    );
    form.set_field(
      FormField::Deadline,
      "2026-11-01"
    );
    form
  }

  #[test]
  fn empty_submit_reports_every_field() {
    let mut store = store();
    let mut form = AddTaskForm::default();
    form.open();

    let outcome = form
      .submit(&mut store)
      .expect("submit");
    let SubmitOutcome::Invalid(errors) =
      outcome
    else {
      panic!("expected invalid form");
    };

    assert_eq!(errors.len(), 3);
    for field in FormField::ALL {
      assert_eq!(
        errors.get(field),
        Some(field.required_message())
      );
    }
    assert_eq!(store.len(), 3);
    assert!(form.is_open());
  }

  #[test]
  fn single_missing_field_blocks_submit() {
    let mut store = store();
    let mut form = filled();
    form.set_field(
      FormField::Deadline,
      ""
    );

    let outcome = form
      .submit(&mut store)
      .expect("submit");
    assert!(matches!(
      outcome,
      SubmitOutcome::Invalid(ref errors)
        if errors.len() == 1
          && errors
            .get(FormField::Deadline)
            .is_some()
    ));
    assert_eq!(store.len(), 3);
  }

  #[test]
  fn editing_field_clears_its_error() {
    let mut store = store();
    let mut form = AddTaskForm::default();
    form.open();
    form
      .submit(&mut store)
      .expect("submit");

    form.set_field(
      FormField::Title,
      "x"
    );
    assert!(
      form
        .errors()
        .get(FormField::Title)
        .is_none()
    );
    assert!(
      form
        .errors()
        .get(FormField::Status)
        .is_some()
    );
  }

  #[test]
  fn valid_submit_adds_and_closes() {
    let mut store = store();
    let mut form = filled();

    let outcome = form
      .submit(&mut store)
      .expect("submit");
    let SubmitOutcome::Added(id) =
      outcome
    else {
      panic!("expected added task");
    };

    assert_eq!(store.len(), 4);
    assert!(!form.is_open());
    assert!(form.errors().is_empty());
    assert_eq!(
      form.draft(),
      &TaskDraft::default()
    );

    let done = filter_tasks(
      store.tasks(),
      FilterMode::Completed
    );
    assert!(done.iter().any(|t| t.id == id));
  }

  #[test]
  fn failed_write_still_clears_draft() {
    let mut store = TaskStore::open(
      QuotaExceeded,
      Box::new(SequentialIds::default())
    );
    let mut form = filled();

    assert!(form.submit(&mut store).is_err());
    assert_eq!(store.len(), 4);
    assert!(!form.is_open());
    assert_eq!(
      form.draft(),
      &TaskDraft::default()
    );

    let outcome = form
      .submit(&mut store)
      .expect("submit");
    assert!(matches!(
      outcome,
      SubmitOutcome::Invalid(_)
    ));
    let copies = store
      .tasks()
      .iter()
      .filter(|t| t.title == "Submit report")
      .count();
    assert_eq!(copies, 1);
  }

  #[test]
  fn cancel_discards_draft() {
    let mut store = store();
    let mut form = filled();
    form.cancel();

    assert!(!form.is_open());
    assert!(form.draft().title.is_empty());
    assert_eq!(store.len(), 3);
    assert!(
      matches!(
        form.submit(&mut store),
        Ok(SubmitOutcome::Invalid(_))
      )
    );
  }

  #[test]
  fn status_color_tracks_selection() {
    let mut form = AddTaskForm::default();
    assert_eq!(
      form.status_color(),
      "white"
    );
    form.set_field(
      FormField::Status,
      "Активная задача"
    );
    assert_eq!(
      form.status_color(),
      "#FFDADA"
    );
  }
}
