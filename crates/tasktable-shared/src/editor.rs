use crate::storage::StorageBackend;
use crate::store::{
  TaskStore,
  TitleEdit
};
use crate::task::TaskId;

/// Input coming from one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
  TitleBlur(String),
  TitleKey {
    key:   String,
    value: String
  },
  StatusChange(String),
  DeadlineChange(String)
}

/// What the view has to do to the row
/// after an event was handled.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct RowEffect {
  pub reset_title: Option<String>,
  pub blur_title:  bool
}

impl RowEffect {
  fn from_title_edit(
    edit: TitleEdit
  ) -> Self {
    match edit {
      | TitleEdit::Rejected {
        previous
      } => {
        Self {
          reset_title: Some(previous),
          blur_title:  false
        }
      }
      | _ => Self::default()
    }
  }
}

/// Applies a row event to the store.
/// Blur and Enter share the title
/// commit rule; Enter also drops focus.
pub fn handle_row_event<B>(
  store: &mut TaskStore<B>,
  id: TaskId,
  event: RowEvent
) -> anyhow::Result<RowEffect>
where
  B: StorageBackend
{
  match event {
    | RowEvent::TitleBlur(value) => {
      let edit =
        store.update_title(id, &value)?;
      Ok(RowEffect::from_title_edit(edit))
    }
    | RowEvent::TitleKey {
      key,
      value
    } => {
      if key != "Enter" {
        return Ok(RowEffect::default());
      }
      let edit =
        store.update_title(id, &value)?;
      Ok(RowEffect {
        blur_title: true,
        ..RowEffect::from_title_edit(edit)
      })
    }
    | RowEvent::StatusChange(value) => {
      store.update_status(id, &value)?;
      Ok(RowEffect::default())
    }
    | RowEvent::DeadlineChange(value) => {
      store.update_deadline(id, &value)?;
      Ok(RowEffect::default())
    }
  }
}
