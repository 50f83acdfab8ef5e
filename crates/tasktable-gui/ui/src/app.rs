mod storage;

use chrono::Local;
use tasktable_shared::editor::{
  RowEffect,
  RowEvent,
  handle_row_event
};
use tasktable_shared::form::{
  AddTaskForm,
  FormField,
  SubmitOutcome
};
use tasktable_shared::ids::TimestampIds;
use tasktable_shared::{
  FilterMode,
  Task,
  TaskId,
  TaskStore,
  filter_tasks
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

use self::storage::LocalStorageBackend;
use crate::components::{
  AddTaskPopup,
  Header,
  TaskTable
};

#[function_component(App)]
pub fn app() -> Html {
  let store = use_mut_ref(|| {
    TaskStore::open(
      LocalStorageBackend,
      Box::new(TimestampIds::default())
    )
  });
  let tasks = {
    let store = store.clone();
    use_state(move || {
      store.borrow().tasks().to_vec()
    })
  };
  let filter =
    use_state(FilterMode::default);
  let form =
    use_state(AddTaskForm::default);

  {
    let store = store.clone();
    let tasks = tasks.clone();
    use_effect_with((), move |_| {
      store.borrow_mut().subscribe(
        move |all: &[Task]| {
          tasks.set(all.to_vec())
        }
      );
      tracing::debug!(
        "subscribed view to task store"
      );
      || ()
    });
  }

  let on_filter = {
    let filter = filter.clone();
    Callback::from(
      move |mode: FilterMode| {
        tracing::debug!(%mode, "filter changed");
        filter.set(mode);
      }
    )
  };

  let on_row_event = {
    let store = store.clone();
    Callback::from(
      move |(id, event): (
        TaskId,
        RowEvent
      )| {
        let mut store =
          store.borrow_mut();
        match handle_row_event(
          &mut *store,
          id,
          event
        ) {
          | Ok(effect) => effect,
          | Err(error) => {
            tracing::error!(
              id,
              error = %format!("{error:#}"),
              "failed applying row edit"
            );
            RowEffect::default()
          }
        }
      }
    )
  };

  let on_delete = {
    let store = store.clone();
    Callback::from(move |id: TaskId| {
      if let Err(error) =
        store.borrow_mut().remove(id)
      {
        tracing::error!(
          id,
          error = %format!("{error:#}"),
          "failed deleting task"
        );
      }
    })
  };

  let on_open_form = {
    let form = form.clone();
    Callback::from(move |_| {
      let mut next = (*form).clone();
      next.open();
      form.set(next);
    })
  };

  let on_form_field = {
    let form = form.clone();
    Callback::from(
      move |(field, value): (
        FormField,
        String
      )| {
        let mut next = (*form).clone();
        next.set_field(field, value);
        form.set(next);
      }
    )
  };

  let on_form_submit = {
    let form = form.clone();
    let store = store.clone();
    Callback::from(move |()| {
      let mut next = (*form).clone();
      let outcome = next.submit(
        &mut *store.borrow_mut()
      );
      match outcome {
        | Ok(SubmitOutcome::Added(id)) => {
          tracing::info!(id, "task added from form");
        }
        | Ok(SubmitOutcome::Invalid(
          errors
        )) => {
          tracing::debug!(
            failed = errors.len(),
            "add form has errors"
          );
        }
        | Err(error) => {
          tracing::error!(
            error = %format!("{error:#}"),
            "failed adding task"
          );
        }
      }
      form.set(next);
    })
  };

  let on_form_close = {
    let form = form.clone();
    Callback::from(move |()| {
      let mut next = (*form).clone();
      next.cancel();
      form.set(next);
    })
  };

  let visible: Vec<Task> =
    filter_tasks(&tasks, *filter)
      .into_iter()
      .cloned()
      .collect();
  let today = Local::now().date_naive();

  html! {
      <div class="app">
          <Header filter={*filter} on_filter={on_filter} />
          <TaskTable
              tasks={visible}
              today={today}
              on_row_event={on_row_event}
              on_delete={on_delete}
          />
          <div class="add-btn-container">
              <button class="add-btn" onclick={on_open_form}>
                  { "Добавить задачу" }
              </button>
          </div>
          <AddTaskPopup
              form={(*form).clone()}
              on_field={on_form_field}
              on_submit={on_form_submit}
              on_close={on_form_close}
          />
      </div>
  }
}
