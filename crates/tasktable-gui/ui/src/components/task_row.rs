use chrono::NaiveDate;
use tasktable_shared::editor::{
  RowEffect,
  RowEvent
};
use tasktable_shared::expiry::is_deadline_expired;
use tasktable_shared::{
  Task,
  TaskId,
  TaskStatus
};
use web_sys::{
  FocusEvent,
  HtmlInputElement,
  HtmlSelectElement,
  KeyboardEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task:         Task,
  pub today:        NaiveDate,
  pub on_row_event:
    Callback<(TaskId, RowEvent), RowEffect>
}

fn apply_effect(
  input: &HtmlInputElement,
  effect: RowEffect
) {
  if let Some(previous) =
    effect.reset_title
  {
    input.set_value(&previous);
  }
  if effect.blur_title
    && let Err(error) = input.blur()
  {
    tracing::warn!(
      ?error,
      "failed to blur title input"
    );
  }
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let id = props.task.id;
  let status = props.task.status;
  let expired = is_deadline_expired(
    &props.task.deadline,
    status,
    props.today
  );

  let on_title_blur = {
    let on_row_event =
      props.on_row_event.clone();
    Callback::from(
      move |e: FocusEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        let effect = on_row_event.emit((
          id,
          RowEvent::TitleBlur(
            input.value()
          )
        ));
        apply_effect(&input, effect);
      }
    )
  };

  let on_title_key = {
    let on_row_event =
      props.on_row_event.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() != "Enter" {
          return;
        }
        let input: HtmlInputElement =
          e.target_unchecked_into();
        let effect = on_row_event.emit((
          id,
          RowEvent::TitleKey {
            key:   e.key(),
            value: input.value()
          }
        ));
        apply_effect(&input, effect);
      }
    )
  };

  let on_status_change = {
    let on_row_event =
      props.on_row_event.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: HtmlSelectElement =
          e.target_unchecked_into();
        on_row_event.emit((
          id,
          RowEvent::StatusChange(
            select.value()
          )
        ));
      }
    )
  };

  let on_deadline_change = {
    let on_row_event =
      props.on_row_event.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_row_event.emit((
          id,
          RowEvent::DeadlineChange(
            input.value()
          )
        ));
      }
    )
  };

  let deadline_style = if expired {
    "color: red; font-weight: bold;"
  } else {
    "color: inherit; font-weight: normal;"
  };

  html! {
      <tr class="task-row">
          <td>
              <input
                  type="text"
                  class="task-input"
                  data-id={id.to_string()}
                  value={props.task.title.clone()}
                  onblur={on_title_blur}
                  onkeypress={on_title_key}
              />
          </td>
          <td>
              <select
                  class={format!("status-dropdown {}", status.css_class())}
                  onchange={on_status_change}
              >
                  {
                      for TaskStatus::ALL.into_iter().map(|option| html! {
                          <option
                              value={option.label()}
                              class={option.css_class()}
                              selected={option == status}
                          >
                              { option.label() }
                          </option>
                      })
                  }
              </select>
          </td>
          <td>
              <input
                  type="date"
                  class="date-input"
                  value={props.task.deadline.clone()}
                  style={deadline_style}
                  onchange={on_deadline_change}
              />
          </td>
      </tr>
  }
}
