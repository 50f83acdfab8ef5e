use chrono::NaiveDate;
use tasktable_shared::editor::{
  RowEffect,
  RowEvent
};
use tasktable_shared::layout::delete_column_height;
use tasktable_shared::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskRow;

#[derive(Properties, PartialEq)]
pub struct TaskTableProps {
  pub tasks:        Vec<Task>,
  pub today:        NaiveDate,
  pub on_row_event:
    Callback<(TaskId, RowEvent), RowEffect>,
  pub on_delete:    Callback<TaskId>
}

#[function_component(TaskTable)]
pub fn task_table(
  props: &TaskTableProps
) -> Html {
  let column_height = format!(
    "height: {}px;",
    delete_column_height(
      props.tasks.len()
    )
  );

  html! {
      <div class="table-wrapper">
          <table class="task-table">
              <thead>
                  <tr>
                      <th>{ "Описание" }</th>
                      <th>{ "Статус" }</th>
                      <th>{ "Дедлайн" }</th>
                  </tr>
              </thead>
              <tbody>
                  {
                      if props.tasks.is_empty() {
                          html! {
                              <tr>
                                  <td colspan="3" class="empty-message">
                                      { "Нет задач для отображения" }
                                  </td>
                              </tr>
                          }
                      } else {
                          html! {
                              <>
                                  {
                                      for props.tasks.iter().cloned().map(|task| html! {
                                          <TaskRow
                                              key={task.id.to_string()}
                                              task={task}
                                              today={props.today}
                                              on_row_event={props.on_row_event.clone()}
                                          />
                                      })
                                  }
                              </>
                          }
                      }
                  }
              </tbody>
          </table>
          <div class="delete-buttons-container" style={column_height}>
              {
                  for props.tasks.iter().map(|task| {
                      let id = task.id;
                      let on_delete = props.on_delete.clone();
                      html! {
                          <div key={format!("delete-{id}")} class="delete-btn-wrapper">
                              <button
                                  class="delete-btn"
                                  title="Удалить задачу"
                                  onclick={move |_| on_delete.emit(id)}
                              >
                                  { "🗑️" }
                              </button>
                          </div>
                      }
                  })
              }
          </div>
      </div>
  }
}
