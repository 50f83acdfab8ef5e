use tasktable_shared::TaskStatus;
use tasktable_shared::form::{
  AddTaskForm,
  FormField
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent,
  SubmitEvent
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
pub struct AddTaskPopupProps {
  pub form:      AddTaskForm,
  pub on_field:
    Callback<(FormField, String)>,
  pub on_submit: Callback<()>,
  pub on_close:  Callback<()>
}

fn field_error(
  form: &AddTaskForm,
  field: FormField
) -> Html {
  match form.errors().get(field) {
    | Some(message) => html! {
        <span class="error-message">{ message.to_string() }</span>
    },
    | None => html! {}
  }
}

#[function_component(AddTaskPopup)]
pub fn add_task_popup(
  props: &AddTaskPopupProps
) -> Html {
  if !props.form.is_open() {
    return html! {};
  }

  let draft = props.form.draft();

  let on_text_input =
    |field: FormField| {
      let on_field =
        props.on_field.clone();
      Callback::from(
        move |e: InputEvent| {
          let input: HtmlInputElement =
            e.target_unchecked_into();
          on_field
            .emit((field, input.value()));
        }
      )
    };

  let on_status_change = {
    let on_field =
      props.on_field.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: HtmlSelectElement =
          e.target_unchecked_into();
        on_field.emit((
          FormField::Status,
          select.value()
        ));
      }
    )
  };

  let on_submit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };

  let on_close = {
    let on_close =
      props.on_close.clone();
    Callback::from(move |_| {
      on_close.emit(())
    })
  };

  let status_style = format!(
    "background-color: {};",
    props.form.status_color()
  );
  let selected_status =
    props.form.selected_status();

  html! {
      <div class="popup-overlay">
          <div class="popup-content">
              <button class="close-btn" onclick={on_close}>{ "×" }</button>
              <h2>{ "Добавить новую задачу" }</h2>
              <form onsubmit={on_submit}>
                  <div class="form-group">
                      <label>{ FormField::Title.label() }</label>
                      <input
                          type="text"
                          class="form-input"
                          placeholder="Введите описание"
                          value={draft.title.clone()}
                          oninput={on_text_input(FormField::Title)}
                      />
                      { field_error(&props.form, FormField::Title) }
                  </div>
                  <div class="form-group">
                      <label>{ FormField::Status.label() }</label>
                      <select
                          class="form-select"
                          style={status_style}
                          onchange={on_status_change}
                      >
                          <option value="" selected={selected_status.is_none()}>
                              { "Выберите статус" }
                          </option>
                          {
                              for TaskStatus::ALL.into_iter().map(|option| html! {
                                  <option
                                      value={option.label()}
                                      class={option.css_class()}
                                      selected={selected_status == Some(option)}
                                  >
                                      { option.label() }
                                  </option>
                              })
                          }
                      </select>
                      { field_error(&props.form, FormField::Status) }
                  </div>
                  <div class="form-group">
                      <label>{ FormField::Deadline.label() }</label>
                      <input
                          type="date"
                          class="form-input"
                          value={draft.deadline.clone()}
                          oninput={on_text_input(FormField::Deadline)}
                      />
                      { field_error(&props.form, FormField::Deadline) }
                  </div>
                  <button type="submit" class="submit-btn">
                      { "Добавить задачу" }
                  </button>
              </form>
          </div>
      </div>
  }
}
