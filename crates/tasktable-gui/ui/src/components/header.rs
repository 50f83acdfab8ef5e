use tasktable_shared::FilterMode;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
  pub filter:    FilterMode,
  pub on_filter: Callback<FilterMode>
}

#[function_component(Header)]
pub fn header(
  props: &HeaderProps
) -> Html {
  let make_button = |mode: FilterMode| {
    let class = if props.filter == mode {
      "filter-btn active"
    } else {
      "filter-btn"
    };
    let on_filter =
      props.on_filter.clone();
    html! {
        <button class={class} onclick={move |_| on_filter.emit(mode)}>
            { mode.label() }
        </button>
    }
  };

  html! {
      <header class="header">
          <div class="filters">
              { make_button(FilterMode::All) }
              { make_button(FilterMode::Active) }
          </div>
          <div class="right-filter">
              { make_button(FilterMode::Completed) }
          </div>
      </header>
  }
}
