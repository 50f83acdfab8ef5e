use anyhow::anyhow;
use chrono::NaiveDate;
use tasktable_shared::editor::{RowEvent, handle_row_event};
use tasktable_shared::form::{AddTaskForm, FormField, SubmitOutcome};
use tasktable_shared::storage::StorageBackend;
use tasktable_shared::{FilterMode, TaskId, TaskStatus, TaskStore, filter_tasks};
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::Config;
use crate::render::Renderer;

/// What a command did, for the exit code
/// and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed(usize),
    Added(TaskId),
    Rejected,
    Updated(bool),
    Shown,
}

#[tracing::instrument(skip(store, cfg, renderer))]
pub fn dispatch<B: StorageBackend>(
    store: &mut TaskStore<B>,
    cfg: &Config,
    renderer: &Renderer,
    command: Command,
    today: NaiveDate,
) -> anyhow::Result<Outcome> {
    match command {
        Command::List { filter } => {
            let mode = filter
                .as_deref()
                .map(FilterMode::parse)
                .unwrap_or(cfg.default_filter);
            let visible = filter_tasks(store.tasks(), mode);
            info!(%mode, shown = visible.len(), total = store.len(), "listing tasks");
            renderer.print_task_table(&visible, today)?;
            Ok(Outcome::Listed(visible.len()))
        }
        Command::Add {
            title,
            status,
            deadline,
        } => {
            let mut form = AddTaskForm::default();
            form.open();
            form.set_field(FormField::Title, title);
            form.set_field(FormField::Status, status);
            form.set_field(FormField::Deadline, deadline);

            match form.submit(store)? {
                SubmitOutcome::Added(id) => {
                    renderer.print_notice(&format!("Добавлена задача {id}"))?;
                    Ok(Outcome::Added(id))
                }
                SubmitOutcome::Invalid(errors) => {
                    renderer.print_form_errors(&errors)?;
                    Ok(Outcome::Rejected)
                }
            }
        }
        Command::Title { id, title } => {
            require_task(store, id)?;
            let effect = handle_row_event(store, id, RowEvent::TitleBlur(title))?;
            if let Some(previous) = effect.reset_title {
                warn!(id, "empty title rejected");
                renderer.print_notice(&format!(
                    "Описание не может быть пустым; оставлено: {previous}"
                ))?;
                return Ok(Outcome::Rejected);
            }
            Ok(Outcome::Updated(true))
        }
        Command::Status { id, status } => {
            require_task(store, id)?;
            if TaskStatus::parse_input(&status).is_none() {
                warn!(id, status = %status, "ignoring unknown status");
                renderer.print_notice(&format!("Неизвестный статус: {status}"))?;
                return Ok(Outcome::Rejected);
            }
            handle_row_event(store, id, RowEvent::StatusChange(status))?;
            Ok(Outcome::Updated(true))
        }
        Command::Deadline { id, deadline } => {
            require_task(store, id)?;
            handle_row_event(store, id, RowEvent::DeadlineChange(deadline))?;
            Ok(Outcome::Updated(true))
        }
        Command::Delete { id } => {
            let removed = store.remove(id)?;
            if !removed {
                renderer.print_notice(&format!("Задача {id} не найдена"))?;
            }
            Ok(Outcome::Updated(removed))
        }
        Command::Show { id } => {
            let task = require_task(store, id)?;
            renderer.print_task_info(task, today)?;
            Ok(Outcome::Shown)
        }
    }
}

fn require_task<B: StorageBackend>(
    store: &TaskStore<B>,
    id: TaskId,
) -> anyhow::Result<&tasktable_shared::Task> {
    store.get(id).ok_or_else(|| anyhow!("task not found: {id}"))
}
