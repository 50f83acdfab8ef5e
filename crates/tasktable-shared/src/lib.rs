pub mod editor;
pub mod expiry;
pub mod filter;
pub mod form;
pub mod ids;
pub mod layout;
pub mod storage;
pub mod store;
pub mod task;

pub use filter::{
  FilterMode,
  filter_tasks
};
pub use store::{
  TaskAction,
  TaskStore,
  TitleEdit
};
pub use task::{
  NewTask,
  Task,
  TaskId,
  TaskStatus
};
