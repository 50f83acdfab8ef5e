mod add_task_popup;
mod header;
mod task_row;
mod task_table;

pub use add_task_popup::AddTaskPopup;
pub use header::Header;
pub use task_row::TaskRow;
pub use task_table::TaskTable;
