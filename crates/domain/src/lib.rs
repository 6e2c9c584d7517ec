pub mod todo;

pub use todo::{CreateTodoRequest, TodoId, TodoItem, TodoUpdate};
