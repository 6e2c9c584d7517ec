use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item. `(user_id, todo_id)` is the table key; all other
/// attributes are plain data. Serialized attribute names are camelCase to
/// match the stored item format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub user_id: String,
    pub todo_id: TodoId,
    pub name: String,
    pub due_date: String,
    pub done: bool,
    pub created_at: String,
    pub attachment_url: String,
}

impl TodoItem {
    /// Assembles a freshly created item: the client supplies `name` and
    /// `dueDate`, the server supplies everything else. `created_at` is the
    /// creation instant in epoch milliseconds, stored as a string.
    pub fn new(
        user_id: &str,
        todo_id: TodoId,
        input: CreateTodoRequest,
        attachment_url: String,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            todo_id,
            name: input.name,
            due_date: input.due_date,
            done: false,
            created_at: Utc::now().timestamp_millis().to_string(),
            attachment_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: String,
}

/// The updatable subset of an item. Doubles as the PATCH request body and as
/// the post-update result returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub name: String,
    pub due_date: String,
    pub done: bool,
}
