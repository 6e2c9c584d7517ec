use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use domain::{CreateTodoRequest, TodoId, TodoItem, TodoUpdate};
use thiserror::Error;
use tracing::info;

use crate::models::{item_to_todo, item_to_update};
use crate::DynamoDbClient;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("DynamoDB error: {0}")]
    DynamoDb(String),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Malformed item: {0}")]
    Malformed(String),
}

/// Thin facade over the todos table. Every operation is a single owner-scoped
/// request; no retries, no batching, no cross-item transactions.
#[derive(Clone)]
pub struct TodoStore {
    db: DynamoDbClient,
    attachment_bucket: String,
}

impl TodoStore {
    pub fn new(db: DynamoDbClient, attachment_bucket: impl Into<String>) -> Self {
        Self {
            db,
            attachment_bucket: attachment_bucket.into(),
        }
    }

    pub async fn list_todos(&self, user_id: &str) -> Result<Vec<TodoItem>, StoreError> {
        info!(user_id, "listing todos");

        let result = self
            .db
            .client()
            .query()
            .table_name(self.db.table_name())
            .key_condition_expression("userId = :userId")
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::DynamoDb(e.to_string()))?;

        let todos = result.items().iter().filter_map(item_to_todo).collect();

        Ok(todos)
    }

    pub async fn create_todo(
        &self,
        user_id: &str,
        input: CreateTodoRequest,
    ) -> Result<TodoItem, StoreError> {
        let todo_id = TodoId::new();
        let attachment_url = attachment_url(&self.attachment_bucket, todo_id.as_str());
        let todo = TodoItem::new(user_id, todo_id, input, attachment_url);

        info!(user_id, todo_id = %todo.todo_id, "creating todo");

        // Unconditional put: a same-key write overwrites the stored item.
        self.db
            .client()
            .put_item()
            .table_name(self.db.table_name())
            .item("userId", AttributeValue::S(todo.user_id.clone()))
            .item(
                "todoId",
                AttributeValue::S(todo.todo_id.as_str().to_string()),
            )
            .item("name", AttributeValue::S(todo.name.clone()))
            .item("dueDate", AttributeValue::S(todo.due_date.clone()))
            .item("done", AttributeValue::Bool(todo.done))
            .item("createdAt", AttributeValue::S(todo.created_at.clone()))
            .item(
                "attachmentUrl",
                AttributeValue::S(todo.attachment_url.clone()),
            )
            .send()
            .await
            .map_err(|e| StoreError::DynamoDb(e.to_string()))?;

        Ok(todo)
    }

    /// Overwrites exactly `name`, `dueDate` and `done` on an existing item.
    /// The key must already exist; updating an absent key fails with
    /// [`StoreError::NotFound`] instead of fabricating a partial item.
    pub async fn update_todo(
        &self,
        user_id: &str,
        todo_id: &str,
        update: TodoUpdate,
    ) -> Result<TodoUpdate, StoreError> {
        info!(user_id, todo_id, "updating todo");

        let result = self
            .db
            .client()
            .update_item()
            .table_name(self.db.table_name())
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .update_expression("SET #name = :name, #dueDate = :dueDate, #done = :done")
            .condition_expression("attribute_exists(userId)")
            .expression_attribute_names("#name", "name")
            .expression_attribute_names("#dueDate", "dueDate")
            .expression_attribute_names("#done", "done")
            .expression_attribute_values(":name", AttributeValue::S(update.name))
            .expression_attribute_values(":dueDate", AttributeValue::S(update.due_date))
            .expression_attribute_values(":done", AttributeValue::Bool(update.done))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| match e.as_service_error() {
                Some(se) if se.is_conditional_check_failed_exception() => {
                    StoreError::NotFound(todo_id.to_string())
                }
                _ => StoreError::DynamoDb(e.to_string()),
            })?;

        let attributes = result
            .attributes()
            .ok_or_else(|| StoreError::Malformed("update returned no attributes".to_string()))?;
        item_to_update(attributes)
            .ok_or_else(|| StoreError::Malformed("failed to parse updated item".to_string()))
    }

    /// Removes the item if present. Deleting an absent key is a no-op.
    pub async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<(), StoreError> {
        info!(user_id, todo_id, "deleting todo");

        self.db
            .client()
            .delete_item()
            .table_name(self.db.table_name())
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::DynamoDb(e.to_string()))?;

        Ok(())
    }
}

/// The attachment address is derived from the bucket and item id; nothing
/// checks that an object actually exists there.
fn attachment_url(bucket: &str, todo_id: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{todo_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_url_from_bucket_and_id() {
        assert_eq!(
            attachment_url("my-bucket", "abc-123"),
            "https://my-bucket.s3.amazonaws.com/abc-123"
        );
    }
}
