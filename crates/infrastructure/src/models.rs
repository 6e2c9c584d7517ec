use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use domain::{TodoId, TodoItem, TodoUpdate};

pub(crate) fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Option<TodoItem> {
    Some(TodoItem {
        user_id: item.get("userId")?.as_s().ok()?.clone(),
        todo_id: TodoId::from_string(item.get("todoId")?.as_s().ok()?.clone()),
        name: item.get("name")?.as_s().ok()?.clone(),
        due_date: item.get("dueDate")?.as_s().ok()?.clone(),
        done: *item.get("done")?.as_bool().ok()?,
        created_at: item.get("createdAt")?.as_s().ok()?.clone(),
        attachment_url: item.get("attachmentUrl")?.as_s().ok()?.clone(),
    })
}

pub(crate) fn item_to_update(item: &HashMap<String, AttributeValue>) -> Option<TodoUpdate> {
    Some(TodoUpdate {
        name: item.get("name")?.as_s().ok()?.clone(),
        due_date: item.get("dueDate")?.as_s().ok()?.clone(),
        done: *item.get("done")?.as_bool().ok()?,
    })
}
