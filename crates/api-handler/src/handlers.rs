use domain::{CreateTodoRequest, TodoUpdate};
use infrastructure::{AttachmentStore, TodoStore};
use lambda_http::{Body, Request, Response};

use crate::error::ApiError;

fn json_response(status: u16, body: &impl serde::Serialize) -> Result<Response<Body>, ApiError> {
    let json = serde_json::to_string(body).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(json))
        .unwrap())
}

fn read_body(req: &Request) -> Result<String, ApiError> {
    match req.body() {
        Body::Text(s) => Ok(s.clone()),
        Body::Binary(b) => String::from_utf8(b.to_vec())
            .map_err(|_| ApiError::BadRequest("Invalid UTF-8".to_string())),
        Body::Empty => Err(ApiError::BadRequest("Empty body".to_string())),
    }
}

pub async fn list_todos(store: &TodoStore, user_id: &str) -> Result<Response<Body>, ApiError> {
    let items = store.list_todos(user_id).await?;
    json_response(200, &serde_json::json!({ "items": items }))
}

pub async fn create_todo(
    req: Request,
    store: &TodoStore,
    user_id: &str,
) -> Result<Response<Body>, ApiError> {
    let input: CreateTodoRequest = serde_json::from_str(&read_body(&req)?)?;

    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name cannot be empty".to_string()));
    }

    let item = store.create_todo(user_id, input).await?;
    json_response(201, &serde_json::json!({ "item": item }))
}

pub async fn update_todo(
    req: Request,
    store: &TodoStore,
    user_id: &str,
    todo_id: &str,
) -> Result<Response<Body>, ApiError> {
    let update: TodoUpdate = serde_json::from_str(&read_body(&req)?)?;

    let item = store.update_todo(user_id, todo_id, update).await?;
    json_response(200, &serde_json::json!({ "item": item }))
}

pub async fn delete_todo(
    store: &TodoStore,
    user_id: &str,
    todo_id: &str,
) -> Result<Response<Body>, ApiError> {
    store.delete_todo(user_id, todo_id).await?;
    Ok(Response::builder().status(204).body(Body::Empty).unwrap())
}

pub async fn upload_url(
    attachments: &AttachmentStore,
    todo_id: &str,
) -> Result<Response<Body>, ApiError> {
    let url = attachments.upload_url(todo_id).await?;
    json_response(200, &serde_json::json!({ "uploadUrl": url }))
}
