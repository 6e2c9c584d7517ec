use infrastructure::{AttachmentStore, TodoStore};
use lambda_http::{Body, Request, RequestExt, Response};

use crate::error::ApiError;
use crate::handlers;

pub async fn route(
    req: Request,
    store: &TodoStore,
    attachments: &AttachmentStore,
) -> Result<Response<Body>, lambda_http::Error> {
    let path = req.uri().path().to_string();
    let method = req.method().as_str().to_string();

    tracing::info!(path = %path, method = %method, "Incoming request");

    let result = match route_inner(req, store, attachments, &path, &method).await {
        Ok(mut resp) => {
            add_cors_headers(&mut resp);
            resp
        }
        Err(e) => {
            tracing::error!(error = %e, "Request failed");
            let mut resp = e.into_response();
            add_cors_headers(&mut resp);
            resp
        }
    };

    Ok(result)
}

async fn route_inner(
    req: Request,
    store: &TodoStore,
    attachments: &AttachmentStore,
    path: &str,
    method: &str,
) -> Result<Response<Body>, ApiError> {
    if method == "OPTIONS" {
        return Ok(Response::builder().status(204).body(Body::Empty).unwrap());
    }

    let user_id = extract_principal(&req)?;

    match (method, path) {
        ("GET", "/todos") => handlers::list_todos(store, &user_id).await,
        ("POST", "/todos") => handlers::create_todo(req, store, &user_id).await,
        (_, p) if p.starts_with("/todos/") => {
            let rest = &p[7..];
            if rest.is_empty() {
                return Err(ApiError::BadRequest("Missing todo ID".to_string()));
            }

            if let Some(todo_id) = rest.strip_suffix("/attachment") {
                if todo_id.is_empty() {
                    return Err(ApiError::BadRequest("Missing todo ID".to_string()));
                }
                return match method {
                    "POST" => handlers::upload_url(attachments, todo_id).await,
                    _ => Err(ApiError::NotFound),
                };
            }

            match method {
                "PATCH" => handlers::update_todo(req, store, &user_id, rest).await,
                "DELETE" => handlers::delete_todo(store, &user_id, rest).await,
                _ => Err(ApiError::NotFound),
            }
        }
        _ => Err(ApiError::NotFound),
    }
}

fn extract_principal(req: &Request) -> Result<String, ApiError> {
    let context = req.request_context_ref();

    // REST API with a custom TOKEN authorizer carries the principal in the
    // authorizer fields of the request context
    if let Some(lambda_http::request::RequestContext::ApiGatewayV1(ctx)) = context {
        if let Some(principal) = ctx
            .authorizer
            .get("principalId")
            .and_then(|v| v.as_str())
        {
            return Ok(principal.to_string());
        }
    }

    Err(ApiError::Unauthorized(
        "Missing authorizer principal".to_string(),
    ))
}

fn add_cors_headers(resp: &mut Response<Body>) {
    let headers = resp.headers_mut();
    headers.insert("Access-Control-Allow-Origin", "*".parse().unwrap());
    headers.insert(
        "Access-Control-Allow-Methods",
        "GET,POST,PATCH,DELETE,OPTIONS".parse().unwrap(),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        "Content-Type,Authorization".parse().unwrap(),
    );
}
