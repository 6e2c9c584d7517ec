use infrastructure::{AttachmentStore, DynamoDbClient, TodoStore};
use lambda_http::{run, service_fn, Error, Request};
use shared::{init_tracing, Config};

mod error;
mod handlers;
mod router;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing()?;

    let config = Config::from_env();
    let db = DynamoDbClient::new(&config).await;
    let store = TodoStore::new(db, config.attachment_bucket.clone());
    let attachments = AttachmentStore::new(&config).await;

    run(service_fn(move |req: Request| {
        let store = store.clone();
        let attachments = attachments.clone();
        async move { router::route(req, &store, &attachments).await }
    }))
    .await
}
