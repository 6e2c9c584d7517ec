use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub todos_table: String,
    pub attachment_bucket: String,
    pub signed_url_expiration_secs: u64,
    pub aws_region: String,
    /// DynamoDB Local などローカル開発用のエンドポイント上書き
    pub dynamodb_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            todos_table: env::var("TODOS_TABLE").unwrap_or_else(|_| "todos-dev".to_string()),
            attachment_bucket: env::var("ATTACHMENT_S3_BUCKET")
                .unwrap_or_else(|_| "todos-attachments-dev".to_string()),
            signed_url_expiration_secs: env::var("SIGNED_URL_EXPIRATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT").ok(),
        }
    }
}
