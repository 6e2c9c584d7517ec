use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use shared::{init_tracing, TokenVerifier};
use tracing::{info, warn};

/// TOKEN型カスタムオーソライザーのリクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct AuthorizerRequest {
    #[serde(rename = "type")]
    request_type: String,
    authorization_token: Option<String>,
    method_arn: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizerResponse {
    principal_id: String,
    policy_document: PolicyDocument,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyDocument {
    version: String,
    statement: Vec<Statement>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Statement {
    action: String,
    effect: String,
    resource: String,
}

/// 認証結果をIAMポリシーに変換する。検証失敗は固定プリンシパル "user" の
/// Denyに変換され、この関数自体がエラーを返すことはない。
async fn function_handler(
    verifier: &TokenVerifier,
    event: LambdaEvent<AuthorizerRequest>,
) -> Result<AuthorizerResponse, Error> {
    let request = event.payload;

    match verifier.verify_header(request.authorization_token.as_deref()) {
        Ok(payload) => {
            info!(sub = %payload.sub, method_arn = %request.method_arn, "user authorized");

            Ok(AuthorizerResponse {
                principal_id: payload.sub,
                policy_document: generate_policy("Allow"),
            })
        }
        Err(e) => {
            // 失敗理由はログにのみ残し、呼び出し元には返さない
            warn!(error = %e, method_arn = %request.method_arn, "user not authorized");

            Ok(AuthorizerResponse {
                principal_id: "user".to_string(),
                policy_document: generate_policy("Deny"),
            })
        }
    }
}

/// 単一ワイルドカードステートメントのIAMポリシードキュメントを生成
fn generate_policy(effect: &str) -> PolicyDocument {
    PolicyDocument {
        version: "2012-10-17".to_string(),
        statement: vec![Statement {
            action: "execute-api:Invoke".to_string(),
            effect: effect.to_string(),
            resource: "*".to_string(),
        }],
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing()?;

    // 検証キーは環境変数から注入される。キー不備は起動時エラーとし、
    // リクエスト処理中には到達させない。
    let public_key = std::env::var("JWT_PUBLIC_KEY")
        .map_err(|_| anyhow::anyhow!("JWT_PUBLIC_KEY 環境変数が設定されていません"))?;
    let verifier = TokenVerifier::new(&public_key)
        .map_err(|e| anyhow::anyhow!("検証キーの読み込みに失敗: {e}"))?;

    info!("Lambda Authorizer を開始中...");

    run(service_fn(move |event| {
        let verifier = verifier.clone();
        async move { function_handler(&verifier, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use lambda_runtime::Context;
    use serde_json::json;

    const TEST_PRIVATE_KEY: &str = include_str!("../testdata/test_rsa_private.pem");
    const TEST_PUBLIC_KEY: &str = include_str!("../testdata/test_rsa_public.pem");

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn sign_token(sub: &str) -> String {
        let key = EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY.as_bytes()).unwrap();
        let claims = TestClaims {
            sub: sub.to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap()
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(TEST_PUBLIC_KEY).unwrap()
    }

    fn request(token: Option<String>) -> LambdaEvent<AuthorizerRequest> {
        let payload = AuthorizerRequest {
            request_type: "TOKEN".to_string(),
            authorization_token: token,
            method_arn: "arn:aws:execute-api:us-east-1:123456789012:abcdef123/dev/GET/todos"
                .to_string(),
        };
        LambdaEvent::new(payload, Context::default())
    }

    fn effect_of(response: &AuthorizerResponse) -> &str {
        &response.policy_document.statement[0].effect
    }

    #[test]
    fn test_generate_policy() {
        let policy = generate_policy("Allow");

        assert_eq!(policy.version, "2012-10-17");
        assert_eq!(policy.statement.len(), 1);
        assert_eq!(policy.statement[0].effect, "Allow");
        assert_eq!(policy.statement[0].action, "execute-api:Invoke");
        assert_eq!(policy.statement[0].resource, "*");
    }

    #[test]
    fn test_authorizer_request_deserialization() {
        let json_input = json!({
            "type": "TOKEN",
            "authorizationToken": "Bearer eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9...",
            "methodArn": "arn:aws:execute-api:us-east-1:123456789012:abcdef123/dev/GET/todos"
        });

        let request: AuthorizerRequest = serde_json::from_value(json_input).unwrap();
        assert_eq!(request.request_type, "TOKEN");
        assert!(request.authorization_token.is_some());
    }

    #[tokio::test]
    async fn test_valid_token_allows_with_sub_principal() {
        let token = sign_token("auth0|user-42");

        let response = function_handler(&verifier(), request(Some(format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(response.principal_id, "auth0|user-42");
        assert_eq!(effect_of(&response), "Allow");
    }

    #[tokio::test]
    async fn test_uppercase_scheme_is_accepted() {
        let token = sign_token("auth0|user-42");

        let response = function_handler(&verifier(), request(Some(format!("BEARER {token}"))))
            .await
            .unwrap();

        assert_eq!(effect_of(&response), "Allow");
    }

    #[tokio::test]
    async fn test_missing_header_denies_with_fixed_principal() {
        let response = function_handler(&verifier(), request(None)).await.unwrap();

        assert_eq!(response.principal_id, "user");
        assert_eq!(effect_of(&response), "Deny");
    }

    #[tokio::test]
    async fn test_wrong_scheme_denies() {
        let response = function_handler(&verifier(), request(Some("Bear token123".to_string())))
            .await
            .unwrap();

        assert_eq!(response.principal_id, "user");
        assert_eq!(effect_of(&response), "Deny");
    }

    #[tokio::test]
    async fn test_tampered_token_denies() {
        let mut tampered = sign_token("auth0|user-42");
        let last = if tampered.ends_with('A') { 'B' } else { 'A' };
        tampered.pop();
        tampered.push(last);

        let response = function_handler(&verifier(), request(Some(format!("Bearer {tampered}"))))
            .await
            .unwrap();

        assert_eq!(response.principal_id, "user");
        assert_eq!(effect_of(&response), "Deny");
    }
}
