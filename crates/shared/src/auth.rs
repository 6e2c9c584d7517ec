use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no authentication header")]
    MissingHeader,

    #[error("invalid authentication header")]
    InvalidScheme,

    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Decoded token claims. Only `sub` is consumed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtPayload {
    pub sub: String,
}

/// Verifies bearer tokens against a fixed RSA public key. The key is
/// injected at construction so deployments can rotate it without a code
/// change and tests can supply a throwaway pair.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Builds a verifier from a PEM-encoded RSA public key. Only RS256
    /// signatures are accepted, with zero expiry leeway.
    pub fn new(public_key_pem: &str) -> Result<Self, AuthError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Full header-to-claims path: scheme check, then signature check.
    pub fn verify_header(&self, auth_header: Option<&str>) -> Result<JwtPayload, AuthError> {
        let token = extract_token(auth_header)?;
        self.verify_token(token)
    }

    pub fn verify_token(&self, token: &str) -> Result<JwtPayload, AuthError> {
        let data = decode::<JwtPayload>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Splits the header at the first space into a scheme and a token. The
/// scheme must equal `bearer` ignoring ASCII case; everything after the
/// first space is treated as the token.
pub fn extract_token(auth_header: Option<&str>) -> Result<&str, AuthError> {
    let header = auth_header.ok_or(AuthError::MissingHeader)?;
    let (scheme, token) = header.split_once(' ').ok_or(AuthError::InvalidScheme)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }
    Ok(token)
}
