//! Admin token authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::AppState;

/// Hash a token for comparison
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the bearer token from the Authorization header
fn extract_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Authentication middleware for the admin console
///
/// Rejects the request unless it carries the configured admin token.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state
        .config
        .admin_token
        .as_deref()
        .ok_or(AppError::Unauthorized)?;

    let token = extract_token(&request).ok_or(AppError::Unauthorized)?;

    // Compare digests so the comparison length never depends on the input
    if hash_token(token) != hash_token(expected) {
        tracing::warn!(path = %request.uri().path(), "Rejected admin request with bad token");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_hex_sha256() {
        let hash = hash_token("secret");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("secret"));
        assert_ne!(hash, hash_token("Secret"));
    }
}
