use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::User;

/// Account resolved by [`auth_middleware`], available to handlers as a
/// request extension.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Authentication middleware that accepts an API client secret from:
/// 1. `X-Api-Key` header
/// 2. `Authorization: Bearer <secret>` header
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(secret) = extract_client_secret(&headers) else {
        return Err(ApiError::Unauthorized("Missing API credentials".to_string()));
    };

    let user = state
        .user_service()
        .authenticate_client(&secret)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid API credentials".to_string()))?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

fn extract_client_secret(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn secret_is_read_from_either_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_client_secret(&headers), None);

        headers.insert("Authorization", HeaderValue::from_static("Bearer abc123 "));
        assert_eq!(extract_client_secret(&headers).as_deref(), Some("abc123"));

        headers.insert("X-Api-Key", HeaderValue::from_static("fromkey"));
        assert_eq!(extract_client_secret(&headers).as_deref(), Some("fromkey"));
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(extract_client_secret(&headers), None);
    }
}
