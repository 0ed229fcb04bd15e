use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::gateway::{state::AppState, types::ApiError};

/// Bearer-token gate for protected routes.
///
/// Runs before the handler: a request without an `Authorization` header is
/// rejected with 403 and never reaches the handler; a bad or expired token
/// is rejected with 401. On success the decoded [`Claims`] are inserted
/// into request extensions for the handler to read.
///
/// [`Claims`]: crate::user_auth::Claims
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::forbidden("No token provided"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::forbidden("No token provided"))?;

    match state.user_auth.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::warn!("Token verification failed: {}", e);
            Err(ApiError::unauthorized("Invalid or expired token"))
        }
    }
}
