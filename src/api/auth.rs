//! Bearer-token middleware.
//!
//! Every route requires a valid token. On success the verified
//! [`crate::auth::UserId`] is inserted into request extensions for
//! handlers to read.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

use super::error::ApiError;
use crate::auth::TokenCodec;

/// State for the authentication middleware.
pub struct AuthState<C> {
    /// Token codec verifying bearer tokens.
    pub codec: TokenCodec,
    /// Clock used for expiry checks.
    pub clock: Arc<C>,
}

impl<C> Clone for AuthState<C> {
    fn clone(&self) -> Self {
        Self {
            codec: self.codec.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Verifies the `Authorization: Bearer` header and stores the verified
/// user id in request extensions.
///
/// # Errors
///
/// Returns [`ApiError::Auth`] when the header is missing or the token
/// fails verification for any reason.
pub async fn require_bearer<C>(
    State(auth): State<AuthState<C>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    C: Clock + Send + Sync + 'static,
{
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Auth)?;
    let token = header.strip_prefix("Bearer ").ok_or(ApiError::Auth)?;

    let user = auth.codec.verify(token, &*auth.clock).map_err(|err| {
        // The precise reason stays in the logs; the response is a plain 401.
        debug!(error = %err, "token verification failed");
        ApiError::Auth
    })?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
