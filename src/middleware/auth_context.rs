use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

use crate::auth::token_matches;
use crate::error::ApiError;
use crate::models::AppState;

/// Proof that the request carried the configured API token.
/// Add it as a handler argument to put a route behind the token gate.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext;

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // Extract Authorization: Bearer <token>
            let TypedHeader(authz): TypedHeader<Authorization<Bearer>> =
                TypedHeader::from_request_parts(parts, state)
                    .await
                    .map_err(|_| ApiError::missing_token())?;

            if !token_matches(authz.token(), &state.api_token_hash) {
                tracing::warn!(
                    method = %parts.method,
                    path = %parts.uri.path(),
                    "rejected request with invalid api token"
                );
                return Err(ApiError::invalid_token());
            }

            Ok(AuthContext)
        }
    }
}
