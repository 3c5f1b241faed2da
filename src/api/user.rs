use axum::{
    Extension, Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, FormatQuery, RegisterRequest};
use crate::models::{Projection, UserView, UserWithClientView};
use crate::services::NewUser;

/// GET /user
/// The authenticated account in the `user_api` projection.
pub async fn get_current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ApiError> {
    match query.format.as_deref() {
        None | Some("json") => Ok(Json(ApiResponse::success(UserView::from(&user))).into_response()),
        Some("xml") => {
            let body = user.to_xml(Projection::UserApi)?;
            Ok(([(header::CONTENT_TYPE, "application/xml")], body).into_response())
        }
        Some(other) => Err(ApiError::validation(format!(
            "Unsupported format '{other}', expected 'json' or 'xml'"
        ))),
    }
}

/// PUT /user
/// Create an account. The response embeds the API client created with it.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserWithClientView>>), ApiError> {
    if !state.config().server.registration_enabled {
        return Err(ApiError::Forbidden(
            "Account registration through the API is disabled".to_string(),
        ));
    }

    let user = state
        .user_service()
        .register(NewUser {
            username: payload.username,
            email: payload.email,
            name: payload.name,
            client_name: payload.client_name,
        })
        .await?;

    tracing::info!("Registered user through the API: {}", user.username());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserWithClientView::from(&user))),
    ))
}
