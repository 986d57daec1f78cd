use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    middleware::rate_limit::check_rate_limit,
    models::{
        assistant::{AssistantChatRequest, AssistantChatResponse},
        auth::AuthenticatedUser,
    },
    AppState,
};

/// POST /assistant/chat — rate limited per user (hourly window)
pub async fn chat(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<AssistantChatRequest>,
) -> Result<Json<AssistantChatResponse>, ApiError> {
    let mut redis = state.redis.clone();
    let key = format!("assistant:rate:{}", user.user_id);
    check_rate_limit(
        &mut redis,
        &key,
        state.config.assistant_rate_limit_per_hour,
        3600,
    )
    .await?;

    let reply = state
        .assistant
        .chat(&state.db, user.user_id, &body.message)
        .await?;
    Ok(Json(AssistantChatResponse { reply }))
}
