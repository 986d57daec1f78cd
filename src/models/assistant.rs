use serde::{Deserialize, Serialize};

/// Body for POST /assistant/chat.
#[derive(Debug, Deserialize)]
pub struct AssistantChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AssistantChatResponse {
    pub reply: String,
}
