//! Chat Completion Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use tiffin_app::chat::{ChatMessage, ChatRole, ChatServiceError};

use crate::{extensions::*, state::State};

/// Chat Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChatRequest {
    /// The conversation so far, oldest first, ending with the latest user
    /// message
    pub messages: Vec<ChatMessageBody>,
}

/// A single conversation turn
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChatMessageBody {
    /// "system", "user" or "assistant"
    pub role: String,

    /// The message text
    pub content: String,
}

impl TryFrom<ChatMessageBody> for ChatMessage {
    type Error = StatusError;

    fn try_from(body: ChatMessageBody) -> Result<Self, Self::Error> {
        let role = match body.role.as_str() {
            "system" => ChatRole::System,
            "user" => ChatRole::User,
            "assistant" => ChatRole::Assistant,
            other => {
                return Err(StatusError::bad_request().brief(format!("unknown role: {other}")));
            }
        };

        Ok(ChatMessage {
            role,
            content: body.content,
        })
    }
}

impl From<ChatMessage> for ChatMessageBody {
    fn from(message: ChatMessage) -> Self {
        let role = match message.role {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };

        Self {
            role: role.to_string(),
            content: message.content,
        }
    }
}

/// Chat Completion Handler
///
/// Relays the conversation to the assistant provider and returns its reply.
#[endpoint(
    tags("chat"),
    summary = "Chat with the Assistant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Assistant reply"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty conversation or unknown role"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Provider rate limit hit"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ChatRequest>,
    depot: &mut Depot,
) -> Result<Json<ChatMessageBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    // Authenticated-only, though the user itself plays no further role here.
    depot.user_uuid_or_401()?;

    let request = json.into_inner();

    if request.messages.is_empty() {
        return Err(StatusError::bad_request().brief("Conversation must not be empty"));
    }

    let history = request
        .messages
        .into_iter()
        .map(ChatMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let reply = state
        .app
        .chat
        .reply(&history)
        .await
        .map_err(|source| match source {
            ChatServiceError::RateLimited => {
                StatusError::too_many_requests().brief(source.to_string())
            }
            other => {
                error!("assistant relay failed: {other}");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(reply.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tiffin_app::chat::MockChatService;

    use crate::test_helpers::{authed_service, state_with_chat};

    use super::*;

    fn make_service(chat: MockChatService) -> Service {
        authed_service(state_with_chat(chat), Router::with_path("chat").post(handler))
    }

    #[tokio::test]
    async fn test_chat_returns_the_assistant_reply() -> TestResult {
        let mut chat = MockChatService::new();

        chat.expect_reply()
            .once()
            .withf(|history| {
                history.len() == 1
                    && history[0].role == ChatRole::User
                    && history[0].content == "What goes with dosa?"
            })
            .return_once(|_| Ok(ChatMessage::assistant("Sambar and chutney.")));

        let mut res = TestClient::post("http://example.com/chat")
            .json(&serde_json::json!({
                "messages": [{ "role": "user", "content": "What goes with dosa?" }],
            }))
            .send(&make_service(chat))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ChatMessageBody = res.take_json().await?;

        assert_eq!(body.role, "assistant");
        assert_eq!(body.content, "Sambar and chutney.");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_conversation_returns_400() -> TestResult {
        let mut chat = MockChatService::new();

        chat.expect_reply().never();

        let res = TestClient::post("http://example.com/chat")
            .json(&serde_json::json!({ "messages": [] }))
            .send(&make_service(chat))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_role_returns_400() -> TestResult {
        let mut chat = MockChatService::new();

        chat.expect_reply().never();

        let res = TestClient::post("http://example.com/chat")
            .json(&serde_json::json!({
                "messages": [{ "role": "narrator", "content": "hm" }],
            }))
            .send(&make_service(chat))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_provider_rate_limit_returns_429() -> TestResult {
        let mut chat = MockChatService::new();

        chat.expect_reply()
            .once()
            .return_once(|_| Err(ChatServiceError::RateLimited));

        let res = TestClient::post("http://example.com/chat")
            .json(&serde_json::json!({
                "messages": [{ "role": "user", "content": "hi" }],
            }))
            .send(&make_service(chat))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::TOO_MANY_REQUESTS));

        Ok(())
    }
}
