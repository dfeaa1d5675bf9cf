//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken, format_api_token,
        generate_api_token_secret, hash_api_token, parse_api_token, repository::AuthRepository,
    },
    domain::accounts::models::UserUuid,
};

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user it authenticates as.
    ///
    /// Any malformed, unknown, expired, or tampered token comes back as
    /// `NotFound`; the caller cannot tell which check failed.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[derive(Clone)]
pub struct AppAuthService {
    repository: Arc<dyn AuthRepository>,
}

impl AppAuthService {
    #[must_use]
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    /// Issue a new API token for the given user.
    ///
    /// The raw token is returned exactly once; only its hash is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);
        let token_hash = hash_api_token(&token_uuid, version, &user_uuid, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }
}

#[async_trait]
impl AuthService for AppAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_invalid| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        let expected = hash_api_token(
            &parsed.token_uuid,
            parsed.version,
            &token.user_uuid,
            &parsed.secret,
        );

        if expected != token.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed.token_uuid)
            .await;

        Ok(token.user_uuid)
    }
}
