//! Authentication flows
//!
//! Sign-in, sign-out, profile, and password management. Credential
//! submissions (login, reset) dispatch publicly so a rejected password can
//! never trigger a token refresh; logout is best-effort and always clears
//! the local session.

use std::sync::Arc;

use clubflow_domain::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::client::ApiClient;
use crate::errors::ApiError;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct GoogleLoginRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access: String,
    refresh: String,
    user: UserProfile,
}

#[derive(Debug, Serialize)]
struct LogoutRequest<'a> {
    refresh: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordResetRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordResetConfirmRequest<'a> {
    uid: &'a str,
    token: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordChangeRequest<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    detail: String,
}

/// Response of `GET /auth/status/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthStatus {
    /// Whether the presented credentials identify a signed-in user.
    pub authenticated: bool,
    /// The signed-in profile, when authenticated.
    pub user: Option<UserProfile>,
}

/// Partial update for `PATCH /auth/me/`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProfileUpdate {
    /// New first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Authentication operations.
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    /// Create a new auth API instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Sign in with email and password.
    ///
    /// On success both tokens are persisted and the signed-in profile is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthenticated` for rejected credentials,
    /// `ApiError::Storage` if the tokens cannot be persisted, or any
    /// transport error.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let response: LoginResponse =
            self.client.post_public("/auth/login/", &LoginRequest { email, password }).await?;

        self.client.token_store().set_tokens(&response.access, &response.refresh).await?;

        debug!(user_id = response.user.id, "login succeeded");
        Ok(response.user)
    }

    /// Sign in with a Google ID token.
    ///
    /// # Errors
    ///
    /// Same as [`AuthApi::login`].
    #[instrument(skip_all)]
    pub async fn login_with_google(&self, id_token: &str) -> Result<UserProfile, ApiError> {
        let response: LoginResponse =
            self.client.post_public("/auth/google/", &GoogleLoginRequest { id_token }).await?;

        self.client.token_store().set_tokens(&response.access, &response.refresh).await?;

        debug!(user_id = response.user.id, "google login succeeded");
        Ok(response.user)
    }

    /// Sign out and drop the local session.
    ///
    /// The backend call is best-effort: transport and HTTP failures are
    /// logged and swallowed, and local tokens are cleared regardless. No
    /// session-expired event fires for a user-initiated logout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` only if clearing the token store fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let store = self.client.token_store();

        if let Ok(Some(refresh)) = store.refresh_token().await {
            let result: Result<serde_json::Value, ApiError> = self
                .client
                .post_without_recovery("/auth/logout/", &LogoutRequest { refresh: &refresh })
                .await;
            if let Err(err) = result {
                warn!(error = %err, "logout call failed; clearing local tokens anyway");
            }
        }

        store.clear_tokens().await?;
        debug!("local session cleared");
        Ok(())
    }

    /// Fetch the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session cannot be
    /// recovered.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.client.get("/auth/me/").await
    }

    /// Apply a partial profile update.
    ///
    /// # Errors
    ///
    /// Same as [`AuthApi::me`].
    #[instrument(skip(self, update))]
    pub async fn update_me(&self, update: &UserProfileUpdate) -> Result<UserProfile, ApiError> {
        self.client.patch("/auth/me/", update).await
    }

    /// Report whether the stored tokens identify a signed-in user.
    ///
    /// The endpoint serves anonymous callers too, so with no tokens stored
    /// this resolves to `authenticated: false` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn status(&self) -> Result<AuthStatus, ApiError> {
        self.client.get("/auth/status/").await
    }

    /// Request a password reset email. Public.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn request_password_reset(&self, email: &str) -> Result<String, ApiError> {
        let response: DetailResponse = self
            .client
            .post_public("/auth/password/reset/", &PasswordResetRequest { email })
            .await?;
        Ok(response.detail)
    }

    /// Complete a password reset with the emailed uid and token. Public.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` for an invalid or expired reset token.
    #[instrument(skip_all)]
    pub async fn confirm_password_reset(
        &self,
        uid: &str,
        token: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        let response: DetailResponse = self
            .client
            .post_public(
                "/auth/password/reset/confirm/",
                &PasswordResetConfirmRequest { uid, token, new_password },
            )
            .await?;
        Ok(response.detail)
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the old password is rejected, or any
    /// auth/transport error.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        let response: DetailResponse = self
            .client
            .post("/auth/password/change/", &PasswordChangeRequest { old_password, new_password })
            .await?;
        Ok(response.detail)
    }
}
