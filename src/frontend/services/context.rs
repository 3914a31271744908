//! Authentication context and state management.

use crate::backend::api::models::{Registration, UserProfile};
use crate::backend::api::{ApiClient, ApiError};
use crate::backend::services::Session;
use dioxus::prelude::*;

/// Where the app stands on who is signed in.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    /// The saved session has not been checked yet.
    Loading,
    Authenticated(UserProfile),
    Unauthenticated,
}

impl AuthStatus {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Provided once at the app root and read through `use_context`.
#[derive(Clone)]
pub struct AuthState {
    pub status: Signal<AuthStatus>,
    client: ApiClient,
}

impl AuthState {
    /// Starts in [`AuthStatus::Loading`] until [`AuthState::restore`] runs.
    pub fn new(client: ApiClient) -> Self {
        Self {
            status: Signal::new(AuthStatus::Loading),
            client,
        }
    }

    #[cfg(test)]
    pub fn with_status(client: ApiClient, status: AuthStatus) -> Self {
        Self {
            status: Signal::new(status),
            client,
        }
    }

    /// Restores the saved session and validates it against the API.
    pub async fn restore(&mut self) {
        let Some(session) = Session::load().await else {
            log::info!("No saved session, showing login");
            self.status.set(AuthStatus::Unauthenticated);
            return;
        };

        self.client.set_token(session.access_token.clone());
        match self.client.me().await {
            Ok(user) => {
                log::info!("Restored session for {}", user.username);
                self.status.set(AuthStatus::Authenticated(user));
            }
            Err(e) => {
                self.client.clear_token();
                if session_is_revoked(&e) {
                    log::warn!("Saved session for {} is no longer valid", session.username);
                    if let Err(e) = Session::delete().await {
                        log::warn!("Failed to remove stale session: {e}");
                    }
                } else {
                    // Kept on disk so the next start can try again
                    log::warn!("Could not verify saved session for {}: {e}", session.username);
                }
                self.status.set(AuthStatus::Unauthenticated);
            }
        }
    }

    /// Signs in with a username and password and saves the session.
    pub async fn login(&mut self, username: String, password: String) -> Result<(), String> {
        let username = check_login_input(&username, &password)?;

        let token = self
            .client
            .login(&username, &password)
            .await
            .map_err(|e| login_error_message(&e))?;
        self.client.set_token(token.access_token.clone());

        let user = match self.client.me().await {
            Ok(user) => user,
            Err(e) => {
                self.client.clear_token();
                return Err(format!("Signed in, but the profile could not be loaded: {e}"));
            }
        };

        let session = Session::new(username, token.access_token, token.token_type);
        if let Err(e) = session.save().await {
            log::warn!("Failed to save session: {e}");
        }

        log::info!("Signed in as {}", user.username);
        self.status.set(AuthStatus::Authenticated(user));
        Ok(())
    }

    /// Creates an account, then signs in with it.
    pub async fn register(&mut self, registration: Registration) -> Result<(), String> {
        check_registration_input(&registration)?;

        self.client
            .register(&registration)
            .await
            .map_err(|e| e.to_string())?;
        log::info!("Registered account {}", registration.username);

        self.login(registration.username, registration.password).await
    }

    /// Signs out and forgets the saved session.
    pub async fn logout(&mut self) {
        self.client.clear_token();
        self.status.set(AuthStatus::Unauthenticated);
        if let Err(e) = Session::delete().await {
            log::warn!("Failed to remove session file: {e}");
        }
        log::info!("Signed out");
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.status.read().user().cloned()
    }
}

/// Returns the trimmed username. Format rules are left to the server.
fn check_login_input(username: &str, password: &str) -> Result<String, String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(username.to_string())
}

fn check_registration_input(registration: &Registration) -> Result<(), String> {
    check_login_input(&registration.username, &registration.password)?;
    if !registration.email.contains('@') {
        return Err("Enter a valid email address".to_string());
    }
    Ok(())
}

/// Only a rejected token invalidates the saved session; outages do not.
fn session_is_revoked(error: &ApiError) -> bool {
    matches!(error, ApiError::Unauthorized)
}

fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Incorrect username or password".to_string(),
        ApiError::Status { status: 400, .. } => "Incorrect username or password".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::api::models::SubscriptionTier;

    #[test]
    fn status_exposes_user_only_when_authenticated() {
        let user = UserProfile {
            username: "ada".to_string(),
            email: None,
            full_name: None,
            subscription_tier: SubscriptionTier::Basic,
        };

        assert_eq!(AuthStatus::Loading.user(), None);
        assert_eq!(AuthStatus::Unauthenticated.user(), None);
        assert!(!AuthStatus::Loading.is_authenticated());

        let status = AuthStatus::Authenticated(user.clone());
        assert!(status.is_authenticated());
        assert_eq!(status.user(), Some(&user));
    }

    #[test]
    fn usernames_are_not_restricted_by_format() {
        for name in ["john.doe", "maria-lopez", "jo", "ada_lovelace"] {
            assert_eq!(check_login_input(name, "secret"), Ok(name.to_string()));
        }
        assert_eq!(
            check_login_input("  john.doe ", "secret"),
            Ok("john.doe".to_string())
        );
    }

    #[test]
    fn empty_credentials_are_refused_locally() {
        assert_eq!(
            check_login_input("   ", "secret"),
            Err("Username is required".to_string())
        );
        assert_eq!(
            check_login_input("john.doe", ""),
            Err("Password is required".to_string())
        );
    }

    #[test]
    fn registration_leaves_password_rules_to_the_server() {
        let mut registration = Registration {
            email: "maria@example.org".to_string(),
            username: "maria-lopez".to_string(),
            password: "short".to_string(),
            full_name: None,
        };
        assert_eq!(check_registration_input(&registration), Ok(()));

        registration.email = "maria.example.org".to_string();
        assert_eq!(
            check_registration_input(&registration),
            Err("Enter a valid email address".to_string())
        );
    }

    #[test]
    fn only_rejected_tokens_revoke_the_saved_session() {
        assert!(session_is_revoked(&ApiError::Unauthorized));
        assert!(!session_is_revoked(&ApiError::Timeout(
            std::time::Duration::from_secs(15)
        )));
        assert!(!session_is_revoked(&ApiError::Status {
            status: 503,
            message: "down".into()
        }));
        assert!(!session_is_revoked(&ApiError::Cancelled));
    }

    #[test]
    fn bad_credentials_get_a_friendly_message() {
        assert_eq!(
            login_error_message(&ApiError::Unauthorized),
            "Incorrect username or password"
        );
        assert_eq!(
            login_error_message(&ApiError::Status {
                status: 503,
                message: "down".into()
            }),
            "Server responded with 503: down"
        );
    }
}
