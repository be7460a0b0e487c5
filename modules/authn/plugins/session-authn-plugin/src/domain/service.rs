//! Session authenticator: cookie lookup, form login and logout.

use std::collections::HashMap;
use std::sync::Arc;

use authgate_http::{AuthRequest, AuthResponse};
use authn_sdk::{AuthnError, Identity, UserRepository};
use chrono::{TimeDelta, Utc};
use http::{HeaderValue, StatusCode, header};
use secrecy::SecretString;
use uuid::Uuid;

use super::store::{SessionRecord, SessionStore};
use crate::config::SessionAuthnPluginConfig;

const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Authenticates requests by session cookie.
pub struct SessionAuthenticator {
    pub(crate) store: Arc<dyn SessionStore>,
    users: Arc<dyn UserRepository>,
    cookie_name: String,
    login_location: Option<HeaderValue>,
    username_field: String,
    password_field: String,
    ttl: TimeDelta,
    secure_cookie: bool,
}

impl SessionAuthenticator {
    #[must_use]
    pub fn new(
        cfg: &SessionAuthnPluginConfig,
        store: Arc<dyn SessionStore>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        let login_location = HeaderValue::from_str(&cfg.login_url).ok();
        if login_location.is_none() {
            tracing::warn!(
                login_url = %cfg.login_url,
                "Login URL is not a valid header value, browser requests will get 401"
            );
        }
        let ttl_secs = i64::try_from(cfg.session_ttl_secs.min(MAX_SESSION_TTL_SECS)).unwrap_or(0);

        Self {
            store,
            users,
            cookie_name: cfg.cookie_name.clone(),
            login_location,
            username_field: cfg.username_field.clone(),
            password_field: cfg.password_field.clone(),
            ttl: TimeDelta::seconds(ttl_secs),
            secure_cookie: cfg.secure_cookie,
        }
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub(crate) fn session_id<'r>(&self, request: &'r AuthRequest) -> Option<&'r str> {
        request.cookie(&self.cookie_name).filter(|v| !v.is_empty())
    }

    pub(crate) fn login_location(&self) -> Option<HeaderValue> {
        self.login_location.clone()
    }

    /// Open a session from an `application/x-www-form-urlencoded` login body.
    ///
    /// Returns `Ok(None)` when the form is malformed or the credentials are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Propagates user repository and session store failures.
    pub async fn login(&self, request: &AuthRequest) -> Result<Option<LoginOutcome>, AuthnError> {
        let Some((username, password)) = self.form_credentials(request) else {
            tracing::debug!("Login form is missing credentials");
            return Ok(None);
        };

        let Some(identity) = self.users.authenticate(&username, &password).await? else {
            tracing::debug!(username = %username, "Login rejected");
            return Ok(None);
        };

        let session_id = Uuid::new_v4().simple().to_string();
        let set_cookie = self
            .session_cookie(&session_id, self.ttl.num_seconds())
            .ok_or_else(|| AuthnError::Internal("session cookie cannot be encoded".to_owned()))?;

        let record = SessionRecord {
            identity: identity.clone(),
            expires_at: Utc::now() + self.ttl,
        };
        self.store.save(&session_id, record).await?;

        tracing::info!(identity = identity.id(), "Session opened");
        Ok(Some(LoginOutcome {
            identity,
            set_cookie,
        }))
    }

    /// Close the request's session, if any, and expire the cookie.
    ///
    /// # Errors
    ///
    /// Propagates session store failures.
    pub async fn logout(&self, request: &AuthRequest) -> Result<AuthResponse, AuthnError> {
        if let Some(session_id) = self.session_id(request) {
            self.store.remove(session_id).await?;
            tracing::info!("Session closed");
        }

        let response = AuthResponse::new(StatusCode::NO_CONTENT);
        Ok(match self.session_cookie("", 0) {
            Some(cookie) => response.with_header(header::SET_COOKIE, cookie),
            None => response,
        })
    }

    fn form_credentials(&self, request: &AuthRequest) -> Option<(String, SecretString)> {
        let mut form: HashMap<String, String> = serde_urlencoded::from_bytes(request.body()).ok()?;
        let username = form
            .remove(&self.username_field)
            .filter(|u| !u.is_empty())?;
        let password = form.remove(&self.password_field)?;
        Some((username, SecretString::from(password)))
    }

    fn session_cookie(&self, value: &str, max_age: i64) -> Option<HeaderValue> {
        let secure = if self.secure_cookie { "; Secure" } else { "" };
        HeaderValue::from_str(&format!(
            "{}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}{secure}",
            self.cookie_name
        ))
        .ok()
    }
}

/// Result of a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    identity: Identity,
    set_cookie: HeaderValue,
}

impl LoginOutcome {
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// `Set-Cookie` value carrying the new session id.
    #[must_use]
    pub fn set_cookie(&self) -> &HeaderValue {
        &self.set_cookie
    }

    /// `200 OK` with the identity as JSON and the session cookie.
    #[must_use]
    pub fn into_response(self) -> AuthResponse {
        AuthResponse::json(&self.identity).with_header(header::SET_COOKIE, self.set_cookie)
    }
}
