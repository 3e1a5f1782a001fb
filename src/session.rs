use crate::error::{Result, WhiskError};
use crate::transport::Transport;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::OnceCell;

/// Cookie name the session lookup endpoint expects.
const SESSION_COOKIE_NAME: &str = "__Secure-next-auth.session-token";

/// Placeholder value shipped in sample configs; never a usable credential.
const PLACEHOLDER_SESSION_TOKEN: &str = "YOUR_SESSION_TOKEN_HERE";

/// Credential store for one client instance.
///
/// Holds the long-lived session token and the bearer token derived from it.
/// The bearer token starts absent and transitions to present exactly once,
/// only through [`Session::access_token`]; no other component writes it.
pub struct Session {
    session_token: String,
    access_token: OnceCell<String>,
}

impl Session {
    /// Validates the session token up front so no remote call is ever
    /// attempted with a credential known to be unusable.
    pub fn new(session_token: Option<String>) -> Result<Self> {
        let session_token = session_token.ok_or_else(|| {
            WhiskError::Precondition(
                "session token is required (set WHISK_SESSION_TOKEN or use with_session_token)"
                    .into(),
            )
        })?;

        if session_token.trim().is_empty() {
            return Err(WhiskError::Precondition("session token is empty".into()));
        }

        if session_token == PLACEHOLDER_SESSION_TOKEN {
            return Err(WhiskError::Precondition(
                "session token is the sample placeholder value".into(),
            ));
        }

        Ok(Self {
            session_token,
            access_token: OnceCell::new(),
        })
    }

    /// Cookie header value for cookie-authenticated endpoints.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE_NAME, self.session_token)
    }

    /// Returns the bearer token, deriving it from the session token on
    /// first use. Subsequent calls return the cached value without any
    /// transport activity.
    pub async fn access_token(
        &self,
        transport: &dyn Transport,
        session_url: &str,
    ) -> Result<&str> {
        let token = self
            .access_token
            .get_or_try_init(|| self.fetch_access_token(transport, session_url))
            .await?;

        Ok(token.as_str())
    }

    async fn fetch_access_token(
        &self,
        transport: &dyn Transport,
        session_url: &str,
    ) -> Result<String> {
        log::debug!("Deriving access token from session");

        let mut headers = HashMap::new();
        headers.insert("Cookie".to_string(), self.cookie_header());

        let raw = transport
            .execute(Method::GET, session_url, &headers, None)
            .await?;

        let value: Value = serde_json::from_str(&raw).map_err(|_| {
            WhiskError::Auth(format!("session lookup returned invalid JSON: {}", raw))
        })?;

        let token = value
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                WhiskError::Auth(format!(
                    "session lookup response has no access_token field: {}",
                    raw
                ))
            })?;

        log::info!("Access token acquired");
        Ok(token.to_string())
    }
}
