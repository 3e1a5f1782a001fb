use std::env;

/// Default session-lookup endpoint (cookie authenticated).
pub const DEFAULT_SESSION_URL: &str = "https://labs.google/fx/api/auth/session";

/// Default tRPC base for project/media/prompt procedures (cookie authenticated).
pub const DEFAULT_TRPC_BASE_URL: &str = "https://labs.google/fx/api/trpc";

/// Default sandbox base for the generation endpoints (bearer authenticated).
pub const DEFAULT_SANDBOX_BASE_URL: &str = "https://aisandbox-pa.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct WhiskConfig {
    pub session_token: Option<String>,
    pub session_url: Option<String>,
    pub trpc_base_url: Option<String>,
    pub sandbox_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for WhiskConfig {
    fn default() -> Self {
        WhiskConfig {
            session_token: None,
            session_url: None,
            trpc_base_url: None,
            sandbox_base_url: None,
            timeout_secs: None,
        }
    }
}

impl WhiskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let session_token = env::var("WHISK_SESSION_TOKEN").ok();
        let session_url = env::var("WHISK_SESSION_URL").ok();
        let trpc_base_url = env::var("WHISK_TRPC_BASE_URL").ok();
        let sandbox_base_url = env::var("WHISK_SANDBOX_BASE_URL").ok();
        let timeout_secs = env::var("WHISK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        WhiskConfig {
            session_token,
            session_url,
            trpc_base_url,
            sandbox_base_url,
            timeout_secs,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn with_session_url(mut self, url: impl Into<String>) -> Self {
        self.session_url = Some(url.into());
        self
    }

    pub fn with_trpc_base_url(mut self, url: impl Into<String>) -> Self {
        self.trpc_base_url = Some(url.into());
        self
    }

    pub fn with_sandbox_base_url(mut self, url: impl Into<String>) -> Self {
        self.sandbox_base_url = Some(url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Session URL with the default applied.
    pub fn session_url(&self) -> String {
        self.session_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SESSION_URL.to_string())
    }

    /// tRPC base URL with the default applied.
    pub fn trpc_base_url(&self) -> String {
        self.trpc_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_TRPC_BASE_URL.to_string())
    }

    /// Sandbox base URL with the default applied.
    pub fn sandbox_base_url(&self) -> String {
        self.sandbox_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SANDBOX_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = WhiskConfig::new()
            .with_session_token("abc")
            .with_trpc_base_url("http://localhost:9999/trpc")
            .with_timeout_secs(30);

        assert_eq!(config.session_token.as_deref(), Some("abc"));
        assert_eq!(config.trpc_base_url(), "http://localhost:9999/trpc");
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_url_defaults() {
        let config = WhiskConfig::new();
        assert_eq!(config.session_url(), DEFAULT_SESSION_URL);
        assert_eq!(config.trpc_base_url(), DEFAULT_TRPC_BASE_URL);
        assert_eq!(config.sandbox_base_url(), DEFAULT_SANDBOX_BASE_URL);
    }
}
