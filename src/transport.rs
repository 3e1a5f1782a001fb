use crate::error::{Result, WhiskError};
use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;
use std::time::Duration;

/// Raw request/response boundary of the client.
///
/// Every remote operation goes through this seam: build a request, get the
/// raw response body back, or a failure. Keeping it behind a trait lets
/// tests observe exactly which calls were made and in what order.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<String>;
}

/// reqwest-backed transport.
///
/// Non-2xx responses still resolve to their body text because the remote
/// service reports errors in-band; only connection-level failures map to
/// `WhiskError::Transport`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| WhiskError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<String> {
        let mut request = self.client.request(method.clone(), url);

        for (name, value) in headers {
            request = request.header(name, value);
        }

        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        log::debug!("{} {}", method, url);

        let response = request
            .send()
            .await
            .map_err(|e| WhiskError::Transport(format!("{} {} failed: {}", method, url, e)))?;

        response
            .text()
            .await
            .map_err(|e| WhiskError::Transport(format!("{} {}: failed to read body: {}", method, url, e)))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedCall {
        pub method: Method,
        pub url: String,
        pub headers: HashMap<String, String>,
        pub body: Option<String>,
    }

    /// Scripted transport that records every call it receives.
    pub(crate) struct MockTransport {
        responses: Mutex<VecDeque<Result<String>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn push_ok(&self, body: &str) {
            self.responses.lock().unwrap().push_back(Ok(body.to_string()));
        }

        pub fn push_err(&self, err: WhiskError) {
            self.responses.lock().unwrap().push_back(Err(err));
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(
            &self,
            method: Method,
            url: &str,
            headers: &HashMap<String, String>,
            body: Option<String>,
        ) -> Result<String> {
            self.calls.lock().unwrap().push(RecordedCall {
                method,
                url: url.to_string(),
                headers: headers.clone(),
                body,
            });

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(WhiskError::Transport(
                        "mock transport has no scripted response".into(),
                    ))
                })
        }
    }
}
