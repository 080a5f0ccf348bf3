//! Blocking HTTP client

use crate::error::{Result, RunnerError};
use crate::{RunRequest, RunResponse};
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;

/// Address the service binds by default
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";

/// Path of the compile-and-run endpoint
const COMPILE_PATH: &str = "compile";

/// Body prefix the service sends instead of a 403 status
const HOST_REJECTED_PREFIX: &str = "Host not allowed";

/// Client for one test-execution service
#[derive(Debug, Clone)]
pub struct RunnerClient {
    client: Client,
    endpoint: Url,
}

impl RunnerClient {
    /// Create a client for the service at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidUrl`] for anything but an absolute
    /// `http`/`https` URL, and [`RunnerError::Transport`] if the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = compile_endpoint(base_url)?;
        if endpoint.host_str() != Some("127.0.0.1") {
            tracing::warn!(%endpoint, "service only accepts requests addressed to 127.0.0.1");
        }

        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|source| RunnerError::Transport {
                url: endpoint.to_string(),
                source,
            })?;

        Ok(Self { client, endpoint })
    }

    /// Full URL requests are posted to
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Compile and run `request`
    ///
    /// # Errors
    ///
    /// Returns a [`RunnerError`] when the service cannot be reached or does
    /// not answer with a response document. A compile error or exception in
    /// the tested code is not an error; see [`RunResponse::outcome`].
    #[tracing::instrument(level = "debug", skip_all, fields(class = %request.class_name, method = %request.method_name))]
    pub fn run(&self, request: &RunRequest) -> Result<RunResponse> {
        let transport = |source| RunnerError::Transport {
            url: self.endpoint.to_string(),
            source,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;

        if !status.is_success() {
            return Err(RunnerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        if body.starts_with(HOST_REJECTED_PREFIX) {
            return Err(RunnerError::HostRejected(body));
        }

        let decoded: RunResponse =
            serde_json::from_str(&body).map_err(|source| RunnerError::Decode { body, source })?;
        tracing::debug!(elapsed_ms = decoded.elapsed_ms, "service responded");
        Ok(decoded)
    }
}

fn compile_endpoint(base_url: &str) -> Result<Url> {
    let invalid = |message: String| RunnerError::InvalidUrl {
        url: base_url.to_string(),
        message,
    };

    let mut base = Url::parse(base_url).map_err(|error| invalid(error.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(COMPILE_PATH).map_err(|error| invalid(error.to_string()))
}
