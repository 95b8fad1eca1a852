//! Fire-and-forget requests to the backend service
//!
//! The UI thread only ever calls [`BackendClient::send`]; the HTTP round
//! trip runs on a tokio runtime and its outcome is logged, never returned.

use crate::config::ExtensionConfig;
use crate::constants::backend::{OPEN_FOLDER_ROUTE, REFRESH_ROUTE};
use crate::error::{ExtensionError, Result};
use crate::nodes::utility::open_folders::FolderKey;
use log::{debug, error};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// One outbound backend action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendRequest {
    /// Rescan model lists; empty body
    Refresh,
    /// Open a known folder on the backend host
    OpenFolder { key: FolderKey },
}

impl BackendRequest {
    /// Route suffix below the configured prefix
    pub fn route(&self) -> &'static str {
        match self {
            BackendRequest::Refresh => REFRESH_ROUTE,
            BackendRequest::OpenFolder { .. } => OPEN_FOLDER_ROUTE,
        }
    }

    /// JSON request body
    pub fn body(&self) -> Value {
        match self {
            BackendRequest::Refresh => json!({}),
            BackendRequest::OpenFolder { key } => json!({ "key": key.as_str() }),
        }
    }
}

/// Sink for outbound requests; implementations must not block the caller
pub trait BackendClient {
    fn send(&self, request: BackendRequest);
}

/// HTTP implementation posting JSON from a tokio runtime
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    runtime: Handle,
}

impl HttpBackend {
    /// Build a client for the configured server, spawning onto `runtime`
    pub fn new(config: &ExtensionConfig, runtime: Handle) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let base_url = format!(
            "{}{}",
            config.server_url.trim_end_matches('/'),
            config.route_prefix
        );

        Ok(Self {
            client,
            base_url,
            runtime,
        })
    }

    /// Full URL a request is posted to
    pub fn url_for(&self, request: &BackendRequest) -> String {
        format!("{}{}", self.base_url, request.route())
    }

    /// Spawn the request; the handle is only for callers that want to wait
    pub fn dispatch(&self, request: BackendRequest) -> JoinHandle<()> {
        let client = self.client.clone();
        let url = self.url_for(&request);

        self.runtime.spawn(async move {
            match post(&client, &url, request.body()).await {
                Ok(()) => debug!("Backend accepted {:?}", request),
                Err(e) => error!("Backend request {:?} failed: {}", request, e),
            }
        })
    }
}

impl BackendClient for HttpBackend {
    fn send(&self, request: BackendRequest) {
        // Dropping the handle detaches the task
        drop(self.dispatch(request));
    }
}

async fn post(client: &reqwest::Client, url: &str, body: Value) -> Result<()> {
    let response = client.post(url).json(&body).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExtensionError::Status {
            route: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(())
}
