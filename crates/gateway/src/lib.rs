//! The request gateway: one HTTP call per room entry, with variable
//! substitution, auth application, a fixed timeout, and total error
//! normalization — every failure mode becomes an `ApiError` value, never a
//! panic or a stray `Err` in the game loop.
//!
//! `GatewayDriver` is the bridge to the synchronous simulation: it runs
//! calls on a background tokio runtime and hands finished [`Resolution`]s
//! back over a channel, so all game-state mutation stays on the loop thread.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use manor_core::collection::{AuthConfig, Collection, Endpoint, HttpMethod};
use manor_core::gateway::{ApiError, ApiResponse, RequestOutcome, RequestTicket, Resolution};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to start the gateway runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub struct Gateway {
    client: reqwest::Client,
}

impl Gateway {
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Perform one call. Never returns a transport `Err`: anything that goes
    /// wrong — timeout, connection failure, non-2xx status — normalizes to
    /// a `RequestOutcome::Failure`.
    pub async fn execute(
        &self,
        endpoint: &Endpoint,
        auth: Option<&AuthConfig>,
        variables: Option<&BTreeMap<String, String>>,
    ) -> RequestOutcome {
        let started = Instant::now();
        let url = substitute_variables(&endpoint.url, variables);

        let mut request = self.client.request(method_of(endpoint.method), url.as_str());
        for (name, value) in build_headers(endpoint, auth) {
            request = request.header(&name, &value);
        }
        if let Some(AuthConfig::Basic { username, password }) = auth {
            request = request.basic_auth(username, Some(password));
        }
        if endpoint.method.has_body()
            && let Some(body) = &endpoint.body
        {
            request = request.body(body.clone());
        }

        debug!(endpoint = %endpoint.id, method = endpoint.method.as_str(), %url, "dispatching");
        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return RequestOutcome::Failure(ApiError {
                        message: status.canonical_reason().unwrap_or("Request failed").to_string(),
                        status: Some(status.as_u16()),
                        code: None,
                        timeout: false,
                    });
                }

                let headers = response
                    .headers()
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.as_str().to_string(),
                            String::from_utf8_lossy(value.as_bytes()).into_owned(),
                        )
                    })
                    .collect();
                match response.text().await {
                    Ok(body) => RequestOutcome::Success(ApiResponse {
                        status: status.as_u16(),
                        status_text: status.canonical_reason().unwrap_or("").to_string(),
                        headers,
                        body,
                        duration_ms: started.elapsed().as_millis() as u64,
                        timestamp_ms: unix_timestamp_ms(),
                    }),
                    Err(err) => RequestOutcome::Failure(normalize_error(&err)),
                }
            }
            Err(err) => RequestOutcome::Failure(normalize_error(&err)),
        }
    }
}

/// Runs gateway calls off the game loop. The loop dispatches tickets and
/// polls for resolutions between ticks; nothing here ever blocks it.
pub struct GatewayDriver {
    runtime: tokio::runtime::Runtime,
    gateway: Arc<Gateway>,
    auth: Option<AuthConfig>,
    variables: Option<BTreeMap<String, String>>,
    resolution_tx: mpsc::Sender<Resolution>,
    resolution_rx: mpsc::Receiver<Resolution>,
}

impl GatewayDriver {
    pub fn new(collection: &Collection, timeout: Duration) -> Result<Self, GatewayError> {
        let runtime =
            tokio::runtime::Builder::new_multi_thread().worker_threads(2).enable_all().build()?;
        let gateway = Arc::new(Gateway::new(timeout)?);
        let (resolution_tx, resolution_rx) = mpsc::channel();
        Ok(Self {
            runtime,
            gateway,
            auth: collection.auth.clone(),
            variables: collection.variables.clone(),
            resolution_tx,
            resolution_rx,
        })
    }

    /// Fire the ticket's request. The outcome arrives later via [`poll`].
    ///
    /// [`poll`]: GatewayDriver::poll
    pub fn dispatch(&self, ticket: RequestTicket) {
        let gateway = Arc::clone(&self.gateway);
        let auth = self.auth.clone();
        let variables = self.variables.clone();
        let tx = self.resolution_tx.clone();
        self.runtime.spawn(async move {
            let outcome = gateway.execute(&ticket.endpoint, auth.as_ref(), variables.as_ref()).await;
            if tx.send(Resolution { room: ticket.room, outcome }).is_err() {
                warn!(endpoint = %ticket.endpoint.id, "resolution receiver dropped");
            }
        });
    }

    /// Non-blocking: the next finished call, if any has landed.
    pub fn poll(&self) -> Option<Resolution> {
        self.resolution_rx.try_recv().ok()
    }
}

fn method_of(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
    }
}

/// Replace every `{{key}}` placeholder present in the variable map.
pub fn substitute_variables(url: &str, variables: Option<&BTreeMap<String, String>>) -> String {
    let Some(variables) = variables else {
        return url.to_string();
    };
    let mut substituted = url.to_string();
    for (key, value) in variables {
        substituted = substituted.replace(&format!("{{{{{key}}}}}"), value);
    }
    substituted
}

/// Default JSON content type, endpoint headers on top, then auth. Basic auth
/// is absent here: the HTTP client applies it and owns the encoding.
pub fn build_headers(endpoint: &Endpoint, auth: Option<&AuthConfig>) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    if let Some(extra) = &endpoint.headers {
        for (name, value) in extra {
            headers.insert(name.clone(), value.clone());
        }
    }
    match auth {
        Some(AuthConfig::Bearer { token }) => {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        Some(AuthConfig::ApiKey { api_key, header }) => {
            headers.insert(header.clone(), api_key.clone());
        }
        Some(AuthConfig::Basic { .. }) | Some(AuthConfig::None) | None => {}
    }
    headers
}

fn normalize_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError {
            message: "Request timeout".to_string(),
            status: None,
            code: Some("timeout".to_string()),
            timeout: true,
        };
    }
    ApiError {
        message: err.to_string(),
        status: err.status().map(|status| status.as_u16()),
        code: None,
        timeout: false,
    }
}

fn unix_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis() as u64)
}
