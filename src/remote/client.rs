use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::cache::{CacheStats, ResponseCache, SingleFlight, fingerprint};
use crate::error::{ChartError, ChartResult};

use super::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RESPONSE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub body: Option<Value>,
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn post(body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(body),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Serialize)]
struct RequestKey<'a> {
    method: HttpMethod,
    endpoint: &'a str,
    body: Option<String>,
}

/// JSON request client with timeout, error mapping, response caching and
/// request coalescing.
///
/// Identical requests in flight at the same time share one transport call.
/// Successful `GET`/`HEAD` responses are cached for the response TTL; other
/// methods and failures never are.
pub struct RequestClient {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    responses: ResponseCache,
    inflight: SingleFlight<Value>,
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("timeout", &self.timeout)
            .field("responses", &self.responses.stats())
            .field("inflight", &self.inflight)
            .finish_non_exhaustive()
    }
}

impl RequestClient {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            responses: ResponseCache::new(DEFAULT_RESPONSE_TTL),
            inflight: SingleFlight::new(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the response cache with an empty one using `ttl`.
    #[must_use]
    pub fn with_response_ttl(mut self, ttl: Duration) -> Self {
        self.responses = ResponseCache::new(ttl);
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn response_cache_stats(&self) -> CacheStats {
        self.responses.stats()
    }

    pub fn clear_response_cache(&self) {
        self.responses.clear();
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inflight.in_flight()
    }

    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ChartResult<Value> {
        let key = match request_key(options.method, endpoint, options.body.as_ref()) {
            Ok(key) => key,
            Err(err) => {
                warn!(error = %err, endpoint, "request key unavailable; sending uncached");
                return send_mapped(
                    Arc::clone(&self.transport),
                    self.timeout,
                    to_request(endpoint, options),
                )
                .await;
            }
        };

        let cacheable = options.method.is_safe();
        if cacheable {
            if let Some(body) = self.responses.get(&key) {
                trace!(endpoint, "response cache hit");
                return Ok(body);
            }
        }

        let transport = Arc::clone(&self.transport);
        let timeout = self.timeout;
        let request = to_request(endpoint, options);
        let result = self
            .inflight
            .run(&key, move || send_mapped(transport, timeout, request))
            .await;

        if cacheable {
            if let Ok(body) = &result {
                self.responses.insert(key, body.clone());
            }
        }
        result
    }
}

fn to_request(endpoint: &str, options: RequestOptions) -> HttpRequest {
    HttpRequest {
        method: options.method,
        endpoint: endpoint.to_owned(),
        body: options.body,
    }
}

/// Key shared by the response cache and the in-flight map.
pub(crate) fn request_key(
    method: HttpMethod,
    endpoint: &str,
    body: Option<&Value>,
) -> ChartResult<String> {
    let body = body.map(fingerprint).transpose()?;
    fingerprint(&RequestKey {
        method,
        endpoint,
        body,
    })
}

async fn send_mapped(
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    request: HttpRequest,
) -> ChartResult<Value> {
    let method = request.method;
    let endpoint = request.endpoint.clone();
    let response = match tokio::time::timeout(timeout, transport.send(request)).await {
        Ok(response) => response?,
        Err(_) => {
            warn!(%endpoint, timeout_ms = timeout.as_millis() as u64, "request timed out");
            return Err(ChartError::RequestTimeout);
        }
    };
    debug!(
        method = method.as_str(),
        %endpoint,
        status = response.status,
        "request settled"
    );
    into_result(response)
}

fn into_result(response: HttpResponse) -> ChartResult<Value> {
    if response.is_success() {
        return Ok(response.body);
    }
    let message = ["error", "message"]
        .iter()
        .find_map(|field| response.body.get(field).and_then(Value::as_str))
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Request failed: {}", response.status));
    Err(ChartError::RequestFailed {
        status: response.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{HttpResponse, into_result, request_key};
    use crate::error::ChartError;
    use crate::remote::HttpMethod;

    #[test]
    fn server_message_wins_over_generic_text() {
        let err = into_result(HttpResponse::new(422, json!({"error": "bad prompt"})))
            .expect_err("non-2xx");
        assert_eq!(err.to_string(), "bad prompt");

        let err = into_result(HttpResponse::new(503, json!(null))).expect_err("non-2xx");
        assert_eq!(
            err,
            ChartError::RequestFailed {
                status: 503,
                message: "Request failed: 503".to_owned(),
            }
        );
    }

    #[test]
    fn request_key_separates_method_and_body() {
        let get = request_key(HttpMethod::Get, "/api/x", None).expect("key");
        let head = request_key(HttpMethod::Head, "/api/x", None).expect("key");
        let post_a = request_key(HttpMethod::Post, "/api/x", Some(&json!({"a": 1}))).expect("key");
        let post_b = request_key(HttpMethod::Post, "/api/x", Some(&json!({"a": 2}))).expect("key");
        assert_ne!(get, head);
        assert_ne!(post_a, post_b);
    }
}
