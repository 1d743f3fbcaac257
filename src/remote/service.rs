use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, trace, warn};

use crate::cache::{CacheStats, PromptCache, SingleFlight, prompt_key};
use crate::core::{ChartKind, ParsedEntry};
use crate::error::{ChartError, ChartResult};
use crate::ingest::{self, InputFormat, ParseOutcome};

use super::client::{RequestClient, RequestOptions};

pub const PARSE_ENDPOINT: &str = "/api/parse";
pub const DEFAULT_PROMPT_CACHE_CAPACITY: usize = 100;

/// Reply of the remote prompt parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteParseResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ParsedEntry>,
    #[serde(default)]
    pub chart_type: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Expensive prompt-to-entries extraction living outside the process.
#[async_trait]
pub trait ParseService: Send + Sync {
    async fn parse(&self, prompt: &str, kind: ChartKind) -> ChartResult<RemoteParseResponse>;
}

/// [`ParseService`] backed by `POST /api/parse` on a [`RequestClient`].
#[derive(Debug, Clone)]
pub struct HttpParseService {
    client: Arc<RequestClient>,
    endpoint: String,
}

impl HttpParseService {
    #[must_use]
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self {
            client,
            endpoint: PARSE_ENDPOINT.to_owned(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl ParseService for HttpParseService {
    async fn parse(&self, prompt: &str, kind: ChartKind) -> ChartResult<RemoteParseResponse> {
        let body = json!({ "prompt": prompt, "chartType": kind.as_str() });
        let value = self
            .client
            .request(&self.endpoint, RequestOptions::post(body))
            .await?;
        serde_json::from_value(value)
            .map_err(|e| ChartError::InvalidData(format!("malformed parse response: {e}")))
    }
}

/// Prompt parsing through a remote service, cached per `(kind, prompt)`.
///
/// Only the remote call is cached and coalesced; local CSV/JSON/free-text
/// parsing always runs fresh. Any remote failure, or a reply without usable
/// entries, falls back to [`ingest::parse_for_kind`].
pub struct PromptParser<S> {
    service: Arc<S>,
    cache: PromptCache,
    inflight: SingleFlight<Vec<ParsedEntry>>,
}

impl<S> std::fmt::Debug for PromptParser<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptParser")
            .field("cache", &self.cache.stats())
            .field("inflight", &self.inflight)
            .finish_non_exhaustive()
    }
}

impl<S> PromptParser<S>
where
    S: ParseService + 'static,
{
    #[must_use]
    pub fn new(service: Arc<S>) -> Self {
        Self::with_capacity(service, DEFAULT_PROMPT_CACHE_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(service: Arc<S>, capacity: usize) -> Self {
        Self {
            service,
            cache: PromptCache::new(capacity),
            inflight: SingleFlight::new(),
        }
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub async fn parse(&self, prompt: &str, chart_type_hint: &str) -> ParseOutcome {
        self.parse_for_kind(prompt, ChartKind::from_hint(chart_type_hint))
            .await
    }

    pub async fn parse_for_kind(&self, prompt: &str, kind: ChartKind) -> ParseOutcome {
        let key = prompt_key(kind, prompt);
        if let Some(entries) = self.cache.get(&key) {
            trace!(chart_kind = %kind, "prompt cache hit");
            return ParseOutcome::new(entries, InputFormat::Remote);
        }

        let service = Arc::clone(&self.service);
        let owned_prompt = prompt.trim().to_owned();
        let remote = self
            .inflight
            .run(&key, move || async move {
                let response = service.parse(&owned_prompt, kind).await?;
                usable_entries(response)
            })
            .await;

        match remote {
            Ok(entries) => {
                debug!(chart_kind = %kind, entries = entries.len(), "remote parse succeeded");
                self.cache.insert(key, entries.clone());
                ParseOutcome::new(entries, InputFormat::Remote)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    chart_kind = %kind,
                    "remote parse unavailable; parsing locally"
                );
                ingest::parse_for_kind(prompt, kind)
            }
        }
    }
}

fn usable_entries(response: RemoteParseResponse) -> ChartResult<Vec<ParsedEntry>> {
    if !response.success {
        return Err(ChartError::InvalidData(
            "remote parse reported failure".to_owned(),
        ));
    }
    let entries: Vec<ParsedEntry> = response
        .data
        .into_iter()
        .filter_map(|entry| ParsedEntry::new(entry.label, entry.value))
        .collect();
    if entries.is_empty() {
        return Err(ChartError::InvalidData(
            "remote parse returned no entries".to_owned(),
        ));
    }
    Ok(entries)
}
