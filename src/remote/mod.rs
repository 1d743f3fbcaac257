//! Remote boundary: HTTP transport, the caching request client and the
//! prompt parse service built on top of it.

mod client;
mod http;
mod service;

pub use client::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_RESPONSE_TTL, RequestClient, RequestOptions};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use service::{
    DEFAULT_PROMPT_CACHE_CAPACITY, HttpParseService, PARSE_ENDPOINT, ParseService, PromptParser,
    RemoteParseResponse,
};
