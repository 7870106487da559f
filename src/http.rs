//! Transport primitives for the token and resource exchanges.
//!
//! The module exposes [`HttpClient`] alongside the owned [`HttpRequest`] and
//! [`HttpResponse`] values so the executor stays independent of any particular HTTP
//! stack. Implementations resolve a request into a fully buffered response, or into a
//! [`TransportError`] when the exchange could not complete (refused connection, timeout,
//! aborted body). Status codes are never interpreted here; classification belongs to
//! [`Executor`](crate::retry::Executor).

// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::HeaderMap;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`HttpClient::send`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of dispatching a single request.
///
/// The trait is the crate's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so the executor can hold them behind an [`Arc`]. Each call
/// performs exactly one dispatch; retrying is the executor's job.
pub trait HttpClient
where
	Self: 'static + Send + Sync,
{
	/// Dispatches `request` once and buffers the full response.
	fn send<'a>(&'a self, request: &'a HttpRequest) -> HttpFuture<'a>;
}

/// Request methods used by the protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// Metadata-only request; the response carries headers and no body.
	Head,
	/// Regular fetch.
	Get,
}
impl Method {
	/// Returns the canonical method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Head => "HEAD",
			Method::Get => "GET",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request descriptor. Every attempt of one logical call reuses the same value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Request method.
	pub method: Method,
	/// Fully resolved target URL.
	pub url: Url,
	/// Headers attached in insertion order.
	pub headers: Vec<(String, String)>,
}
impl HttpRequest {
	/// Creates a request without headers.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: Vec::new() }
	}

	/// Creates a `HEAD` request.
	pub fn head(url: Url) -> Self {
		Self::new(Method::Head, url)
	}

	/// Creates a `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::Get, url)
	}

	/// Attaches a header before dispatch.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Returns the first value of `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Fully buffered response. Header names are stored lowercase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers keyed by lowercase name; only the first value of each is kept.
	pub headers: BTreeMap<String, String>,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Only `200 OK` counts as success; every other status is retriable.
	pub const SUCCESS_STATUS: u16 = 200;

	/// Creates an empty response with the provided status.
	pub fn new(status: u16) -> Self {
		Self { status, ..Default::default() }
	}

	/// Adds a header, keeping any value already stored under the same name.
	pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
		self.headers.entry(name.to_ascii_lowercase()).or_insert_with(|| value.into());

		self
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = body.into();

		self
	}

	/// Returns whether the status indicates success.
	pub fn is_success(&self) -> bool {
		self.status == Self::SUCCESS_STATUS
	}

	/// Returns the value of `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The per-request timeout belongs to the wrapped client; when it fires the exchange
/// resolves to a [`TransportError`] and is retried like any other transport failure.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`], keeping its timeout and TLS settings.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests time out after `timeout`.
	pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout).build()?;

		Ok(Self::with_client(client))
	}
}
#[cfg(feature = "reqwest")]
impl HttpClient for ReqwestHttpClient {
	fn send<'a>(&'a self, request: &'a HttpRequest) -> HttpFuture<'a> {
		Box::pin(async move {
			let method = match request.method {
				Method::Head => reqwest::Method::HEAD,
				Method::Get => reqwest::Method::GET,
			};
			let mut builder = self.0.request(method, request.url.clone());

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}

			let response =
				builder.send().await.map_err(|e| TransportError::network(&request.url, e))?;
			let status = response.status().as_u16();
			let headers = collect_headers(response.headers());
			let body = response
				.bytes()
				.await
				.map_err(|e| TransportError::network(&request.url, e))?
				.to_vec();

			Ok(HttpResponse { status, headers, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
	let mut map = BTreeMap::new();

	for (name, value) in headers {
		if let Ok(value) = value.to_str() {
			map.entry(name.as_str().to_owned()).or_insert_with(|| value.to_owned());
		}
	}

	map
}
