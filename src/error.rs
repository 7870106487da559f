//! Client-level error types shared across the executor, workflow, and CLI shell.

// self
use crate::{_prelude::*, http::HttpResponse};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token acquisition failed; the workflow stops before touching the resource endpoint.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Checksum-signed resource fetch failed.
	#[error(transparent)]
	ChecksumFetch(#[from] ChecksumFetchError),
	/// Records could not be rendered as JSON.
	#[error("Records could not be rendered as JSON.")]
	Render(#[source] serde_json::Error),
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint cannot be parsed as a URL.
	#[error("Endpoint `{endpoint}` is not a valid URL.")]
	InvalidEndpoint {
		/// Raw endpoint supplied by the caller.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint uses a scheme other than http or https.
	#[error("Endpoint must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, timeouts). Always retriable.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{url}`.")]
	Network {
		/// Target of the failed request.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error raised while calling `url`.
	pub fn network(url: &Url, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { url: url.to_string(), source: Box::new(src) }
	}
}

/// The exchange completed but the upstream answered with a non-success status.
#[derive(Debug, ThisError)]
#[error("Upstream responded with HTTP {}.", .response.status)]
pub struct UpstreamError {
	/// Final response, kept intact for callers that want to inspect it.
	pub response: HttpResponse,
}
impl UpstreamError {
	/// Returns the HTTP status code of the rejected response.
	pub fn status(&self) -> u16 {
		self.response.status
	}
}

/// Outcome of an exchange that did not produce a successful response.
///
/// The executor surfaces the last attempt's failure through this type exactly as it
/// would have surfaced a first-attempt failure.
#[derive(Debug, ThisError)]
pub enum ExecuteError {
	/// Request never completed.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request completed with a non-success status.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
}
impl ExecuteError {
	/// Returns the upstream status code, when the exchange completed.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Transport(_) => None,
			Self::Upstream(e) => Some(e.status()),
		}
	}
}

/// Token acquisition failures. Terminal for the workflow.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Authentication endpoint could not be reached successfully within the retry budget.
	#[error("Authentication request failed.")]
	Exchange(#[source] ExecuteError),
	/// Authentication endpoint succeeded but omitted the token header.
	#[error("Authentication response is missing the `{header}` header.")]
	MissingToken {
		/// Expected header name.
		header: &'static str,
	},
}

/// Checksum-signed resource fetch failures. Terminal for the workflow.
#[derive(Debug, ThisError)]
pub enum ChecksumFetchError {
	/// Resource endpoint could not be reached successfully within the retry budget.
	#[error("Checksum-signed request to `{path}` failed.")]
	Exchange {
		/// Resource path that was requested.
		path: &'static str,
		/// Final executor failure.
		#[source]
		source: ExecuteError,
	},
}
