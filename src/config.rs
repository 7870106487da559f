//! Client configuration passed explicitly into the workflow.

// self
use crate::{_prelude::*, error::ConfigError, retry::RetryPolicy};

/// Endpoint, retry bounds, and transport timeout for one client instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL the protocol paths are appended to.
	pub endpoint: Url,
	/// Retry bounds applied to each phase independently.
	pub retry: RetryPolicy,
	/// Per-request timeout enforced by the transport.
	pub timeout: Duration,
}
impl ClientConfig {
	/// Endpoint used when none is supplied.
	pub const DEFAULT_ENDPOINT: &'static str = "http://0.0.0.0:8888";
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

	/// Creates a configuration for `endpoint` with default retry bounds and timeout.
	pub fn new(endpoint: Url) -> Self {
		Self { endpoint, retry: RetryPolicy::default(), timeout: Self::DEFAULT_TIMEOUT }
	}

	/// Parses `raw` as the endpoint and applies defaults for everything else.
	pub fn from_endpoint(raw: &str) -> Result<Self, ConfigError> {
		Ok(Self::new(Self::parse_endpoint(raw)?))
	}

	/// Parses and validates an endpoint URL; only http and https are accepted.
	pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
		let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint {
			endpoint: raw.to_owned(),
			source,
		})?;

		match url.scheme() {
			"http" | "https" => Ok(url),
			scheme => Err(ConfigError::UnsupportedScheme { scheme: scheme.to_owned() }),
		}
	}

	/// Overrides the endpoint.
	pub fn with_endpoint(mut self, endpoint: Url) -> Self {
		self.endpoint = endpoint;

		self
	}

	/// Overrides the retry bounds.
	pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Overrides the per-request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}
}

/// Appends `path` to the path of `endpoint`, dropping any query or fragment.
pub fn resolve(endpoint: &Url, path: &str) -> Url {
	let mut url = endpoint.clone();
	let joined = format!("{}{path}", url.path().trim_end_matches('/'));

	url.set_path(&joined);
	url.set_query(None);
	url.set_fragment(None);

	url
}
