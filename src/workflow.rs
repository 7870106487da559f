//! Two-step token-and-checksum workflow driven through the resilient executor.
//!
//! [`Workflow::fetch_protected_resource`] runs two strictly sequential phases:
//!
//! 1. [`Workflow::acquire_token`] issues `HEAD /auth` and reads the token from the
//!    `Badsec-Authentication-Token` response header.
//! 2. [`Workflow::fetch_resource`] signs `GET /users` with an `X-Request-Checksum` header
//!    computed from the token and returns the body unmodified.
//!
//! Each phase goes through the [`Executor`] on its own, so a transient failure in the
//! resource fetch is retried without re-acquiring the token. The workflow adds no retry
//! logic of its own; an exhausted phase maps straight into [`AuthError`] or
//! [`ChecksumFetchError`](crate::error::ChecksumFetchError).

mod resource;
mod token;

// self
use crate::{
	_prelude::*,
	config::{self, ClientConfig},
	error::AuthError,
	http::HttpClient,
	retry::Executor,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Response header carrying the issued token.
pub const TOKEN_HEADER: &str = "Badsec-Authentication-Token";
/// Request header carrying the per-request checksum.
pub const CHECKSUM_HEADER: &str = "X-Request-Checksum";
/// Path of the authentication endpoint.
pub const AUTH_PATH: &str = "/auth";
/// Path of the protected resource.
pub const USERS_PATH: &str = "/users";

#[cfg(feature = "reqwest")]
/// Workflow specialized for the crate's default reqwest transport.
pub type ReqwestWorkflow = Workflow<ReqwestHttpClient>;

/// Drives the token acquisition and checksum-signed fetch against one endpoint.
#[derive(Clone)]
pub struct Workflow<C>
where
	C: ?Sized + HttpClient,
{
	/// Executor applied to both phases.
	pub executor: Executor<C>,
	/// Base URL the protocol paths are appended to.
	pub endpoint: Url,
}
impl<C> Workflow<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates a workflow from an existing executor.
	pub fn new(executor: Executor<C>, endpoint: Url) -> Self {
		Self { executor, endpoint }
	}

	/// Creates a workflow that reuses the caller-provided transport.
	///
	/// The configured timeout is not applied here; it belongs to the transport.
	pub fn with_http_client(config: &ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self::new(Executor::new(http_client, config.retry), config.endpoint.clone())
	}

	/// Acquires a token, then fetches the protected resource with it.
	pub async fn fetch_protected_resource(&self) -> Result<Vec<u8>> {
		let token = self.acquire_token().await?;
		let body = self.fetch_resource(&token).await?;

		Ok(body)
	}

	fn url(&self, path: &str) -> Url {
		config::resolve(&self.endpoint, path)
	}
}
#[cfg(feature = "reqwest")]
impl Workflow<ReqwestHttpClient> {
	/// Creates a workflow backed by a reqwest client honoring the configured timeout.
	pub fn from_config(config: &ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.timeout)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Debug for Workflow<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Workflow")
			.field("endpoint", &self.endpoint.as_str())
			.field("executor", &self.executor)
			.finish()
	}
}

/// Maps a missing or empty token header into [`AuthError::MissingToken`].
pub(crate) fn missing_token() -> AuthError {
	AuthError::MissingToken { header: TOKEN_HEADER }
}
