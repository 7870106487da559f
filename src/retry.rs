//! Resilient request execution with bounded retries and exponential backoff.
//!
//! [`Executor::execute`] dispatches a request through the configured [`HttpClient`] and
//! classifies the outcome: a `200 OK` response returns immediately, while a transport
//! failure or any other status is retriable. Retries wait `backoff * 2^n` before
//! redispatching the identical request, up to [`RetryPolicy::max_retries`] times. Once
//! the budget is spent the last attempt's outcome is returned unchanged; the executor
//! never synthesizes a separate "exhausted" error.

mod metrics;
mod policy;

pub use metrics::ExecutorMetrics;
pub use policy::RetryPolicy;

// self
use crate::{
	_prelude::*,
	error::{ExecuteError, UpstreamError},
	http::{HttpClient, HttpRequest, HttpResponse},
	obs,
};

/// Wraps an [`HttpClient`] with the retry-and-backoff policy.
#[derive(Clone)]
pub struct Executor<C>
where
	C: ?Sized + HttpClient,
{
	/// Transport used for every dispatch.
	pub http_client: Arc<C>,
	/// Retry bounds, read-only for the executor's lifetime.
	pub policy: RetryPolicy,
	/// Shared counters for attempts and call outcomes.
	pub metrics: Arc<ExecutorMetrics>,
}
impl<C> Executor<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates an executor around `http_client`.
	pub fn new(http_client: impl Into<Arc<C>>, policy: RetryPolicy) -> Self {
		Self { http_client: http_client.into(), policy, metrics: Default::default() }
	}

	/// Executes `request`, retrying transport failures and non-success statuses.
	///
	/// Backoff waits are scheduled delays on the async runtime; nothing else runs
	/// between attempts of the same call, so attempts stay strictly ordered.
	pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExecuteError> {
		let mut retries = 0;
		let mut outcome = self.attempt(request, retries).await;

		while retries < self.policy.max_retries && outcome.is_err() {
			let delay = self.policy.delay_for(retries);

			obs::log_backoff(request, retries.saturating_add(1), delay);

			if !delay.is_zero() {
				tokio::time::sleep(delay).await;
			}

			retries += 1;
			self.metrics.record_retry();
			outcome = self.attempt(request, retries).await;
		}

		match &outcome {
			Ok(_) => self.metrics.record_success(),
			Err(e) => {
				self.metrics.record_failure();
				obs::log_exhausted(request, self.policy.max_attempts(), e);
			},
		}

		outcome
	}

	async fn attempt(
		&self,
		request: &HttpRequest,
		index: u32,
	) -> Result<HttpResponse, ExecuteError> {
		self.metrics.record_attempt();

		let result = match self.http_client.send(request).await {
			Ok(response) if response.is_success() => Ok(response),
			Ok(response) => Err(UpstreamError { response }.into()),
			Err(e) => Err(e.into()),
		};

		obs::record_attempt(request, index, &result);

		result
	}
}
impl<C> Debug for Executor<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Executor")
			.field("policy", &self.policy)
			.field("metrics", &self.metrics)
			.finish()
	}
}
