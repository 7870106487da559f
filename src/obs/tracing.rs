// self
use crate::{
	_prelude::*,
	error::ExecuteError,
	http::HttpRequest,
	obs::{AttemptOutcome, Phase},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedPhase<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedPhase<F> = F;

/// A span builder used by workflow phases.
#[derive(Clone, Debug)]
pub struct PhaseSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl PhaseSpan {
	/// Creates a new span tagged with the provided phase.
	pub fn new(phase: Phase) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("noclist.phase", phase = phase.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = phase;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedPhase<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event describing one dispatch.
pub fn log_attempt(
	request: &HttpRequest,
	index: u32,
	outcome: AttemptOutcome,
	error: Option<&ExecuteError>,
) {
	#[cfg(feature = "tracing")]
	{
		let status = error.and_then(ExecuteError::status);

		match error {
			Some(ExecuteError::Transport(e)) => tracing::debug!(
				method = request.method.as_str(),
				url = %request.url,
				attempt = index,
				outcome = outcome.as_str(),
				error = %e,
				"request attempt failed"
			),
			_ => tracing::debug!(
				method = request.method.as_str(),
				url = %request.url,
				attempt = index,
				outcome = outcome.as_str(),
				status,
				"request attempt completed"
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (request, index, outcome, error);
	}
}

/// Emits a `debug` event before the executor waits for `delay`.
pub fn log_backoff(request: &HttpRequest, retry: u32, delay: Duration) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			method = request.method.as_str(),
			url = %request.url,
			retry,
			delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
			"backing off before retry"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (request, retry, delay);
	}
}

/// Emits a `warn` event when a call ends in failure after `attempts` dispatches.
pub fn log_exhausted(request: &HttpRequest, attempts: u32, error: &ExecuteError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			method = request.method.as_str(),
			url = %request.url,
			attempts,
			error = %error,
			"request failed after exhausting retries"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (request, attempts, error);
	}
}
