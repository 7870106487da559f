//! Optional observability helpers for the executor and workflow.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `noclist.phase` with a `phase` field, plus
//!   `debug` events for each attempt and backoff wait and a `warn` event when retries run out.
//! - Enable `metrics` to increment `noclist_phase_total` (labeled by `phase` + `outcome`) and
//!   `noclist_request_attempt_total` (labeled by `method` + `outcome`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{
	_prelude::*,
	error::ExecuteError,
	http::{HttpRequest, HttpResponse},
};

/// Workflow phases observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
	/// `HEAD /auth` to obtain the token.
	TokenAcquisition,
	/// Checksum-signed `GET` of the protected resource.
	ResourceFetch,
}
impl Phase {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Phase::TokenAcquisition => "token_acquisition",
			Phase::ResourceFetch => "resource_fetch",
		}
	}
}
impl Display for Phase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseOutcome {
	/// Entry to a phase.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl PhaseOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			PhaseOutcome::Attempt => "attempt",
			PhaseOutcome::Success => "success",
			PhaseOutcome::Failure => "failure",
		}
	}
}
impl Display for PhaseOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Classification of a single dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttemptOutcome {
	/// `200 OK`.
	Success,
	/// Completed with a non-success status.
	Upstream,
	/// Never completed.
	Transport,
}
impl AttemptOutcome {
	/// Classifies an executor attempt result.
	pub fn of(result: &Result<HttpResponse, ExecuteError>) -> Self {
		match result {
			Ok(_) => AttemptOutcome::Success,
			Err(ExecuteError::Upstream(_)) => AttemptOutcome::Upstream,
			Err(ExecuteError::Transport(_)) => AttemptOutcome::Transport,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AttemptOutcome::Success => "success",
			AttemptOutcome::Upstream => "upstream",
			AttemptOutcome::Transport => "transport",
		}
	}
}
impl Display for AttemptOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Logs and counts a single dispatch; `index` is zero for the initial attempt.
pub fn record_attempt(
	request: &HttpRequest,
	index: u32,
	result: &Result<HttpResponse, ExecuteError>,
) {
	let outcome = AttemptOutcome::of(result);

	log_attempt(request, index, outcome, result.as_ref().err());
	record_attempt_outcome(request.method, outcome);
}
