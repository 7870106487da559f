// self
use crate::{
	http::Method,
	obs::{AttemptOutcome, Phase, PhaseOutcome},
};

/// Records a phase outcome via the global metrics recorder (when enabled).
pub fn record_phase_outcome(phase: Phase, outcome: PhaseOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"noclist_phase_total",
			"phase" => phase.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (phase, outcome);
	}
}

/// Records a single dispatch via the global metrics recorder (when enabled).
pub fn record_attempt_outcome(method: Method, outcome: AttemptOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"noclist_request_attempt_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}
