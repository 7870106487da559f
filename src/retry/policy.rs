// self
use crate::_prelude::*;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Bounded retry configuration applied to every exchange an [`Executor`] performs.
///
/// Both bounds are non-negative by construction. The total number of attempts for one
/// call is `max_retries + 1`.
///
/// [`Executor`]: crate::retry::Executor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RetryPolicy {
	/// Maximum number of retries after the initial attempt.
	pub max_retries: u32,
	/// Base backoff; the n-th retry (starting at 0) waits `backoff * 2^n`.
	pub backoff: Duration,
}
impl RetryPolicy {
	/// Default retry budget.
	pub const DEFAULT_MAX_RETRIES: u32 = 2;
	/// Default base backoff.
	pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

	/// Creates a policy with the provided bounds.
	pub const fn new(max_retries: u32, backoff: Duration) -> Self {
		Self { max_retries, backoff }
	}

	/// Policy that performs exactly one attempt.
	pub const fn no_retries() -> Self {
		Self::new(0, Duration::ZERO)
	}

	/// Returns the number of dispatches one call may perform, saturating at `u32::MAX`.
	pub const fn max_attempts(&self) -> u32 {
		self.max_retries.saturating_add(1)
	}

	/// Overrides the retry budget.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;

		self
	}

	/// Overrides the base backoff.
	pub fn with_backoff(mut self, backoff: Duration) -> Self {
		self.backoff = backoff;

		self
	}

	/// Returns the wait inserted before retry number `retry_index` (zero-based).
	///
	/// Saturates at [`Duration::MAX`] instead of overflowing.
	pub fn delay_for(&self, retry_index: u32) -> Duration {
		if self.backoff.is_zero() {
			return Duration::ZERO;
		}

		let Some(nanos) = 1_u128
			.checked_shl(retry_index)
			.and_then(|factor| self.backoff.as_nanos().checked_mul(factor))
		else {
			return Duration::MAX;
		};

		match u64::try_from(nanos / NANOS_PER_SEC) {
			Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
			Err(_) => Duration::MAX,
		}
	}

	/// Returns the total time spent waiting when every retry is used.
	pub fn total_backoff(&self) -> Duration {
		(0..self.max_retries)
			.map(|idx| self.delay_for(idx))
			.fold(Duration::ZERO, Duration::saturating_add)
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_MAX_RETRIES, Self::DEFAULT_BACKOFF)
	}
}
