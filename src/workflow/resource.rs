// self
use crate::{
	_prelude::*,
	auth::{AuthToken, Checksum},
	error::ChecksumFetchError,
	http::{HttpClient, HttpRequest},
	obs::{self, Phase, PhaseOutcome, PhaseSpan},
	workflow::{CHECKSUM_HEADER, USERS_PATH, Workflow},
};

impl<C> Workflow<C>
where
	C: ?Sized + HttpClient,
{
	/// Issues the checksum-signed `GET /users` and returns the raw body.
	///
	/// The checksum is computed once; every retry of the request carries the same value.
	pub async fn fetch_resource(&self, token: &AuthToken) -> Result<Vec<u8>, ChecksumFetchError> {
		const PHASE: Phase = Phase::ResourceFetch;

		let span = PhaseSpan::new(PHASE);

		obs::record_phase_outcome(PHASE, PhaseOutcome::Attempt);

		let result = span
			.instrument(async move {
				let checksum = Checksum::compute(token, USERS_PATH);
				let request =
					HttpRequest::get(self.url(USERS_PATH)).with_header(CHECKSUM_HEADER, checksum);

				self.executor
					.execute(&request)
					.await
					.map(|response| response.body)
					.map_err(|source| ChecksumFetchError::Exchange { path: USERS_PATH, source })
			})
			.await;

		match &result {
			Ok(_) => obs::record_phase_outcome(PHASE, PhaseOutcome::Success),
			Err(_) => obs::record_phase_outcome(PHASE, PhaseOutcome::Failure),
		}

		result
	}
}
