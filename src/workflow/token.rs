// self
use crate::{
	_prelude::*,
	auth::AuthToken,
	error::AuthError,
	http::{HttpClient, HttpRequest},
	obs::{self, Phase, PhaseOutcome, PhaseSpan},
	workflow::{self, AUTH_PATH, TOKEN_HEADER, Workflow},
};

impl<C> Workflow<C>
where
	C: ?Sized + HttpClient,
{
	/// Issues `HEAD /auth` and extracts the token from the response headers.
	pub async fn acquire_token(&self) -> Result<AuthToken, AuthError> {
		const PHASE: Phase = Phase::TokenAcquisition;

		let span = PhaseSpan::new(PHASE);

		obs::record_phase_outcome(PHASE, PhaseOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = HttpRequest::head(self.url(AUTH_PATH));
				let response =
					self.executor.execute(&request).await.map_err(AuthError::Exchange)?;

				response
					.header(TOKEN_HEADER)
					.and_then(AuthToken::new)
					.ok_or_else(workflow::missing_token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_phase_outcome(PHASE, PhaseOutcome::Success),
			Err(_) => obs::record_phase_outcome(PHASE, PhaseOutcome::Failure),
		}

		result
	}
}
