//! Scripted transport shared by integration tests.

#![allow(dead_code)]

// std
use std::{collections::VecDeque, io, sync::Arc};
// crates.io
use parking_lot::Mutex;
use tokio::time::Instant;
// self
use noclist::{
	error::TransportError,
	http::{HttpClient, HttpFuture, HttpRequest, HttpResponse},
	retry::{Executor, RetryPolicy},
};

/// One scripted reaction to a dispatch.
#[derive(Clone, Debug)]
pub enum Step {
	/// Resolve with the provided response.
	Respond(HttpResponse),
	/// Fail as if the connection dropped mid-response.
	Abort,
}
impl Step {
	pub fn status(status: u16) -> Self {
		Self::Respond(HttpResponse::new(status))
	}
}

/// Replays [`Step`]s in order; the last step repeats once the script runs out.
#[derive(Default)]
pub struct ScriptedHttpClient {
	steps: Mutex<VecDeque<Step>>,
	seen: Mutex<Vec<(HttpRequest, Instant)>>,
}
impl ScriptedHttpClient {
	pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
		Arc::new(Self { steps: Mutex::new(steps.into_iter().collect()), seen: Default::default() })
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.seen.lock().iter().map(|(request, _)| request.clone()).collect()
	}

	pub fn dispatch_times(&self) -> Vec<Instant> {
		self.seen.lock().iter().map(|(_, at)| *at).collect()
	}

	pub fn calls(&self) -> usize {
		self.seen.lock().len()
	}

	fn next_step(&self) -> Option<Step> {
		let mut steps = self.steps.lock();

		if steps.len() > 1 { steps.pop_front() } else { steps.front().cloned() }
	}
}
impl HttpClient for ScriptedHttpClient {
	fn send<'a>(&'a self, request: &'a HttpRequest) -> HttpFuture<'a> {
		Box::pin(async move {
			self.seen.lock().push((request.clone(), Instant::now()));

			match self.next_step() {
				Some(Step::Respond(response)) => Ok(response),
				Some(Step::Abort) | None => Err(TransportError::Io(io::Error::new(
					io::ErrorKind::ConnectionAborted,
					"connection aborted mid-response",
				))),
			}
		})
	}
}

/// Builds an executor that shares `client` with the test.
pub fn executor(
	client: &Arc<ScriptedHttpClient>,
	policy: RetryPolicy,
) -> Executor<ScriptedHttpClient> {
	Executor::new(client.clone(), policy)
}
