mod support;

// std
use std::time::Duration;
// crates.io
use tokio::time::Instant;
// self
use noclist::{
	error::ExecuteError,
	http::{HttpRequest, HttpResponse},
	retry::RetryPolicy,
	url::Url,
};
use support::{ScriptedHttpClient, Step};

fn request() -> HttpRequest {
	let url = Url::parse("http://noc.test/users").expect("Fixture URL should parse.");

	HttpRequest::get(url).with_header("X-Request-Checksum", "fixed")
}

#[tokio::test]
async fn aborted_then_accepted_then_ok_takes_three_attempts() {
	let client = ScriptedHttpClient::new([
		Step::Abort,
		Step::status(202),
		Step::Respond(HttpResponse::new(200).with_body("alice\n")),
	]);
	let executor = support::executor(&client, RetryPolicy::new(2, Duration::ZERO));
	let response = executor
		.execute(&request())
		.await
		.expect("Third attempt should succeed after an abort and a 202.");

	assert_eq!(response.status, 200);
	assert_eq!(response.body, b"alice\n");
	assert_eq!(client.calls(), 3);
	assert_eq!(executor.metrics.attempts(), 3);
	assert_eq!(executor.metrics.retries(), 2);
	assert_eq!(executor.metrics.successes(), 1);
	assert_eq!(executor.metrics.failures(), 0);
}

#[tokio::test]
async fn persistent_500_returns_final_response_after_budget() {
	let client = ScriptedHttpClient::new([Step::status(500)]);
	let executor = support::executor(&client, RetryPolicy::new(2, Duration::ZERO));
	let err = executor
		.execute(&request())
		.await
		.expect_err("A server that always fails should exhaust the retry budget.");

	match err {
		ExecuteError::Upstream(e) => assert_eq!(e.response.status, 500),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert_eq!(client.calls(), 3);
	assert_eq!(executor.metrics.failures(), 1);
}

#[tokio::test]
async fn final_transport_failure_is_returned_unchanged() {
	let client = ScriptedHttpClient::new([Step::status(503), Step::Abort]);
	let executor = support::executor(&client, RetryPolicy::new(3, Duration::ZERO));
	let err = executor
		.execute(&request())
		.await
		.expect_err("Aborted connections should exhaust the retry budget.");

	assert!(matches!(err, ExecuteError::Transport(_)), "Unexpected error: {err:?}.");
	assert_eq!(err.status(), None);
	assert_eq!(client.calls(), 4);
}

#[tokio::test]
async fn every_attempt_sends_the_identical_request() {
	let client = ScriptedHttpClient::new([Step::Abort, Step::status(429), Step::status(200)]);
	let executor = support::executor(&client, RetryPolicy::new(5, Duration::ZERO));
	let request = request();

	executor.execute(&request).await.expect("Third attempt should succeed.");

	let seen = client.requests();

	assert_eq!(seen.len(), 3);
	assert!(seen.iter().all(|sent| *sent == request));
}

#[tokio::test]
async fn zero_retries_means_exactly_one_attempt() {
	let client = ScriptedHttpClient::new([Step::status(502), Step::status(200)]);
	let executor = support::executor(&client, RetryPolicy::no_retries());
	let err = executor.execute(&request()).await.expect_err("No retry should be attempted.");

	assert_eq!(err.status(), Some(502));
	assert_eq!(client.calls(), 1);
	assert_eq!(executor.metrics.retries(), 0);
}

#[tokio::test(start_paused = true)]
async fn first_attempt_success_never_waits() {
	let client = ScriptedHttpClient::new([Step::status(200)]);
	let executor = support::executor(&client, RetryPolicy::new(3, Duration::from_secs(10)));
	let started = Instant::now();

	executor.execute(&request()).await.expect("First attempt should succeed.");

	assert_eq!(started.elapsed(), Duration::ZERO);
	assert_eq!(client.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn retriable_streak_then_success_waits_exponentially() {
	let base = Duration::from_millis(100);

	for retries in 0..=4_u32 {
		let mut steps = vec![Step::Abort; retries as usize];

		steps.push(Step::status(200));

		let client = ScriptedHttpClient::new(steps);
		let policy = RetryPolicy::new(retries, base);
		let executor = support::executor(&client, policy);
		let started = Instant::now();

		executor
			.execute(&request())
			.await
			.expect("The attempt after the retriable streak should succeed.");

		let expected_wait = base * (2_u32.pow(retries) - 1);

		assert_eq!(client.calls(), retries as usize + 1);
		assert!(started.elapsed() >= expected_wait, "Waited less than {expected_wait:?}.");

		let times = client.dispatch_times();

		for (idx, pair) in times.windows(2).enumerate() {
			let gap = pair[1] - pair[0];

			assert!(gap >= policy.delay_for(idx as u32), "Retry {idx} waited only {gap:?}.");
		}
	}
}

#[tokio::test(start_paused = true)]
async fn exhausted_budget_waits_the_full_backoff_schedule() {
	let client = ScriptedHttpClient::new([Step::status(500)]);
	let policy = RetryPolicy::new(3, Duration::from_millis(250));
	let executor = support::executor(&client, policy);
	let started = Instant::now();

	executor.execute(&request()).await.expect_err("Every attempt should fail.");

	assert_eq!(client.calls(), 4);
	assert!(started.elapsed() >= policy.total_backoff());
	assert_eq!(policy.total_backoff(), Duration::from_millis(1_750));
}
