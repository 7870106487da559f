//! Fetches the BADSEC NOC list and prints it to stdout as a JSON array.
//!
//! Diagnostics go to stderr; verbosity follows `RUST_LOG` (default `warn`). Any failure
//! exits with a non-zero status and no partial output.

// std
use std::time::Duration;
// crates.io
use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use noclist::{
	config::ClientConfig, records::Records, retry::RetryPolicy, workflow::ReqwestWorkflow,
};

#[derive(Debug, Parser)]
#[command(version, about = "Fetches the BADSEC NOC list and prints it as a JSON array.")]
struct Cli {
	/// Base URL of the BADSEC server.
	#[arg(default_value = ClientConfig::DEFAULT_ENDPOINT)]
	endpoint: String,
	/// Retries per request after the initial attempt.
	#[arg(long, default_value_t = RetryPolicy::DEFAULT_MAX_RETRIES)]
	max_retries: u32,
	/// Base backoff in milliseconds; doubles on every retry.
	#[arg(long, default_value_t = 1_000)]
	backoff_ms: u64,
	/// Per-request timeout in milliseconds.
	#[arg(long, default_value_t = 3_000)]
	timeout_ms: u64,
}
impl Cli {
	fn config(&self) -> Result<ClientConfig> {
		let retry = RetryPolicy::new(self.max_retries, Duration::from_millis(self.backoff_ms));
		let config = ClientConfig::from_endpoint(&self.endpoint)?
			.with_retry(retry)
			.with_timeout(Duration::from_millis(self.timeout_ms));

		Ok(config)
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();
	let config = cli.config()?;

	tracing::debug!(endpoint = %config.endpoint, retry = ?config.retry, "starting NOC list fetch");

	let workflow = ReqwestWorkflow::from_config(&config)?;
	let body = workflow.fetch_protected_resource().await?;
	let records = Records::parse(&body);

	println!("{}", records.to_json()?);

	Ok(())
}
