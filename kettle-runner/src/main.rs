//! Kettle Runner CLI
//!
//! Runs one job on a Kettle server as a step of a larger pipeline.
//!
//! Exit status is 0 when the job finished cleanly and non-zero otherwise.
//! With `--push-result` the final status response is written to stdout so
//! the calling pipeline can pick it up; logs and the summary go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use kettle_client::KettleClient;
use kettle_core::domain::job::{JobIdentity, RunOutcome};
use kettle_core::domain::poll::PollConfig;
use kettle_runner::config::DEFAULT_SERVER_URL;
use kettle_runner::{Config, JobRunController, RunError, RunOptions};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kettle-run")]
#[command(about = "Start a Kettle job and wait for it to finish", long_about = None)]
struct Cli {
    /// Base URL of the Kettle web service
    #[arg(long, env = "KETTLE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Basic auth user
    #[arg(long, env = "KETTLE_USERNAME")]
    username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "KETTLE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Repository folder of the job, including the trailing separator
    #[arg(long, env = "KETTLE_JOB_FOLDER")]
    job_folder: String,

    /// Name of the job
    #[arg(long, env = "KETTLE_JOB_NAME")]
    job_name: String,

    /// Max seconds to spend in each wait phase (0 waits forever)
    #[arg(long, env = "KETTLE_TIMEOUT", default_value_t = 0)]
    timeout: u64,

    /// Seconds between status checks (at least 5)
    #[arg(long, env = "KETTLE_CYCLE_INTERVAL", default_value_t = 5)]
    cycle_interval: u64,

    /// Seconds before a single HTTP request is abandoned
    #[arg(long, env = "KETTLE_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// Print the final status response to stdout
    #[arg(long)]
    push_result: bool,

    /// Log raw server responses
    #[arg(long)]
    log_response: bool,

    /// Print the run outcome as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let job = JobIdentity::new(self.job_folder, self.job_name);
        let mut config = Config::new(self.server_url, job);

        config.poll = PollConfig::new(self.cycle_interval, self.timeout);
        config.options = RunOptions {
            push_result: self.push_result,
            log_response: self.log_response,
        };
        config.request_timeout = Duration::from_secs(self.request_timeout);

        match self.username {
            Some(username) => config.with_credentials(username, self.password),
            None => {
                // left for validate() to reject
                config.password = self.password;
                config
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for the result payload
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kettle_runner=info,kettle_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    let config = cli.into_config();
    config.validate().context("Invalid configuration")?;

    info!(
        "Loaded configuration: server_url={}, job={}",
        config.server_url, config.job
    );

    let client = build_client(&config)?;
    let controller = JobRunController::new(client, config.job.clone(), config.poll, config.options);

    match controller.run().await {
        Ok(outcome) => {
            print_outcome(&outcome, json)?;
            Ok(())
        }
        Err(e) => {
            error!("Job {} failed: {}", config.job, e);
            print_failure(&config, &e);
            Err(e).with_context(|| format!("Job {} failed", config.job))
        }
    }
}

/// Builds the HTTP client bound to the configured server
fn build_client(config: &Config) -> Result<KettleClient> {
    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let client = KettleClient::with_client(config.server_url.clone(), http_client);

    Ok(match &config.username {
        Some(username) => client.with_basic_auth(username.clone(), config.password.clone()),
        None => client,
    })
}

/// Writes a failure line and the offending server response to stderr
fn print_failure(config: &Config, err: &RunError) {
    eprintln!("{} {}", "✗".red().bold(), format!("Job {} failed", config.job).red());

    if let Some(response) = err.response() {
        eprintln!("{}", "Server response:".bold());
        eprintln!("{}", response.dimmed());
    }
}

/// Writes the result payload to stdout and a summary to stderr
fn print_outcome(outcome: &RunOutcome, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(outcome).context("Failed to serialize run outcome")?;
        println!("{}", rendered);
    } else if let Some(payload) = &outcome.payload {
        println!("{}", payload);
    }

    let took = outcome.completed_at - outcome.started_at;
    eprintln!(
        "{} {} {}",
        "✓".green().bold(),
        format!("Job {} finished", outcome.job).green(),
        format!("({} polls, {}s)", outcome.polls, took.num_seconds()).dimmed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let base = ["kettle-run", "--job-folder", "/etl/", "--job-name", "load_sales"];
        let cli = Cli::try_parse_from(base.iter().chain(args)).unwrap();
        cli.into_config()
    }

    #[test]
    fn test_cli_defaults() {
        let config = parse(&[]);
        assert_eq!(config.job.key(), "/etl/load_sales");
        assert_eq!(config.poll, PollConfig::new(5, 0));
        assert_eq!(config.options, RunOptions::default());
        assert_eq!(config.username, None);
        assert_eq!(config.password, None);
    }

    #[test]
    fn test_cli_credentials_and_switches() {
        let config = parse(&[
            "--server-url",
            "http://carte:8081/kettle",
            "--username",
            "cluster",
            "--password",
            "cluster",
            "--cycle-interval",
            "2",
            "--timeout",
            "600",
            "--push-result",
        ]);

        assert_eq!(config.server_url, "http://carte:8081/kettle");
        assert_eq!(config.username.as_deref(), Some("cluster"));
        assert_eq!(config.password.as_deref(), Some("cluster"));
        assert_eq!(config.poll, PollConfig::new(5, 600));
        assert!(config.options.push_result);
        assert!(!config.options.log_response);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_password_without_username_is_invalid() {
        let config = parse(&["--password", "secret"]);
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert!(config.validate().is_err());
    }
}
