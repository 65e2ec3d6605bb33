mod config;
mod errors;
mod evaluation;
mod extraction;
mod llm_client;
mod pipeline;
mod samples;
mod storage;

use std::path::PathBuf;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::LlmRequirementExtractor;
use crate::llm_client::LlmClient;
use crate::pipeline::run_match;
use crate::samples::{SAMPLE_JOB_DESCRIPTION, SAMPLE_RESUME};
use crate::storage::S3ResultStore;

/// Matches a candidate resume against a job description and stores the
/// scored verdict.
#[derive(Debug, Parser)]
#[command(name = "matcher", version)]
struct Args {
    /// Path to the job description text file. Falls back to a built-in
    /// sample when omitted.
    #[arg(long)]
    job_description: Option<PathBuf>,

    /// Path to the resume text file. Falls back to a built-in sample when
    /// omitted.
    #[arg(long)]
    resume: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    let job_description = read_input(args.job_description.as_deref(), SAMPLE_JOB_DESCRIPTION)
        .context("failed to read job description")?;
    let resume =
        read_input(args.resume.as_deref(), SAMPLE_RESUME).context("failed to read resume")?;

    // Initialize S3
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let extractor = LlmRequirementExtractor::new(llm);
    let store = S3ResultStore::new(s3, config.s3_bucket.clone());

    let outcome = run_match(&extractor, &store, &job_description, &resume)
        .await
        .context("requirement extraction failed")?;

    println!("{}", serde_json::to_string_pretty(&outcome.result)?);

    match outcome.storage {
        Ok(key) => println!("Saved to s3://{}/{}", config.s3_bucket, key),
        Err(e) => warn!("Result was not persisted: {e}"),
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>, fallback: &str) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("cannot read '{}'", p.display())),
        None => Ok(fallback.to_string()),
    }
}

/// Constructs an S3 client with static credentials from config.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "matcher-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
