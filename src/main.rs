// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use deploy_invoker::config::{load_and_validate_config, RuntimeBuilder};
use deploy_invoker::model::{InvocationContext, PackageMode, TaskArguments, TaskDescription};
use deploy_invoker::observability::{init_tracing, LogFormat};

/// Route deployment tasks to the pipeline compiler, deploy-spec compiler or runner.
#[derive(Parser)]
#[command(name = "deploy-invoker")]
#[command(version)]
struct Cli {
    /// Configuration file (.yaml, .yml or .toml)
    #[arg(short, long, env = "INVOKER_CONFIG")]
    config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "INVOKER_LOG_FORMAT")]
    log_format: LogFormat,

    /// Request id recorded in the logs
    #[arg(long)]
    request_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a JSON task request read from a file, or stdin with `-`
    Run {
        #[arg(short, long, default_value = "-")]
        task: String,
    },

    /// Build a task request from flags and route it
    Submit(SubmitArgs),
}

#[derive(Args)]
struct SubmitArgs {
    /// Task type: pipeline or deployspec
    #[arg(long = "type")]
    task_type: String,
    /// Action: compile, plan, apply, deploy, release or teardown
    #[arg(long)]
    task: String,
    #[arg(long, default_value = "")]
    client: String,
    #[arg(long)]
    portfolio: String,
    #[arg(long)]
    app: Option<String>,
    #[arg(long)]
    branch: Option<String>,
    #[arg(long)]
    build: Option<String>,
    #[arg(long)]
    component: Option<String>,
    #[arg(long)]
    environment: Option<String>,
    /// Bucket holding the uploaded package
    #[arg(long)]
    bucket_name: String,
    #[arg(long)]
    bucket_region: String,
    /// Package key; derived from the deployment details when omitted
    #[arg(long)]
    package_key: Option<String>,
    /// Package is a multi-object service bundle
    #[arg(long)]
    service: bool,
    #[arg(long)]
    force: bool,
    #[arg(long)]
    dry_run: bool,
}

impl From<SubmitArgs> for TaskArguments {
    fn from(args: SubmitArgs) -> Self {
        TaskArguments {
            client: args.client,
            task: args.task,
            task_type: args.task_type,
            portfolio: args.portfolio,
            app: args.app,
            branch: args.branch,
            build: args.build,
            component: args.component,
            environment: args.environment,
            bucket_name: args.bucket_name,
            bucket_region: args.bucket_region,
            package_key: args.package_key,
            mode: if args.service {
                PackageMode::Service
            } else {
                PackageMode::Full
            },
            force: args.force,
            dry_run: args.dry_run,
        }
    }
}

async fn read_request(source: &str) -> Result<Value> {
    let content = if source == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read task request from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read task request from '{source}'"))?
    };

    serde_json::from_str(&content).context("Task request is not valid JSON")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = load_and_validate_config(&cli.config)
        .with_context(|| format!("Failed to load configuration '{}'", cli.config.display()))?;
    let router = RuntimeBuilder::from_config(&config).await?;

    let raw = match cli.command {
        Commands::Run { task } => read_request(&task).await?,
        Commands::Submit(args) => TaskDescription::from_arguments(args.into())?.to_payload()?,
    };

    let context = cli.request_id.map(InvocationContext::new);
    let envelope = router.handler(raw, context.as_ref()).await?;

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
