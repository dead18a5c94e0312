use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use nitro_protocols::NitroConfig;
use nitro_runner::cli::{Cli, Command};
use nitro_runner::{run_command, StdinReplies};
use nitro_tools::SwapFlow;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::trace as sdktrace;
use opentelemetry_sdk::Resource;
use tracing::{error, subscriber};
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

const DEFAULT_LOG_FILTER: &str = "info,nitro_protocols=debug,nitro_tools=debug";

/// Initializes the OpenTelemetry pipeline for tracing.
fn init_tracing() -> Result<sdktrace::SdkTracerProvider> {
    let provider = sdktrace::SdkTracerProvider::builder()
        .with_resource(Resource::builder().with_service_name("nitro-runner").build())
        .build();
    let tracer = provider.tracer("nitro-runner");
    global::set_tracer_provider(provider.clone());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_opentelemetry::layer().with_tracer(tracer));

    subscriber::set_global_default(subscriber)
        .context("Failed to set global default tracing subscriber")?;

    Ok(provider)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let tracer_provider = init_tracing()?;
    let cli = Cli::parse();

    let config = NitroConfig::from_env();
    if matches!(cli.command, Command::Swap { .. }) {
        config
            .validate()
            .context("Swap execution needs a recipient and a signing key")?;
    }
    let flow = SwapFlow::from_config(config).context("Failed to set up the swap flow")?;

    let report = run_command(&flow, cli.command, cli.json, &mut StdinReplies).await;
    tracer_provider.shutdown()?;

    let report = report?;
    for section in &report.output {
        println!("{section}");
    }
    if !report.success {
        error!("Command did not succeed");
        std::process::exit(1);
    }
    Ok(())
}
