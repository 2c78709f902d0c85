// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::{path::PathBuf, process::ExitCode};

use anyhow::anyhow;
use clap::Parser;
use greeting_client::{show_greeting, GreetingClient, MemoryDocument};
use greeting_config::{Config, ConfigPrefix};
use tracing::{level_filters::LevelFilter, subscriber::set_global_default};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use url::Url;

#[derive(Parser)]
#[command(version, about = "Fetches the greeting from the greeting service")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// GraphQL endpoint, overrides `client.query_url`.
    #[arg(long)]
    url: Option<Url>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(greeting) => {
            println!("Greeting: {greeting}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Greeting client error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> anyhow::Result<String> {
    let cli = Cli::parse();

    let mut config =
        Config::parse(ConfigPrefix::Client, cli.config.as_ref()).map_err(|e| anyhow!(e))?;
    if let Some(url) = cli.url {
        config.client.query_url = url;
    }

    let client = GreetingClient::from_config(&config.client)?;
    let element_id = &config.client.element_id;
    let mut document = MemoryDocument::default().with_element(element_id);

    Ok(show_greeting(&client, &mut document, element_id).await?)
}

fn init_tracing() {
    // stdout only carries the greeting
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    set_global_default(subscriber).expect(
        "Could not set up global default subscriber for logger, check \
        environmental variable `RUST_LOG`",
    );
}
