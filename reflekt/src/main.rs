//! # Reflekt Entry Point
//!
//! The main executable. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Sets up logging and parses command-line arguments using [`cli::Cli`].
//! 2. **Loading**: Reads and indexes the descriptor set once. A missing or malformed artifact
//!    stops the process before anything is served.
//! 3. **Execution**: Either serves the reflection protocol over gRPC or answers a single query
//!    offline and prints it.

mod cli;
mod formatter;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, InspectCommands, Protocol};
use formatter::{FormattedString, GenericError};
use reflekt_core::reflection::query::{ReflectionQuery, ReflectionReply};
use reflekt_core::reflection::server::RegistryReflection;
use reflekt_core::registry::DescriptorRegistry;
use reflekt_core::tonic::transport::Server;
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Cli::parse();

    let registry = match DescriptorRegistry::from_path(&args.descriptor_set) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    match args.command {
        Commands::Serve { listen, protocol } => {
            if let Err(err) = serve(registry, listen, protocol).await {
                let err = GenericError("Server failed", format!("{err:#}"));
                eprintln!("{}", FormattedString::from(err));
                process::exit(1);
            }
        }
        Commands::Inspect { query } => inspect(&registry, query),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(
    registry: DescriptorRegistry,
    listen: SocketAddr,
    protocol: Protocol,
) -> anyhow::Result<()> {
    let reflection = RegistryReflection::new(Arc::new(registry));

    let v1 = protocol.serves_v1().then(|| reflection.v1_server());
    let v1alpha = protocol.serves_v1alpha().then(|| reflection.v1alpha_server());

    tracing::info!(
        %listen,
        ?protocol,
        services = reflection.registry().list_services().len(),
        "Serving gRPC Server Reflection"
    );

    Server::builder()
        .add_optional_service(v1)
        .add_optional_service(v1alpha)
        .serve_with_shutdown(listen, shutdown_signal())
        .await
        .with_context(|| format!("Failed to serve on {listen}"))?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "Failed to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}

fn inspect(registry: &DescriptorRegistry, command: InspectCommands) {
    let query = ReflectionQuery::from(command);
    let reply = registry.answer(&query);
    let not_found = reply == ReflectionReply::NotFound;

    println!("{}", FormattedString::from(reply));

    if not_found {
        process::exit(1);
    }
}
