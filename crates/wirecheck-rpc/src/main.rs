//! Wirecheck RPC binary - serve the transfer service or drive it as a client.
//!
//! `serve` runs the JSON-RPC server until ctrl-c; `hello`, `read`, and
//! `write` perform one client call each against a running server. Failed
//! validations are reported through the log and the process still exits
//! cleanly: every error is local to its call.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use wirecheck_core::config::NetworkConfig;
use wirecheck_rpc::{server, TransferClient};

#[derive(Parser, Debug)]
#[command(name = "wirecheck-rpc")]
#[command(about = "JSON-RPC byte-transfer integrity service")]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the transfer server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = NetworkConfig::DEFAULT_HOST)]
        host: String,

        /// Port to listen on (0 = auto-assign)
        #[arg(short, long, default_value_t = NetworkConfig::DEFAULT_PORT)]
        port: u16,
    },

    /// Send a greeting request
    Hello {
        /// Server endpoint
        #[arg(long, default_value_t = default_endpoint())]
        endpoint: String,

        /// Name to greet
        #[arg(default_value = "world")]
        name: String,
    },

    /// Request server-generated data and validate it
    Read {
        /// Server endpoint
        #[arg(long, default_value_t = default_endpoint())]
        endpoint: String,

        /// Number of bytes to request
        #[arg(default_value_t = 4096)]
        num_bytes: u32,
    },

    /// Send sentinel-filled data to the server
    Write {
        /// Server endpoint
        #[arg(long, default_value_t = default_endpoint())]
        endpoint: String,

        /// Number of bytes to send
        #[arg(default_value_t = 4096)]
        num_bytes: u32,
    },
}

fn default_endpoint() -> String {
    format!(
        "http://{}:{}",
        NetworkConfig::DEFAULT_HOST,
        NetworkConfig::DEFAULT_PORT
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match args.command {
        Command::Serve { host, port } => {
            info!("Starting wirecheck RPC server");
            let handle = server::start_server(&host, port).await?;

            // Print port for callers to read (intentional stdout for scripting)
            println!("RPC_PORT={}", handle.addr().port());
            info!("RPC server running on {}", handle.addr());

            // Wait for shutdown signal
            tokio::signal::ctrl_c().await?;
            info!("Shutdown signal received, exiting");
            handle.stop().await;
        }

        Command::Hello { endpoint, name } => {
            let client = TransferClient::new(endpoint)?;
            match client.say_hello(&name).await {
                Ok(message) => info!("Greeter received: {}", message),
                Err(e) => error!("say_hello failed ({}): {}", e.to_rpc_error_code(), e),
            }
        }

        Command::Read { endpoint, num_bytes } => {
            let client = TransferClient::new(endpoint)?;
            match client.read_data(num_bytes).await {
                Ok(outcome) => info!(
                    "Read {} bytes, all valid, round trip {:?}",
                    outcome.num_bytes, outcome.elapsed
                ),
                Err(e) => error!("read_data failed ({}): {}", e.to_rpc_error_code(), e),
            }
        }

        Command::Write { endpoint, num_bytes } => {
            let client = TransferClient::new(endpoint)?;
            match client.write_data(num_bytes).await {
                Ok(outcome) => info!(
                    "Wrote {} bytes, server acknowledged {}, round trip {:?}",
                    num_bytes, outcome.num_bytes, outcome.elapsed
                ),
                Err(e) => error!("write_data failed ({}): {}", e.to_rpc_error_code(), e),
            }
        }
    }

    Ok(())
}
