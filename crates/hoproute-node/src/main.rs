use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::Parser;

use hoproute_node::table_source::Freshness;
use hoproute_node::{logging, NodeConfig, RouterNode};

#[derive(Parser)]
#[command(name = "hoproute-node", about = "Simulated UDP router node")]
struct Cli {
    /// IPv4 address this router listens on.
    router_address: Ipv4Addr,
    /// UDP port this router listens on.
    router_port: u16,
    /// Path to the routing table file (one `CIDR port_low port_high
    /// next_hop_ip next_hop_port` entry per line).
    routing_table_file: PathBuf,
    /// Cache the parsed table and re-read it only when the file changes,
    /// instead of re-reading it on every lookup.
    #[arg(long)]
    cache_table: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        logging::init_json();
    } else {
        logging::init();
    }

    let config = NodeConfig {
        address: cli.router_address,
        port: cli.router_port,
        table_path: cli.routing_table_file,
        freshness: if cli.cache_table {
            Freshness::OnChange
        } else {
            Freshness::PerLookup
        },
    };

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // Spawn signal handler
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received SIGINT, shutting down");
        let _ = shutdown_tx.send(true);
    });

    let mut node = match RouterNode::bind(config, shutdown_rx).await {
        Ok(node) => node,
        Err(e) => {
            eprintln!("failed to start router: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = node.run().await {
        tracing::error!("receive loop failed: {e}");
        std::process::exit(1);
    }
}
