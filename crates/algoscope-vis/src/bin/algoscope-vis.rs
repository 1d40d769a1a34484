//! Algoscope Visualizer Server
//!
//! Serve the visualizer frontend with playback controls.

use std::env;

use algoscope_dataset::DatasetConfig;
use algoscope_vis::VisServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let port: u16 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3000);

    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);

    println!("Algoscope Visualizer");
    println!("====================");
    println!();
    println!("Starting server on http://localhost:{}", port);
    println!("Open in browser to pick an algorithm and watch it run.");
    println!();

    let config = DatasetConfig {
        seed,
        ..DatasetConfig::default()
    };
    let server = VisServer::new(config);
    server.serve(port).await?;

    Ok(())
}
