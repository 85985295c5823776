//! Store Session Agent - Main Entry Point

use detection::StubDetector;
use store_agent::{init_logging, run_agent, AgentConfig};
use store_gateway::GatewayConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Store Session Agent v{} ===", env!("CARGO_PKG_VERSION"));

    let mut config = AgentConfig::default();
    if let Ok(host) = std::env::var("MQTT_BROKER_HOST") {
        config.gateway = GatewayConfig {
            broker_host: host,
            ..config.gateway
        };
    }

    // Stub backend until a real detector is wired in; it yields empty
    // batches, which the core treats as person-absent frames
    let detector = Box::new(StubDetector::default());

    run_agent(config, detector).await
}
