//! # Ledger Node
//!
//! Runs an in-memory chain behind the ledger query RPC server.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (defaults + `LEDGER_*` environment overrides)
//! 3. Create the chain at the configured genesis height
//! 4. Start the block ticker (if an interval is configured)
//! 5. Serve JSON-RPC until Ctrl+C

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ledger_rpc::{ChainHeightSource, InMemoryChain, LedgerRpcService, RpcConfig};

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
struct NodeConfig {
    /// RPC server configuration.
    rpc: RpcConfig,
    /// Height the chain starts at.
    genesis_height: u32,
    /// Commit a block this often. `None` keeps the height fixed.
    block_interval: Option<Duration>,
}

/// Load configuration from environment.
fn load_config() -> NodeConfig {
    let mut config = NodeConfig::default();

    if let Ok(host) = std::env::var("LEDGER_RPC_HOST") {
        match host.parse() {
            Ok(h) => config.rpc.http.listen.set_ip(h),
            Err(_) => warn!(value = %host, "Ignoring invalid LEDGER_RPC_HOST"),
        }
    }
    if let Ok(port) = std::env::var("LEDGER_RPC_PORT") {
        match port.parse() {
            Ok(p) => config.rpc.http.listen.set_port(p),
            Err(_) => warn!(value = %port, "Ignoring invalid LEDGER_RPC_PORT"),
        }
    }
    if let Ok(height) = std::env::var("LEDGER_GENESIS_HEIGHT") {
        match height.parse() {
            Ok(h) => config.genesis_height = h,
            Err(_) => warn!(value = %height, "Ignoring invalid LEDGER_GENESIS_HEIGHT"),
        }
    }
    if let Ok(interval) = std::env::var("LEDGER_BLOCK_INTERVAL_MS") {
        match interval.parse::<u64>() {
            Ok(0) => config.block_interval = None,
            Ok(ms) => config.block_interval = Some(Duration::from_millis(ms)),
            Err(_) => warn!(value = %interval, "Ignoring invalid LEDGER_BLOCK_INTERVAL_MS"),
        }
    }

    config
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Commit a block every `interval` until the task is aborted.
fn spawn_block_ticker(chain: Arc<InMemoryChain>, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let height = chain.push_block();
            debug!(height, "Block ticker advanced chain");
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config();
    info!(
        addr = %config.rpc.http_addr(),
        genesis_height = config.genesis_height,
        block_interval_ms = config.block_interval.map(millis),
        "Starting ledger node"
    );

    let chain = Arc::new(InMemoryChain::with_height(config.genesis_height));
    let ticker = config
        .block_interval
        .map(|interval| spawn_block_ticker(Arc::clone(&chain), interval));

    let shared: Arc<dyn ChainHeightSource> = chain.clone();
    let service = Arc::new(
        LedgerRpcService::new(config.rpc, &shared).context("failed to create RPC service")?,
    );

    let mut server = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.start().await })
    };

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl+C")?;
            info!("Received shutdown signal");
            service.shutdown();
        }
        result = &mut server => {
            if let Some(ticker) = ticker {
                ticker.abort();
            }
            return result
                .context("RPC server task panicked")?
                .context("RPC server failed");
        }
    }

    if let Some(ticker) = ticker {
        ticker.abort();
    }
    server
        .await
        .context("RPC server task panicked")?
        .context("RPC server failed")?;

    info!(height = chain.current_height(), "Ledger node stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_block_ticker_advances_chain() {
        let chain = Arc::new(InMemoryChain::new());
        let ticker = spawn_block_ticker(Arc::clone(&chain), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;
        ticker.abort();

        assert_eq!(chain.current_height(), 3);
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(250)), 250);
        assert_eq!(millis(Duration::from_secs(u64::MAX)), u64::MAX);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.genesis_height, 0);
        assert!(config.block_interval.is_none());
        assert!(config.rpc.validate().is_ok());
    }
}
