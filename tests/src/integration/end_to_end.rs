//! # End-to-End Ledger RPC Tests
//!
//! ```text
//! reqwest ──HTTP──→ LedgerRpcService ──Weak──→ InMemoryChain
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: height at genesis and after blocks
//! 2. **Consistency**: repeated and concurrent queries
//! 3. **Failure**: chain dropped under a running server
//! 4. **Lifecycle**: graceful shutdown

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use ledger_rpc::domain::error::codes;
    use ledger_rpc::{ChainHeightSource, InMemoryChain, LedgerRpcService, RpcConfig};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct RunningServer {
        addr: SocketAddr,
        service: Arc<LedgerRpcService>,
        handle: JoinHandle<Result<(), ledger_rpc::ServerError>>,
    }

    async fn spawn_server(chain: &Arc<dyn ChainHeightSource>) -> RunningServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let service = Arc::new(LedgerRpcService::new(RpcConfig::default(), chain).unwrap());

        let handle = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.serve(listener).await })
        };

        RunningServer {
            addr,
            service,
            handle,
        }
    }

    async fn call(client: &reqwest::Client, addr: SocketAddr, id: u64) -> Value {
        client
            .post(format!("http://{}/", addr))
            .json(&json!({
                "jsonrpc": "2.0",
                "method": "ledger_getChainHeight",
                "params": [""],
                "id": id
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[tokio::test]
    async fn test_genesis_chain_returns_zero() {
        let chain: Arc<dyn ChainHeightSource> = Arc::new(InMemoryChain::new());
        let server = spawn_server(&chain).await;
        let client = reqwest::Client::new();

        let response = call(&client, server.addr, 1).await;
        assert_eq!(response, json!({"jsonrpc": "2.0", "id": 1, "result": 0}));
    }

    #[tokio::test]
    async fn test_height_follows_chain() {
        let chain = Arc::new(InMemoryChain::with_height(1000));
        let shared: Arc<dyn ChainHeightSource> = chain.clone();
        let server = spawn_server(&shared).await;
        let client = reqwest::Client::new();

        assert_eq!(call(&client, server.addr, 1).await["result"], 1000);

        chain.push_block();
        chain.push_block();
        assert_eq!(call(&client, server.addr, 2).await["result"], 1002);

        chain.advance_to(5000);
        assert_eq!(call(&client, server.addr, 3).await["result"], 5000);
    }

    #[tokio::test]
    async fn test_empty_string_params_over_http() {
        let chain: Arc<dyn ChainHeightSource> = Arc::new(InMemoryChain::with_height(200));
        let server = spawn_server(&chain).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("http://{}/", server.addr))
            .json(&json!({
                "jsonrpc": "2.0",
                "method": "ledger_getChainHeight",
                "params": "",
                "id": 1
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"jsonrpc": "2.0", "id": 1, "result": 200}));
    }

    // =============================================================================
    // CONSISTENCY
    // =============================================================================

    #[tokio::test]
    async fn test_repeated_queries_are_idempotent() {
        let chain: Arc<dyn ChainHeightSource> = Arc::new(InMemoryChain::with_height(77));
        let server = spawn_server(&chain).await;
        let client = reqwest::Client::new();

        let first = call(&client, server.addr, 1).await;
        let second = call(&client, server.addr, 2).await;
        assert_eq!(first["result"], second["result"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_queries_see_same_height() {
        let chain: Arc<dyn ChainHeightSource> = Arc::new(InMemoryChain::with_height(4242));
        let server = spawn_server(&chain).await;
        let client = reqwest::Client::new();

        let responses =
            futures::future::join_all((0..64).map(|id| call(&client, server.addr, id))).await;

        for (id, response) in responses.iter().enumerate() {
            assert_eq!(response["id"], id as u64);
            assert_eq!(response["result"], 4242);
        }
    }

    #[tokio::test]
    async fn test_heights_never_go_backwards_while_growing() {
        let chain = Arc::new(InMemoryChain::new());
        let shared: Arc<dyn ChainHeightSource> = chain.clone();
        let server = spawn_server(&shared).await;
        let client = reqwest::Client::new();

        let producer = {
            let chain = Arc::clone(&chain);
            tokio::spawn(async move {
                for _ in 0..200 {
                    chain.push_block();
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut last = 0u64;
        for id in 0..50 {
            let height = call(&client, server.addr, id).await["result"]
                .as_u64()
                .unwrap();
            assert!(height >= last, "height went from {} to {}", last, height);
            last = height;
        }

        producer.await.unwrap();
        assert_eq!(call(&client, server.addr, 99).await["result"], 200);
    }

    // =============================================================================
    // FAILURE
    // =============================================================================

    #[tokio::test]
    async fn test_dropped_chain_returns_unavailable_error() {
        let chain: Arc<dyn ChainHeightSource> = Arc::new(InMemoryChain::with_height(10));
        let server = spawn_server(&chain).await;
        let client = reqwest::Client::new();

        assert_eq!(call(&client, server.addr, 1).await["result"], 10);

        drop(chain);

        let response = call(&client, server.addr, 2).await;
        assert_eq!(response["id"], 2);
        assert_eq!(response["error"]["code"], codes::RESOURCE_UNAVAILABLE);
        assert!(response.get("result").is_none());

        let health = client
            .get(format!("http://{}/health", server.addr))
            .send()
            .await
            .unwrap();
        assert_eq!(health.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_graceful_shutdown() {
        let chain: Arc<dyn ChainHeightSource> = Arc::new(InMemoryChain::new());
        let server = spawn_server(&chain).await;

        server.service.shutdown();

        let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
