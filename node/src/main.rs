// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use mercury_ledger::ledger::Ledger;
use mercury_ledger::policy;
use mercury_ledger::types::{readable, Currency};
use mercury_node::config::NodeConfig;
use mercury_node::server::{build_router, SharedLedger};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() {
    mercury_node::telemetry::init_telemetry();

    let cfg = NodeConfig::from_env();
    tracing::info!("Loading ledger from {:?}", cfg.ledger_path);

    let start = std::time::Instant::now();
    let ledger = match Ledger::open(&cfg.ledger_path) {
        Ok(ledger) => ledger,
        Err(e) => {
            // A corrupt or unreadable ledger must never serve balances.
            tracing::error!("Failed to load ledger: {}", e);
            std::process::exit(1);
        }
    };
    metrics::histogram!(
        "mercury_replay_duration_seconds",
        start.elapsed().as_secs_f64()
    );

    let supply = ledger.supply();
    let users = ledger.user_count();
    tracing::info!("User count     {}", users);
    tracing::info!("Economy size   {}", readable(supply));
    tracing::info!("CCU            {}", readable(policy::ccu(supply, users) as Currency));
    tracing::info!("TCU            {}", readable(policy::TCU as Currency));
    tracing::info!("Fee percentage {}", (ledger.current_fee() * 100.0) as u64);
    tracing::info!("Stipend size   {}", readable(ledger.current_stipend()));

    let shared_state: SharedLedger = Arc::new(RwLock::new(ledger));
    let app = build_router(shared_state, cfg.auth_token.clone());

    tracing::info!("~ Economy service is up on {} ~", cfg.bind_addr);
    let listener = TcpListener::bind(cfg.bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
