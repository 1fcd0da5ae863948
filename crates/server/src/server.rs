use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use chrono::Utc;
use engine::{Engine, SettlementProgress};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{account, donations, impact, ledger, organizations};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
    /// Pause between settlement phases. Zero makes staged pipelines complete
    /// as soon as the driver task is scheduled.
    pub phase_delay: Duration,
}

/// Drives a staged settlement through its phases on a timer.
///
/// One task per settlement. The engine itself never waits: each tick takes
/// the write lock, completes exactly one phase and releases it, so ledger
/// readers interleave freely between phases. The task stops on commit or as
/// soon as the settlement is no longer in flight (cancelled).
pub(crate) fn spawn_settlement_driver(state: ServerState, settlement_id: Uuid) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(state.phase_delay).await;
            let mut engine = state.engine.write().await;
            match engine.advance_settlement(settlement_id, Utc::now()) {
                Ok(SettlementProgress::PhaseCompleted { phase, next }) => {
                    tracing::debug!(
                        "settlement {settlement_id}: {} done, {} next",
                        phase.as_str(),
                        next.as_str()
                    );
                }
                Ok(SettlementProgress::Committed { donation_id }) => {
                    tracing::info!("settlement {settlement_id} committed donation {donation_id}");
                    break;
                }
                Err(err) => {
                    tracing::debug!("settlement {settlement_id} halted: {err}");
                    break;
                }
            }
        }
    });
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/organizations", get(organizations::list))
        .route("/donations", post(donations::submit).get(donations::list))
        .route("/settlement", get(donations::settlement_status))
        .route("/settlement/cancel", post(donations::cancel))
        .route("/transactions", get(ledger::list))
        .route("/account", get(account::get_metrics))
        .route("/impact", post(impact::record))
        .route("/impact/updates", get(impact::list))
        .with_state(state)
}

pub async fn run(engine: Engine, phase_delay: Duration) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, phase_delay, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    phase_delay: Duration,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(RwLock::new(engine)),
        phase_delay,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    phase_delay: Duration,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, phase_delay, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
