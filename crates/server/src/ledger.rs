//! Ledger listing endpoints

use api_types::ledger::{
    TransactionKind as ApiKind, TransactionListQuery, TransactionListResponse, TransactionView,
};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Donation => ApiKind::Donation,
        engine::TransactionKind::Disbursement => ApiKind::Disbursement,
        engine::TransactionKind::Impact => ApiKind::Impact,
    }
}

fn engine_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Donation => engine::TransactionKind::Donation,
        ApiKind::Disbursement => engine::TransactionKind::Disbursement,
        ApiKind::Impact => engine::TransactionKind::Impact,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let engine = state.engine.read().await;

    let filter = engine::TransactionFilter {
        organization_id: query.organization_id,
        kind: query.kind.map(engine_kind),
    };

    let transactions = engine
        .list_transactions(&filter)
        .into_iter()
        .map(|tx| TransactionView {
            id: tx.id,
            kind: map_kind(tx.kind),
            organization_id: tx.organization_id,
            organization_name: tx.organization_name,
            amount: tx.amount,
            description: tx.description,
            timestamp: tx.timestamp,
            donor_name: tx.donor_name,
        })
        .collect();

    Ok(Json(TransactionListResponse { transactions }))
}
