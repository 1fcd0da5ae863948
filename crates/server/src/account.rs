//! Account metrics endpoint

use api_types::account::AccountView;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Handle requests for the donor's derived account metrics
pub async fn get_metrics(
    State(state): State<ServerState>,
) -> Result<Json<AccountView>, ServerError> {
    let engine = state.engine.read().await;
    let metrics = engine.account_metrics();

    Ok(Json(AccountView {
        wallet_balance: metrics.wallet_balance,
        total_donated: metrics.total_donated,
        organizations_supported: metrics.organizations_supported,
        people_helped: metrics.people_helped,
        impact_score: metrics.impact_score,
    }))
}
