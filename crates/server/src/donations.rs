//! Donation submission and settlement endpoints

use api_types::donation::{DonationNew, DonationView, DonationsResponse};
use api_types::settlement::{
    SettlementCancel, SettlementCancelled, SettlementPhase as ApiPhase, SettlementStarted,
    SettlementState as ApiState, SettlementView,
};
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    server::{ServerState, spawn_settlement_driver},
};

fn map_phase(phase: engine::SettlementPhase) -> ApiPhase {
    match phase {
        engine::SettlementPhase::ContractCreation => ApiPhase::ContractCreation,
        engine::SettlementPhase::PaymentProcessing => ApiPhase::PaymentProcessing,
        engine::SettlementPhase::LedgerRecording => ApiPhase::LedgerRecording,
        engine::SettlementPhase::RecipientNotification => ApiPhase::RecipientNotification,
    }
}

fn map_state(state: engine::SettlementState) -> ApiState {
    match state {
        engine::SettlementState::Staged => ApiState::Staged,
        engine::SettlementState::Finalizing => ApiState::Finalizing,
    }
}

pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<DonationNew>,
) -> Result<(StatusCode, Json<SettlementStarted>), ServerError> {
    let ticket = {
        let mut engine = state.engine.write().await;
        engine.submit_donation(engine::DonationRequest {
            organization_id: payload.organization_id,
            amount: payload.amount,
            donor_name: payload.donor_name,
            message: payload.message,
        })?
    };

    tracing::info!("settlement {} staged", ticket.settlement_id);
    spawn_settlement_driver(state, ticket.settlement_id);

    Ok((
        StatusCode::ACCEPTED,
        Json(SettlementStarted {
            settlement_id: ticket.settlement_id,
            phases: ticket.phases.iter().copied().map(map_phase).collect(),
        }),
    ))
}

pub async fn settlement_status(
    State(state): State<ServerState>,
) -> Result<Json<SettlementView>, ServerError> {
    let engine = state.engine.read().await;

    let Some(settlement) = engine.settlement() else {
        return Err(ServerError::Engine(engine::EngineError::NoActiveSettlement(
            "no settlement is staged".to_string(),
        )));
    };

    Ok(Json(SettlementView {
        settlement_id: settlement.id,
        organization_id: settlement.organization_id.clone(),
        amount: settlement.amount,
        donor_name: settlement.donor_name.clone(),
        state: map_state(settlement.state),
        completed_phases: settlement
            .completed_phases()
            .iter()
            .copied()
            .map(map_phase)
            .collect(),
        next_phase: settlement.next_phase().map(map_phase),
    }))
}

pub async fn cancel(
    State(state): State<ServerState>,
    Json(payload): Json<SettlementCancel>,
) -> Result<Json<SettlementCancelled>, ServerError> {
    let mut engine = state.engine.write().await;
    let cancelled = engine.cancel_settlement(payload.settlement_id)?;

    tracing::info!("settlement {} cancelled", cancelled.id);
    Ok(Json(SettlementCancelled {
        settlement_id: cancelled.id,
    }))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<DonationsResponse>, ServerError> {
    let engine = state.engine.read().await;

    let donations = engine
        .list_donations()
        .iter()
        .map(|donation| DonationView {
            id: donation.id,
            organization_id: donation.organization_id.clone(),
            amount: donation.amount,
            donor_name: donation.donor_name.clone(),
            message: donation.message.clone(),
            committed_at: donation.committed_at,
        })
        .collect();

    Ok(Json(DonationsResponse { donations }))
}
