//! Impact update endpoints (disbursement recorder)

use api_types::impact::{ImpactUpdateNew, ImpactUpdateView, ImpactUpdatesResponse};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::{ServerError, server::ServerState};

fn view(update: engine::ImpactUpdate) -> ImpactUpdateView {
    ImpactUpdateView {
        id: update.id,
        organization_id: update.organization_id,
        title: update.title,
        description: update.description,
        funds_used: update.funds_used,
        people_impacted: update.people_impacted,
        recorded_at: update.recorded_at,
    }
}

pub async fn record(
    State(state): State<ServerState>,
    Json(payload): Json<ImpactUpdateNew>,
) -> Result<(StatusCode, Json<ImpactUpdateView>), ServerError> {
    let update = {
        let mut engine = state.engine.write().await;
        engine.record_impact(
            engine::ImpactReport {
                organization_id: payload.organization_id,
                title: payload.title,
                description: payload.description,
                funds_used: payload.funds_used,
                people_impacted: payload.people_impacted,
            },
            Utc::now(),
        )?
    };

    tracing::info!(
        "impact update {} recorded for {}",
        update.id,
        update.organization_id
    );
    Ok((StatusCode::CREATED, Json(view(update))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ImpactUpdatesResponse>, ServerError> {
    let engine = state.engine.read().await;

    let updates = engine
        .list_impact_updates()
        .iter()
        .cloned()
        .map(view)
        .collect();

    Ok(Json(ImpactUpdatesResponse { updates }))
}
