//! Organization catalog endpoints

use api_types::organization::{OrganizationView, OrganizationsResponse};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<OrganizationsResponse>, ServerError> {
    let engine = state.engine.read().await;

    let organizations = engine
        .catalog()
        .organizations()
        .iter()
        .map(|org| OrganizationView {
            id: org.id.clone(),
            name: org.name.clone(),
            description: org.description.clone(),
            impact_per_unit: org.impact_per_unit,
            transparency_score: org.transparency_score,
        })
        .collect();

    Ok(Json(OrganizationsResponse { organizations }))
}
