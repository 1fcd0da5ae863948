//! Recipient-reported impact updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An admin-recorded report on how previously donated funds were used.
///
/// Appended by the disbursement recorder and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactUpdate {
    pub id: Uuid,
    pub organization_id: String,
    pub title: String,
    pub description: String,
    /// Whole currency units, >= 0.
    pub funds_used: i64,
    pub people_impacted: i64,
    pub recorded_at: DateTime<Utc>,
}
