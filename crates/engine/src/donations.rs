//! Donation records committed by the settlement process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a committed donation.
///
/// Only `Completed` is reachable: a pledge that fails validation or is
/// cancelled mid-settlement never produces a `Donation` at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    Completed,
}

/// A committed donation.
///
/// Created exactly once, when the last settlement phase finishes, and
/// immutable afterwards. Owned exclusively by the ledger store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    pub organization_id: String,
    /// Whole currency units, always > 0.
    pub amount: i64,
    pub donor_name: String,
    pub message: Option<String>,
    pub committed_at: DateTime<Utc>,
    pub status: DonationStatus,
}
