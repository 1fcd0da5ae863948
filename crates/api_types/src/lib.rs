use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod organization {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrganizationView {
        pub id: String,
        pub name: String,
        pub description: String,
        /// Estimated people helped per currency unit donated.
        pub impact_per_unit: f64,
        pub transparency_score: u8,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrganizationsResponse {
        pub organizations: Vec<OrganizationView>,
    }
}

pub mod donation {
    use super::*;

    /// Request body for submitting a pledge.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DonationNew {
        pub organization_id: String,
        /// Whole currency units; must be > 0.
        pub amount: i64,
        pub donor_name: String,
        pub message: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DonationView {
        pub id: Uuid,
        pub organization_id: String,
        pub amount: i64,
        pub donor_name: String,
        pub message: Option<String>,
        pub committed_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DonationsResponse {
        pub donations: Vec<DonationView>,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum SettlementPhase {
        ContractCreation,
        PaymentProcessing,
        LedgerRecording,
        RecipientNotification,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SettlementState {
        Staged,
        Finalizing,
    }

    /// Response to a submitted pledge: the settlement is staged and will be
    /// driven through `phases` in order.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementStarted {
        pub settlement_id: Uuid,
        pub phases: Vec<SettlementPhase>,
    }

    /// Point-in-time snapshot of the in-flight settlement, for progress
    /// polling.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub settlement_id: Uuid,
        pub organization_id: String,
        pub amount: i64,
        pub donor_name: String,
        pub state: SettlementState,
        pub completed_phases: Vec<SettlementPhase>,
        pub next_phase: Option<SettlementPhase>,
    }

    /// Request body for cancelling the in-flight settlement.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementCancel {
        pub settlement_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementCancelled {
        pub settlement_id: Uuid,
    }
}

pub mod ledger {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Donation,
        Disbursement,
        Impact,
    }

    impl TransactionKind {
        /// Returns the canonical kind string used by the engine.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Donation => "donation",
                Self::Disbursement => "disbursement",
                Self::Impact => "impact",
            }
        }
    }

    /// Query parameters for the ledger listing; filters are conjunctive.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionListQuery {
        pub organization_id: Option<String>,
        pub kind: Option<TransactionKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub organization_id: String,
        /// Display name snapshot taken at append time.
        pub organization_name: String,
        pub amount: i64,
        pub description: String,
        pub timestamp: DateTime<Utc>,
        pub donor_name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod account {
    use super::*;

    /// Derived account metrics; recomputed by the engine after every commit.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub wallet_balance: i64,
        pub total_donated: i64,
        pub organizations_supported: u64,
        pub people_helped: i64,
        pub impact_score: i64,
    }
}

pub mod impact {
    use super::*;

    /// Request body for recording an impact update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ImpactUpdateNew {
        pub organization_id: String,
        pub title: String,
        pub description: String,
        /// Whole currency units; must be >= 0.
        pub funds_used: i64,
        pub people_impacted: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ImpactUpdateView {
        pub id: Uuid,
        pub organization_id: String,
        pub title: String,
        pub description: String,
        pub funds_used: i64,
        pub people_impacted: i64,
        pub recorded_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ImpactUpdatesResponse {
        pub updates: Vec<ImpactUpdateView>,
    }
}
