//! Unified ledger lines.
//!
//! Every ledger-visible event is a `Transaction`: donor-funded donations,
//! admin-recorded disbursements and the zero-amount impact markers that
//! accompany them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Donation,
    Disbursement,
    Impact,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Donation => "donation",
            Self::Disbursement => "disbursement",
            Self::Impact => "impact",
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line of the append-only ledger.
///
/// `organization_name` is a snapshot taken when the line is appended, never
/// a live reference into the catalog. `amount` is 0 for `Impact` lines by
/// construction; `Donation`/`Disbursement` lines carry the moved amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub organization_id: String,
    pub organization_name: String,
    pub amount: i64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub donor_name: Option<String>,
}

/// Conjunctive filter for ledger listings.
///
/// Absent fields match everything; when both are present an entry must
/// satisfy both.
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub organization_id: Option<String>,
    pub kind: Option<TransactionKind>,
}

impl TransactionFilter {
    pub(crate) fn matches(&self, tx: &Transaction) -> bool {
        if let Some(organization_id) = &self.organization_id
            && *organization_id != tx.organization_id
        {
            return false;
        }
        if let Some(kind) = self.kind
            && kind != tx.kind
        {
            return false;
        }
        true
    }
}
