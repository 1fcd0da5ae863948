//! Staged settlement of a donor pledge.
//!
//! A submitted pledge never touches the ledger directly: it is validated,
//! staged under a fresh settlement id and walked through a fixed pipeline of
//! named phases. Only completing the last phase commits anything; cancelling
//! an in-flight settlement discards the pledge without a trace.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered, non-skippable pipeline phases.
///
/// The sequence is progress reporting only: once staged, a settlement
/// completes unless it is cancelled from outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlementPhase {
    ContractCreation,
    PaymentProcessing,
    LedgerRecording,
    RecipientNotification,
}

impl SettlementPhase {
    /// Pipeline order.
    pub const ALL: [SettlementPhase; 4] = [
        SettlementPhase::ContractCreation,
        SettlementPhase::PaymentProcessing,
        SettlementPhase::LedgerRecording,
        SettlementPhase::RecipientNotification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContractCreation => "contract-creation",
            Self::PaymentProcessing => "payment-processing",
            Self::LedgerRecording => "ledger-recording",
            Self::RecipientNotification => "recipient-notification",
        }
    }

    /// Human-readable progress label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ContractCreation => "Creating contract",
            Self::PaymentProcessing => "Processing payment",
            Self::LedgerRecording => "Recording to ledger",
            Self::RecipientNotification => "Notifying recipient",
        }
    }
}

/// Observable states of a staged settlement.
///
/// `Idle`, `Validating`, `Committed` and `Rejected` never appear here:
/// validation runs synchronously inside `submit_donation` (a rejection is an
/// error, not a state), and a committed or cancelled settlement leaves the
/// slot empty again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementState {
    Staged,
    Finalizing,
}

impl SettlementState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Staged => "staged",
            Self::Finalizing => "finalizing",
        }
    }
}

/// An in-flight settlement holding the staged pledge.
#[derive(Clone, Debug, PartialEq)]
pub struct Settlement {
    pub id: Uuid,
    pub organization_id: String,
    pub amount: i64,
    pub donor_name: String,
    pub message: Option<String>,
    pub state: SettlementState,
    phases_completed: usize,
}

impl Settlement {
    pub(crate) fn stage(
        organization_id: String,
        amount: i64,
        donor_name: String,
        message: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            amount,
            donor_name,
            message,
            state: SettlementState::Staged,
            phases_completed: 0,
        }
    }

    /// Phases already completed, in pipeline order.
    pub fn completed_phases(&self) -> &'static [SettlementPhase] {
        &SettlementPhase::ALL[..self.phases_completed]
    }

    /// The phase the pipeline will complete next.
    pub fn next_phase(&self) -> Option<SettlementPhase> {
        SettlementPhase::ALL.get(self.phases_completed).copied()
    }

    /// Marks the next pending phase complete and returns it.
    ///
    /// The first completion moves the settlement from `Staged` to
    /// `Finalizing`.
    pub(crate) fn complete_next_phase(&mut self) -> Option<SettlementPhase> {
        let phase = self.next_phase()?;
        self.state = SettlementState::Finalizing;
        self.phases_completed += 1;
        Some(phase)
    }
}

/// Result of a successful `submit_donation`: the staged settlement id plus
/// the phase pipeline the caller can expect progress for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementTicket {
    pub settlement_id: Uuid,
    pub phases: [SettlementPhase; 4],
}

/// Progress reported by `advance_settlement`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementProgress {
    /// One more phase finished; the pipeline continues.
    PhaseCompleted {
        phase: SettlementPhase,
        next: SettlementPhase,
    },
    /// The last phase finished and the staged donation was committed.
    Committed { donation_id: Uuid },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_complete_strictly_in_order() {
        let mut settlement = Settlement::stage(
            "clean-water".to_string(),
            100,
            "Sarah Johnson".to_string(),
            None,
        );
        assert_eq!(settlement.state, SettlementState::Staged);
        assert!(settlement.completed_phases().is_empty());

        let mut seen = Vec::new();
        while let Some(phase) = settlement.complete_next_phase() {
            assert_eq!(settlement.state, SettlementState::Finalizing);
            seen.push(phase);
        }

        assert_eq!(seen, SettlementPhase::ALL);
        assert_eq!(settlement.completed_phases(), &SettlementPhase::ALL);
        assert_eq!(settlement.next_phase(), None);
    }
}
