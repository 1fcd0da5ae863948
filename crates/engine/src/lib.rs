//! Donation ledger and impact accounting engine.
//!
//! The [`Engine`] is the single session context of the system: it owns the
//! organization catalog, the append-only ledger store, the donor's derived
//! account metrics and the (at most one) in-flight settlement. Operations
//! run on one logical actor; the atomicity of the multi-record appends
//! follows from `&mut self`. If the engine is ever shared across real
//! threads, wrap it in a single writer lock so appends stay serialized.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use catalog::{Catalog, Organization};
pub use donations::{Donation, DonationStatus};
pub use error::EngineError;
pub use impact_updates::ImpactUpdate;
pub use ledger::LedgerStore;
pub use metrics::{AccountMetrics, compute_account_metrics};
pub use settlement::{
    Settlement, SettlementPhase, SettlementProgress, SettlementState, SettlementTicket,
};
pub use transactions::{Transaction, TransactionFilter, TransactionKind};

mod catalog;
mod donations;
mod error;
mod impact_updates;
mod ledger;
mod metrics;
mod settlement;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// Starting wallet allowance when none is configured.
pub const DEFAULT_WALLET_ALLOWANCE: i64 = 5000;

/// A donor's pledge as submitted for settlement.
#[derive(Clone, Debug)]
pub struct DonationRequest {
    pub organization_id: String,
    pub amount: i64,
    pub donor_name: String,
    pub message: Option<String>,
}

/// An admin-reported impact update before validation.
#[derive(Clone, Debug)]
pub struct ImpactReport {
    pub organization_id: String,
    pub title: String,
    pub description: String,
    pub funds_used: i64,
    pub people_impacted: i64,
}

#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    ledger: LedgerStore,
    wallet_allowance: i64,
    metrics: AccountMetrics,
    settlement: Option<Settlement>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The organization catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a catalog organization.
    pub fn organization(&self, id: &str) -> ResultEngine<&Organization> {
        self.catalog.organization(id)
    }

    /// Derived account metrics as of the last committed donation.
    pub fn account_metrics(&self) -> AccountMetrics {
        self.metrics
    }

    /// The in-flight settlement, if any.
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    /// Validates a pledge and stages it for settlement.
    ///
    /// Settlement is single-flight per session: while one pledge is staged
    /// or finalizing, further submissions are rejected with
    /// [`EngineError::SettlementInProgress`]. Any validation failure rejects
    /// the request with a typed reason and mutates nothing.
    pub fn submit_donation(&mut self, request: DonationRequest) -> ResultEngine<SettlementTicket> {
        if let Some(active) = &self.settlement {
            return Err(EngineError::SettlementInProgress(format!(
                "settlement {} is still {}",
                active.id,
                active.state.as_str()
            )));
        }
        if request.amount <= 0 {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }
        if request.donor_name.trim().is_empty() {
            return Err(EngineError::InvalidDonor("donor name is required".to_string()));
        }
        self.catalog.organization(&request.organization_id)?;
        if request.amount > self.metrics.wallet_balance {
            return Err(EngineError::InsufficientBalance(format!(
                "amount {} exceeds wallet balance {}",
                request.amount, self.metrics.wallet_balance
            )));
        }

        let settlement = Settlement::stage(
            request.organization_id,
            request.amount,
            request.donor_name,
            request.message,
        );
        let ticket = SettlementTicket {
            settlement_id: settlement.id,
            phases: SettlementPhase::ALL,
        };
        self.settlement = Some(settlement);
        Ok(ticket)
    }

    /// Completes the next settlement phase.
    ///
    /// Exactly one phase finishes per call; the first call moves the
    /// settlement from `Staged` to `Finalizing`. Completing the final phase
    /// commits the staged pledge before the call returns: donation and
    /// ledger line appended, account metrics (including the wallet debit)
    /// recomputed. That commit is the only point where ledger state changes.
    pub fn advance_settlement(
        &mut self,
        settlement_id: Uuid,
        now: DateTime<Utc>,
    ) -> ResultEngine<SettlementProgress> {
        let settlement = match self.settlement.as_mut() {
            Some(settlement) if settlement.id == settlement_id => settlement,
            Some(_) | None => {
                return Err(EngineError::NoActiveSettlement(format!(
                    "settlement {settlement_id} is not in flight"
                )));
            }
        };

        let phase = settlement.complete_next_phase().ok_or_else(|| {
            EngineError::NoActiveSettlement(format!("settlement {settlement_id} is not in flight"))
        })?;

        if let Some(next) = settlement.next_phase() {
            return Ok(SettlementProgress::PhaseCompleted { phase, next });
        }

        self.commit_settlement(now)
    }

    fn commit_settlement(&mut self, now: DateTime<Utc>) -> ResultEngine<SettlementProgress> {
        let Some(settlement) = self.settlement.take() else {
            return Err(EngineError::NoActiveSettlement(
                "no settlement is staged".to_string(),
            ));
        };
        // The id was validated at submit; re-resolving keeps the name
        // snapshot out of the staged state.
        let organization_name = self
            .catalog
            .organization(&settlement.organization_id)?
            .name
            .clone();

        let donation = Donation {
            id: settlement.id,
            organization_id: settlement.organization_id,
            amount: settlement.amount,
            donor_name: settlement.donor_name,
            message: settlement.message,
            committed_at: now,
            status: DonationStatus::Completed,
        };
        let donation_id = donation.id;

        self.ledger.append_donation(donation, &organization_name);
        self.metrics =
            compute_account_metrics(self.ledger.donations(), &self.catalog, self.wallet_allowance);

        Ok(SettlementProgress::Committed { donation_id })
    }

    /// Cancels the in-flight settlement.
    ///
    /// Allowed while staged or finalizing; the pledge is discarded and the
    /// ledger stays untouched. Cancellation is a normal terminal outcome,
    /// distinct from a rejection.
    pub fn cancel_settlement(&mut self, settlement_id: Uuid) -> ResultEngine<Settlement> {
        match self.settlement.take() {
            Some(settlement) if settlement.id == settlement_id => Ok(settlement),
            Some(other) => {
                self.settlement = Some(other);
                Err(EngineError::NoActiveSettlement(format!(
                    "settlement {settlement_id} is not in flight"
                )))
            }
            None => Err(EngineError::NoActiveSettlement(format!(
                "settlement {settlement_id} is not in flight"
            ))),
        }
    }

    /// Records an admin-side impact update directly in the ledger.
    ///
    /// No settlement staging and no wallet interaction: disbursements are
    /// administrative reports, not donor-funded transfers, and they do not
    /// touch the donor's metrics.
    pub fn record_impact(
        &mut self,
        report: ImpactReport,
        recorded_at: DateTime<Utc>,
    ) -> ResultEngine<ImpactUpdate> {
        let organization_name = self
            .catalog
            .organization(&report.organization_id)?
            .name
            .clone();
        if report.title.trim().is_empty() {
            return Err(EngineError::InvalidDisbursement(
                "title is required".to_string(),
            ));
        }
        if report.description.trim().is_empty() {
            return Err(EngineError::InvalidDisbursement(
                "description is required".to_string(),
            ));
        }
        if report.funds_used < 0 {
            return Err(EngineError::InvalidDisbursement(
                "funds_used must be >= 0".to_string(),
            ));
        }
        if report.people_impacted < 0 {
            return Err(EngineError::InvalidDisbursement(
                "people_impacted must be >= 0".to_string(),
            ));
        }

        let update = ImpactUpdate {
            id: Uuid::new_v4(),
            organization_id: report.organization_id,
            title: report.title,
            description: report.description,
            funds_used: report.funds_used,
            people_impacted: report.people_impacted,
            recorded_at,
        };
        let view = update.clone();
        self.ledger.append_disbursement(update, &organization_name);
        Ok(view)
    }

    /// Ledger lines matching `filter`, in insertion order.
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        self.ledger.transactions_matching(filter)
    }

    /// Committed donations, oldest first.
    pub fn list_donations(&self) -> &[Donation] {
        self.ledger.donations()
    }

    /// Recorded impact updates, oldest first.
    pub fn list_impact_updates(&self) -> &[ImpactUpdate] {
        self.ledger.impact_updates()
    }

    /// The most recent `limit` impact updates, newest first.
    pub fn recent_impact_updates(&self, limit: usize) -> Vec<ImpactUpdate> {
        self.ledger.recent_impact_updates(limit)
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    catalog: Catalog,
    wallet_allowance: i64,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            catalog: Catalog::builtin(),
            wallet_allowance: DEFAULT_WALLET_ALLOWANCE,
        }
    }
}

impl EngineBuilder {
    /// Replace the built-in organization catalog.
    pub fn catalog(mut self, catalog: Catalog) -> EngineBuilder {
        self.catalog = catalog;
        self
    }

    /// Starting wallet balance for the session.
    pub fn wallet_allowance(mut self, allowance: i64) -> EngineBuilder {
        self.wallet_allowance = allowance;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        let ledger = LedgerStore::new();
        let metrics =
            compute_account_metrics(ledger.donations(), &self.catalog, self.wallet_allowance);

        Engine {
            catalog: self.catalog,
            ledger,
            wallet_allowance: self.wallet_allowance,
            metrics,
            settlement: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::builder().build()
    }

    fn request(amount: i64) -> DonationRequest {
        DonationRequest {
            organization_id: "clean-water".to_string(),
            amount,
            donor_name: "Sarah Johnson".to_string(),
            message: None,
        }
    }

    #[test]
    fn submit_rejects_non_positive_amount() {
        let mut engine = engine();

        assert!(matches!(
            engine.submit_donation(request(0)),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            engine.submit_donation(request(-20)),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(engine.settlement().is_none());
    }

    #[test]
    fn submit_rejects_blank_donor() {
        let mut engine = engine();
        let mut req = request(100);
        req.donor_name = "   ".to_string();

        assert!(matches!(
            engine.submit_donation(req),
            Err(EngineError::InvalidDonor(_))
        ));
    }

    #[test]
    fn submit_rejects_unknown_organization() {
        let mut engine = engine();
        let mut req = request(100);
        req.organization_id = "animal-rescue".to_string();

        assert!(matches!(
            engine.submit_donation(req),
            Err(EngineError::UnknownOrganization(_))
        ));
    }

    #[test]
    fn submit_is_single_flight() {
        let mut engine = engine();
        engine.submit_donation(request(100)).unwrap();

        assert!(matches!(
            engine.submit_donation(request(50)),
            Err(EngineError::SettlementInProgress(_))
        ));
    }

    #[test]
    fn cancel_requires_matching_id() {
        let mut engine = engine();
        let ticket = engine.submit_donation(request(100)).unwrap();

        assert!(matches!(
            engine.cancel_settlement(Uuid::new_v4()),
            Err(EngineError::NoActiveSettlement(_))
        ));
        assert!(engine.settlement().is_some());

        engine.cancel_settlement(ticket.settlement_id).unwrap();
        assert!(engine.settlement().is_none());
    }
}
