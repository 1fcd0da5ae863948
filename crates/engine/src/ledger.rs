//! Append-only ledger collections.
//!
//! The `LedgerStore` is the source of truth for every derived aggregate. It
//! only ever grows: no entry is mutated, reordered or removed once appended,
//! so a transaction's id, amount and timestamp are immutable post-append.

use uuid::Uuid;

use crate::{
    donations::Donation,
    impact_updates::ImpactUpdate,
    transactions::{Transaction, TransactionFilter, TransactionKind},
};

#[derive(Debug, Default)]
pub struct LedgerStore {
    donations: Vec<Donation>,
    impact_updates: Vec<ImpactUpdate>,
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a committed donation together with its `donation`-kind ledger
    /// line.
    ///
    /// The two records share one id and are pushed in the same call, so no
    /// reader observes the donation without its transaction or vice versa.
    pub(crate) fn append_donation(&mut self, donation: Donation, organization_name: &str) {
        self.transactions.push(Transaction {
            id: donation.id,
            kind: TransactionKind::Donation,
            organization_id: donation.organization_id.clone(),
            organization_name: organization_name.to_string(),
            amount: donation.amount,
            description: format!("Donation from {}", donation.donor_name),
            timestamp: donation.committed_at,
            donor_name: Some(donation.donor_name.clone()),
        });
        self.donations.push(donation);
    }

    /// Appends an impact update plus its `disbursement` and `impact` ledger
    /// lines as one unit.
    ///
    /// The disbursement line reuses the update id and carries the funds
    /// used; the impact line gets a fresh id and always carries amount 0.
    pub(crate) fn append_disbursement(&mut self, update: ImpactUpdate, organization_name: &str) {
        self.transactions.push(Transaction {
            id: update.id,
            kind: TransactionKind::Disbursement,
            organization_id: update.organization_id.clone(),
            organization_name: organization_name.to_string(),
            amount: update.funds_used,
            description: update.title.clone(),
            timestamp: update.recorded_at,
            donor_name: None,
        });
        self.transactions.push(Transaction {
            id: Uuid::new_v4(),
            kind: TransactionKind::Impact,
            organization_id: update.organization_id.clone(),
            organization_name: organization_name.to_string(),
            amount: 0,
            description: format!("{} people helped - {}", update.people_impacted, update.title),
            timestamp: update.recorded_at,
            donor_name: None,
        });
        self.impact_updates.push(update);
    }

    /// Ledger lines matching `filter`, in insertion order.
    pub fn transactions_matching(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn donations(&self) -> &[Donation] {
        &self.donations
    }

    pub fn impact_updates(&self) -> &[ImpactUpdate] {
        &self.impact_updates
    }

    /// The most recent `limit` impact updates, newest first.
    pub fn recent_impact_updates(&self, limit: usize) -> Vec<ImpactUpdate> {
        self.impact_updates
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }
}
