//! Derived account metrics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{catalog::Catalog, donations::Donation};

/// The impact score saturates here regardless of further giving.
const IMPACT_SCORE_CAP: i64 = 95;
/// Score points granted per 100 currency units donated.
const IMPACT_SCORE_PER_HUNDRED: i64 = 5;

/// Aggregate view of the donor account.
///
/// Every field is derived from the donation collection. The aggregates are
/// recomputed after each commit and never stored independently, so they
/// cannot drift from what the ledger contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMetrics {
    pub wallet_balance: i64,
    pub total_donated: i64,
    pub organizations_supported: u64,
    pub people_helped: i64,
    pub impact_score: i64,
}

/// Recomputes the derived account metrics from scratch.
///
/// Pure and idempotent: any number of calls over the same donation slice
/// yield the same result. Donations reference organizations validated at
/// submit time, so an unresolvable id contributes no helped-people estimate
/// instead of failing the aggregation.
pub fn compute_account_metrics(
    donations: &[Donation],
    catalog: &Catalog,
    wallet_allowance: i64,
) -> AccountMetrics {
    let total_donated: i64 = donations.iter().map(|donation| donation.amount).sum();

    let organizations_supported = donations
        .iter()
        .map(|donation| donation.organization_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    let people_helped: i64 = donations
        .iter()
        .filter_map(|donation| {
            let org = catalog.organization(&donation.organization_id).ok()?;
            Some((donation.amount as f64 * org.impact_per_unit).floor() as i64)
        })
        .sum();

    // total * 5 / 100 is floor(total / 100 * 5) without the divide-first
    // truncation.
    let impact_score = IMPACT_SCORE_CAP.min(total_donated * IMPACT_SCORE_PER_HUNDRED / 100);

    AccountMetrics {
        wallet_balance: wallet_allowance - total_donated,
        total_donated,
        organizations_supported,
        people_helped,
        impact_score,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::{catalog::Organization, donations::DonationStatus};

    fn donation(organization_id: &str, amount: i64) -> Donation {
        Donation {
            id: Uuid::new_v4(),
            organization_id: organization_id.to_string(),
            amount,
            donor_name: String::from("Sarah Johnson"),
            message: None,
            committed_at: Utc.timestamp_opt(0, 0).unwrap(),
            status: DonationStatus::Completed,
        }
    }

    #[test]
    fn people_helped_floors_per_donation() {
        let catalog = Catalog::new(vec![Organization {
            id: "half-rate".to_string(),
            name: "Half Rate".to_string(),
            description: String::new(),
            impact_per_unit: 0.5,
            transparency_score: 90,
        }]);
        let donations = [donation("half-rate", 125), donation("half-rate", 125)];

        let metrics = compute_account_metrics(&donations, &catalog, 5000);

        // 62.5 floors to 62 per donation before summing.
        assert_eq!(metrics.people_helped, 124);
    }

    #[test]
    fn people_helped_is_exact_for_integer_rates() {
        let catalog = Catalog::builtin();
        let donations = [donation("clean-water", 120)];

        let metrics = compute_account_metrics(&donations, &catalog, 5000);

        assert_eq!(metrics.people_helped, 600);
    }

    #[test]
    fn impact_score_scales_then_saturates() {
        let catalog = Catalog::builtin();

        let donations = [donation("clean-water", 130)];
        let metrics = compute_account_metrics(&donations, &catalog, 5000);
        assert_eq!(metrics.impact_score, 6);

        let donations = [donation("clean-water", 1900)];
        let metrics = compute_account_metrics(&donations, &catalog, 5000);
        assert_eq!(metrics.impact_score, 95);

        let donations = [donation("clean-water", 4000)];
        let metrics = compute_account_metrics(&donations, &catalog, 5000);
        assert_eq!(metrics.impact_score, 95);
    }

    #[test]
    fn organizations_supported_counts_distinct_ids() {
        let catalog = Catalog::builtin();
        let donations = [donation("clean-water", 50), donation("clean-water", 75)];

        let metrics = compute_account_metrics(&donations, &catalog, 5000);

        assert_eq!(metrics.organizations_supported, 1);
        assert_eq!(metrics.total_donated, 125);
        assert_eq!(metrics.wallet_balance, 4875);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let catalog = Catalog::builtin();
        let donations = [donation("clean-water", 100), donation("education", 200)];

        let first = compute_account_metrics(&donations, &catalog, 5000);
        let second = compute_account_metrics(&donations, &catalog, 5000);

        assert_eq!(first, second);
    }
}
