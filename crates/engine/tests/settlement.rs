use chrono::{TimeZone, Utc};

use engine::{
    DonationRequest, Engine, EngineError, ImpactReport, SettlementPhase, SettlementProgress,
    SettlementState, TransactionFilter, TransactionKind,
};

fn engine_with_allowance(allowance: i64) -> Engine {
    Engine::builder().wallet_allowance(allowance).build()
}

fn request(organization_id: &str, amount: i64) -> DonationRequest {
    DonationRequest {
        organization_id: organization_id.to_string(),
        amount,
        donor_name: "Sarah Johnson".to_string(),
        message: Some("Keep up the great work".to_string()),
    }
}

/// Drives a staged settlement through all phases and returns the committed
/// donation id.
fn settle(engine: &mut Engine, request: DonationRequest) -> uuid::Uuid {
    let ticket = engine.submit_donation(request).unwrap();
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    loop {
        match engine.advance_settlement(ticket.settlement_id, now).unwrap() {
            SettlementProgress::PhaseCompleted { .. } => {}
            SettlementProgress::Committed { donation_id } => return donation_id,
        }
    }
}

#[test]
fn donation_settles_end_to_end() {
    let mut engine = engine_with_allowance(500);

    let ticket = engine.submit_donation(request("education", 100)).unwrap();
    assert_eq!(ticket.phases, SettlementPhase::ALL);
    assert_eq!(
        engine.settlement().unwrap().state,
        SettlementState::Staged
    );

    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let mut completed = Vec::new();
    let donation_id = loop {
        match engine.advance_settlement(ticket.settlement_id, now).unwrap() {
            SettlementProgress::PhaseCompleted { phase, next } => {
                completed.push(phase);
                assert_eq!(engine.settlement().unwrap().state, SettlementState::Finalizing);
                assert_eq!(engine.settlement().unwrap().next_phase(), Some(next));
            }
            SettlementProgress::Committed { donation_id } => break donation_id,
        }
    };

    // All four phases ran, strictly in pipeline order, none skipped.
    assert_eq!(completed, SettlementPhase::ALL[..3].to_vec());
    assert!(engine.settlement().is_none());

    // Education converts at 2 people per unit.
    let metrics = engine.account_metrics();
    assert_eq!(metrics.wallet_balance, 400);
    assert_eq!(metrics.total_donated, 100);
    assert_eq!(metrics.people_helped, 200);
    assert_eq!(metrics.organizations_supported, 1);

    // Donation and its ledger line share one id.
    let donations = engine.list_donations();
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].id, donation_id);

    let transactions = engine.list_transactions(&TransactionFilter::default());
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].id, donation_id);
    assert_eq!(transactions[0].kind, TransactionKind::Donation);
    assert_eq!(transactions[0].amount, 100);
    assert_eq!(transactions[0].description, "Donation from Sarah Johnson");
}

#[test]
fn total_donated_is_the_exact_sum() {
    let mut engine = engine_with_allowance(5000);
    for amount in [120, 75, 33] {
        settle(&mut engine, request("clean-water", amount));
    }

    assert_eq!(engine.account_metrics().total_donated, 228);
    assert_eq!(engine.account_metrics().wallet_balance, 5000 - 228);
}

#[test]
fn impact_score_saturates_at_95() {
    let mut engine = engine_with_allowance(10_000);
    settle(&mut engine, request("education", 1900));
    assert_eq!(engine.account_metrics().impact_score, 95);

    settle(&mut engine, request("education", 2000));
    assert_eq!(engine.account_metrics().impact_score, 95);
}

#[test]
fn insufficient_balance_rejects_without_mutation() {
    let mut engine = engine_with_allowance(500);

    let err = engine.submit_donation(request("clean-water", 600)).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientBalance(_)));

    assert!(engine.settlement().is_none());
    assert!(engine.list_donations().is_empty());
    assert!(engine.list_transactions(&TransactionFilter::default()).is_empty());
    assert_eq!(engine.account_metrics().wallet_balance, 500);
}

#[test]
fn same_organization_counts_once() {
    let mut engine = engine_with_allowance(5000);
    settle(&mut engine, request("healthcare", 50));
    settle(&mut engine, request("healthcare", 75));

    assert_eq!(engine.account_metrics().organizations_supported, 1);
}

#[test]
fn cancellation_discards_the_pledge() {
    let mut engine = engine_with_allowance(500);
    let ticket = engine.submit_donation(request("clean-water", 100)).unwrap();
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    // Part-way through the pipeline, in Finalizing.
    engine.advance_settlement(ticket.settlement_id, now).unwrap();
    engine.advance_settlement(ticket.settlement_id, now).unwrap();
    assert_eq!(engine.settlement().unwrap().state, SettlementState::Finalizing);

    let cancelled = engine.cancel_settlement(ticket.settlement_id).unwrap();
    assert_eq!(cancelled.amount, 100);

    // No partial commit: ledger empty, wallet untouched, slot free again.
    assert!(engine.list_donations().is_empty());
    assert!(engine.list_transactions(&TransactionFilter::default()).is_empty());
    assert_eq!(engine.account_metrics().wallet_balance, 500);

    // A stale driver advancing the cancelled settlement is a no-op error.
    assert!(matches!(
        engine.advance_settlement(ticket.settlement_id, now),
        Err(EngineError::NoActiveSettlement(_))
    ));

    engine.submit_donation(request("clean-water", 100)).unwrap();
}

#[test]
fn disbursement_appends_exactly_three_records() {
    let mut engine = engine_with_allowance(500);
    settle(&mut engine, request("clean-water", 100));
    let balance_before = engine.account_metrics().wallet_balance;

    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let update = engine
        .record_impact(
            ImpactReport {
                organization_id: "clean-water".to_string(),
                title: "Water Well Completed".to_string(),
                description: "New well serving 200 residents".to_string(),
                funds_used: 1200,
                people_impacted: 200,
            },
            now,
        )
        .unwrap();

    assert_eq!(engine.list_impact_updates().len(), 1);

    let transactions = engine.list_transactions(&TransactionFilter::default());
    // Donation line plus the disbursement/impact pair.
    assert_eq!(transactions.len(), 3);

    let disbursement = &transactions[1];
    assert_eq!(disbursement.id, update.id);
    assert_eq!(disbursement.kind, TransactionKind::Disbursement);
    assert_eq!(disbursement.amount, 1200);

    let impact = &transactions[2];
    assert_eq!(impact.kind, TransactionKind::Impact);
    assert_eq!(impact.amount, 0);

    // Disbursements never touch the donor wallet or metrics.
    assert_eq!(engine.account_metrics().wallet_balance, balance_before);
}

#[test]
fn impact_filter_returns_only_zero_amount_lines() {
    let mut engine = engine_with_allowance(5000);
    settle(&mut engine, request("clean-water", 100));
    settle(&mut engine, request("education", 40));

    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    for organization_id in ["clean-water", "education"] {
        engine
            .record_impact(
                ImpactReport {
                    organization_id: organization_id.to_string(),
                    title: "School Supplies Distributed".to_string(),
                    description: "Textbooks for 200 students".to_string(),
                    funds_used: 1200,
                    people_impacted: 200,
                },
                now,
            )
            .unwrap();
    }

    let impact_lines = engine.list_transactions(&TransactionFilter {
        organization_id: None,
        kind: Some(TransactionKind::Impact),
    });
    assert_eq!(impact_lines.len(), 2);
    assert!(impact_lines.iter().all(|tx| tx.amount == 0));

    let education_lines = engine.list_transactions(&TransactionFilter {
        organization_id: Some("education".to_string()),
        kind: None,
    });
    assert_eq!(education_lines.len(), 3);
    assert!(
        education_lines
            .iter()
            .all(|tx| tx.organization_id == "education")
    );
    // Insertion order: the donation came before the disbursement pair.
    assert_eq!(education_lines[0].kind, TransactionKind::Donation);
}

#[test]
fn rejected_disbursements_leave_no_trace() {
    let mut engine = engine_with_allowance(500);
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let report = ImpactReport {
        organization_id: "clean-water".to_string(),
        title: "Well repair".to_string(),
        description: "Pump replacement".to_string(),
        funds_used: -5,
        people_impacted: 10,
    };
    assert!(matches!(
        engine.record_impact(report, now),
        Err(EngineError::InvalidDisbursement(_))
    ));

    let mut report = ImpactReport {
        organization_id: "clean-water".to_string(),
        title: String::new(),
        description: "Pump replacement".to_string(),
        funds_used: 5,
        people_impacted: 10,
    };
    assert!(matches!(
        engine.record_impact(report.clone(), now),
        Err(EngineError::InvalidDisbursement(_))
    ));

    report.title = "Well repair".to_string();
    report.people_impacted = -1;
    assert!(matches!(
        engine.record_impact(report, now),
        Err(EngineError::InvalidDisbursement(_))
    ));

    assert!(engine.list_impact_updates().is_empty());
    assert!(engine.list_transactions(&TransactionFilter::default()).is_empty());
}

#[test]
fn organization_snapshot_is_copied_not_referenced() {
    let mut engine = engine_with_allowance(500);
    settle(&mut engine, request("healthcare", 10));

    let transactions = engine.list_transactions(&TransactionFilter::default());
    assert_eq!(transactions[0].organization_name, "Healthcare Access");
}
