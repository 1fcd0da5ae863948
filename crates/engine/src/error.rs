//! The module contains the error the engine can throw.
//!
//! Every kind is locally recoverable: the triggering command is rejected
//! with a typed reason and no state mutation occurs. There is no retry
//! policy; a rejected command must be resubmitted with corrected input.

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid donor: {0}")]
    InvalidDonor(String),
    #[error("Unknown organization: \"{0}\"")]
    UnknownOrganization(String),
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),
    #[error("Settlement in progress: {0}")]
    SettlementInProgress(String),
    #[error("Invalid disbursement: {0}")]
    InvalidDisbursement(String),
    #[error("No active settlement: {0}")]
    NoActiveSettlement(String),
}
