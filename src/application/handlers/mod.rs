//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod canary;

pub use canary::{
    CanaryIssued, CanaryReport, CheckOutcome, ClearSessionCommand, ClearSessionHandler,
    IssueCanaryCommand, IssueCanaryHandler, VerifyCanaryHandler, VerifyCanaryQuery,
};
