//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers issue and clear state; query handlers only read it.

pub mod handlers;

pub use handlers::{
    CanaryIssued, CanaryReport, CheckOutcome, ClearSessionCommand, ClearSessionHandler,
    IssueCanaryCommand, IssueCanaryHandler, VerifyCanaryHandler, VerifyCanaryQuery,
};
