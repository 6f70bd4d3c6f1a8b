//! Cookie Canary - cookie protection probe endpoint
//!
//! This crate serves a known canary value as a plain cookie, a signed cookie,
//! an encrypted cookie and a server-side session entry, so an external
//! harness can check that each carrier survives the round trip.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
