//! propdesk — trading math and performance analytics for a prop-trading
//! platform.
//!
//! Hexagonal architecture: calculation logic in [`domain`], capability
//! traits in [`ports`], concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
