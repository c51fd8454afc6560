//! Core domain types and engines.

pub mod error;
pub mod holding;
pub mod goal;
pub mod context;
pub mod ranking;
pub mod reference;
pub mod exposure;
pub mod sentiment;
pub mod simulation;
pub mod market_analysis;
pub mod recommendation;
pub mod rebalance;
pub mod config_validation;
pub mod settings;
pub mod report;
