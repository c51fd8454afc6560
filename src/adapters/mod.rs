//! Concrete adapter implementations for ports.

pub mod csv_holdings_adapter;
pub mod file_config_adapter;
pub mod json_context_adapter;
pub mod json_report_adapter;
pub mod markdown_report;
