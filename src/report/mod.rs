//! Report lifecycle: load, save and delete by (site, date).
//!
//! The service validates drafts, persists them through a [`ReportStore`]
//! and re-derives every norm field from the current catalog on load.
//!
//! [`ReportStore`]: crate::storage::ReportStore

mod service;

pub use service::{ReportService, enrich_report};
