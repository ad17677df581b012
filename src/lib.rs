//! Shift report engine for manufacturing lines
//!
//! This crate records daily production shift reports for lines A3 and A4,
//! resolves per-product output norms with discounts, and aggregates labor
//! hours by line into per-product and per-line summary tables.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod storage;
pub mod validation;
