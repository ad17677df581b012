//! Application state for the shift report API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use crate::report::ReportService;

/// Shared application state.
///
/// Holds the report service, which owns the store handle and the
/// calculation settings.
#[derive(Clone)]
pub struct AppState {
    service: ReportService,
}

impl AppState {
    /// Creates a new application state around a report service.
    pub fn new(service: ReportService) -> Self {
        Self { service }
    }

    /// Returns the report service.
    pub fn service(&self) -> &ReportService {
        &self.service
    }
}
