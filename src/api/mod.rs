//! HTTP API module for the shift report engine.
//!
//! This module exposes the catalog, row normalization, shift summaries and
//! report load/save/delete as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{NormalizeRequest, ProductsQuery};
pub use response::{ApiError, ApiErrorResponse, NormalizeResponse, ProductsResponse};
pub use state::AppState;
