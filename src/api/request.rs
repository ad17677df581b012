//! Request types for the shift report API.

use serde::{Deserialize, Serialize};

use crate::models::RawTaskRow;

/// Request body for `POST /rows/normalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeRequest {
    /// Line identifier, `A3` or `A4`.
    pub line: String,
    /// Rows as entered.
    #[serde(default)]
    pub rows: Vec<RawTaskRow>,
}

/// Query string for `GET /catalog/products`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsQuery {
    /// Only list products with a norm on this line.
    #[serde(default)]
    pub line: Option<String>,
}
