//! Endpoint handlers for the query API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/cafe` | Venues of a city, filtered and limited |

use std::sync::Arc;

use axum::extract::{Query, State};
use cafe_core::{format_venues, CafeQuery, RawCafeParams};

use crate::error::ApiError;
use crate::state::AppState;

/// Answer `GET /cafe`.
///
/// # Query Parameters
///
/// - `city`: required catalog key (case-sensitive)
/// - `count`: optional integer limit; negative values return nothing
/// - `search`: optional case-insensitive name substring
///
/// Responds `200` with the matching venue names joined by `,` (possibly
/// empty), or `400` with `unknown city` / `incorrect count`.
///
/// Parameters are taken as raw pairs so that repeated or unknown keys
/// never cause an extractor rejection; the first occurrence of a key wins.
pub async fn find_cafes(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<String, ApiError> {
    let raw = RawCafeParams::from_pairs(pairs);

    let query = CafeQuery::validate(raw, &state.catalog).inspect_err(|e| {
        tracing::debug!(error = %e, "rejected cafe query");
    })?;

    let venues = state.catalog.search(&query);
    tracing::debug!(
        city = %query.city,
        count = ?query.count,
        search = %query.search,
        results = venues.len(),
        "cafe query answered"
    );

    Ok(format_venues(&venues))
}
