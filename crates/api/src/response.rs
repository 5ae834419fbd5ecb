//! Response envelope for API handlers.
//!
//! Successful responses are wrapped as `{ "data": ... }`. Errors use the
//! `{ "error", "code" }` body built in [`crate::error`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: games }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
