//! Typed resource operations on top of the request executor.
//!
//! Each operation is a pure translation: a typed input struct becomes one
//! [`RequestSpec`](crate::RequestSpec), and the raw body decodes into a typed
//! output. No retry logic or state lives here; all of that belongs to the
//! executor.

pub mod auth;
pub mod calendar;
pub mod customers;
pub mod linkages;
pub mod tasks;

use crate::error::{ApiError, Result};
use serde::Serialize;

/// Serializes a typed request payload to the JSON body of a spec.
pub(crate) fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::config(format!("failed to serialize request body: {e}")))
}
