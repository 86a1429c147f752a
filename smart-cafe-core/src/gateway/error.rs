//! Gateway error types.

use thiserror::Error;

/// Errors that can occur talking to the ordering API.
///
/// All of these are treated as transient by the workflows: an order
/// placement falls back to a synthesized identifier, a lookup falls
/// back to the local ledger.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("Server returned status {0}")]
    BadStatus(u16),

    #[error("Could not decode response: {0}")]
    Decode(String),
}
