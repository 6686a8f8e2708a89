// ⚠️ Error kinds surfaced to callers
// Both variants carry fixed messages; rejections never say which check failed.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// Malformed payload or any failed validation rule (HTTP 400)
    #[error("The receipt is invalid.")]
    InvalidReceipt,

    /// Unknown or unparsable identifier (HTTP 404)
    #[error("No receipt found for that ID.")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
