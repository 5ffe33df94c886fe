//! Message types exchanged with the SuperApp platform.
//!
//! All inbound fields are strings on the wire. Absent fields decode as empty
//! strings, which never verify.

use serde::{Deserialize, Serialize};

/// Message returned with every rejected signature.
pub const HASH_INVALID_MESSAGE: &str = "Hash is invalid";

/// Message returned when a gate-open request has been received.
pub const SUCCESS_MESSAGE: &str = "Success";

// =============================================================================
// Price lookup
// =============================================================================

/// Price lookup sent by SuperApp when a user scans a tag.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PriceRequest {
    /// Tag-QR reference code
    #[serde(default)]
    pub ref_code: String,
    #[serde(default)]
    pub hash: String,
    /// User who scanned the code
    #[serde(default)]
    pub user_id: String,
    /// SuperApp-side payment transaction id
    #[serde(default)]
    pub order_id: String,
}

/// Successful price response.
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceSuccessResponse {
    /// Amount to deduct from the user balance
    pub price: f32,
}

/// Rejected price response.
///
/// `user_message` is shown to the end user by SuperApp when present.
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceFailResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
}

impl PriceFailResponse {
    pub fn hash_invalid() -> Self {
        Self {
            message: HASH_INVALID_MESSAGE.to_string(),
            user_message: None,
        }
    }
}

// =============================================================================
// Gate open
// =============================================================================

/// Gate-open request sent after the user confirmed the payment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GateOpenRequest {
    /// Net amount deducted from the balance once the success callback lands
    #[serde(default)]
    pub price: String,
    /// Net points deducted once the success callback lands
    #[serde(default)]
    pub point: String,
    #[serde(default)]
    pub ref_code: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub callback_success_url: String,
    #[serde(default)]
    pub callback_fail_url: String,
    #[serde(default)]
    pub hash: String,
}

/// Gate-open response. SuperApp only reads the body of non-200 responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct GateOpenResponse {
    pub message: String,
}

impl GateOpenResponse {
    pub fn success() -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn hash_invalid() -> Self {
        Self {
            message: HASH_INVALID_MESSAGE.to_string(),
        }
    }
}

/// Body posted to one of the callback URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub hash: String,
}
