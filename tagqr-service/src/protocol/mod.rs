//! SuperApp Tag-QR wire protocol.
//!
//! This module provides:
//! - Request/response bodies exchanged with the SuperApp platform
//! - The field-order hash used to authenticate both directions
//!
//! ## Flow
//!
//! ```text
//! SuperApp → /get-price  → verify → price
//! SuperApp → /open-gate  → verify → 200 ack → (detached) callback → SuperApp
//! ```

pub mod signature;
pub mod types;

pub use signature::{
    sign, Field, HashSigner, SignedMessage, GATE_CALLBACK_ORDER, GATE_OPEN_REQUEST_ORDER,
    PRICE_REQUEST_ORDER,
};
pub use types::{
    CallbackRequest, GateOpenRequest, GateOpenResponse, PriceFailResponse, PriceRequest,
    PriceSuccessResponse, HASH_INVALID_MESSAGE, SUCCESS_MESSAGE,
};
