//! SuperApp request and callback signatures.
//!
//! A signature is the lowercase hex SHA-1 digest of a fixed list of fields
//! concatenated without separators. The shared secret is one of those fields.
//! Each message direction has its own field order and the orders must be
//! reproduced exactly to stay wire-compatible with SuperApp.

use std::sync::Arc;

use sha1::{Digest, Sha1};
use tracing::warn;

use super::types::{GateOpenRequest, PriceRequest};

/// A value that takes part in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Secret,
    RefCode,
    UserId,
    OrderId,
    Price,
    CallbackSuccessUrl,
    CallbackFailUrl,
}

/// Inbound `/get-price` order.
pub const PRICE_REQUEST_ORDER: &[Field] = &[
    Field::RefCode,
    Field::UserId,
    Field::OrderId,
    Field::Secret,
];

/// Inbound `/open-gate` order.
pub const GATE_OPEN_REQUEST_ORDER: &[Field] = &[
    Field::Secret,
    Field::CallbackFailUrl,
    Field::CallbackSuccessUrl,
    Field::Price,
];

/// Outbound callback order.
pub const GATE_CALLBACK_ORDER: &[Field] = &[
    Field::Price,
    Field::CallbackSuccessUrl,
    Field::CallbackFailUrl,
    Field::Secret,
];

/// Compute the signature over already-ordered fields.
pub fn sign<S: AsRef<str>>(fields: &[S]) -> String {
    let mut hasher = Sha1::new();
    for field in fields {
        hasher.update(field.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// A message carrying signed fields.
pub trait SignedMessage {
    /// Field order used to authenticate the inbound message.
    const INBOUND_ORDER: &'static [Field];

    /// Value of a non-secret field.
    ///
    /// Asking for a field the message does not carry means an order table is
    /// wrong; debug builds panic, release builds sign an empty string.
    fn field(&self, field: Field) -> &str;

    /// Signature supplied by the sender.
    fn supplied_hash(&self) -> &str;

    fn kind() -> &'static str;
}

impl SignedMessage for PriceRequest {
    const INBOUND_ORDER: &'static [Field] = PRICE_REQUEST_ORDER;

    fn field(&self, field: Field) -> &str {
        match field {
            Field::RefCode => &self.ref_code,
            Field::UserId => &self.user_id,
            Field::OrderId => &self.order_id,
            Field::Price | Field::CallbackSuccessUrl | Field::CallbackFailUrl | Field::Secret => {
                debug_assert!(false, "price request has no {:?} field", field);
                ""
            }
        }
    }

    fn supplied_hash(&self) -> &str {
        &self.hash
    }

    fn kind() -> &'static str {
        "price"
    }
}

impl SignedMessage for GateOpenRequest {
    const INBOUND_ORDER: &'static [Field] = GATE_OPEN_REQUEST_ORDER;

    fn field(&self, field: Field) -> &str {
        match field {
            Field::RefCode => &self.ref_code,
            Field::UserId => &self.user_id,
            Field::OrderId => &self.order_id,
            Field::Price => &self.price,
            Field::CallbackSuccessUrl => &self.callback_success_url,
            Field::CallbackFailUrl => &self.callback_fail_url,
            Field::Secret => {
                debug_assert!(false, "secret is supplied by the signer");
                ""
            }
        }
    }

    fn supplied_hash(&self) -> &str {
        &self.hash
    }

    fn kind() -> &'static str {
        "gate_open"
    }
}

/// Signs and verifies messages with the process-wide shared secret.
#[derive(Clone)]
pub struct HashSigner {
    secret: Arc<str>,
}

impl HashSigner {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign `message` using the given field order.
    pub fn sign_message<M: SignedMessage>(&self, message: &M, order: &[Field]) -> String {
        let fields: Vec<&str> = order
            .iter()
            .map(|&field| match field {
                Field::Secret => &*self.secret,
                other => message.field(other),
            })
            .collect();
        sign(&fields)
    }

    /// Verify the hash supplied with an inbound message.
    ///
    /// The comparison is exact and case-sensitive.
    pub fn verify<M: SignedMessage>(&self, message: &M) -> bool {
        let supplied = message.supplied_hash();
        if supplied.is_empty() {
            warn!(kind = M::kind(), "signature_missing");
            return false;
        }

        let expected = self.sign_message(message, M::INBOUND_ORDER);
        let valid = constant_time_compare(&expected, supplied);

        if !valid {
            warn!(
                kind = M::kind(),
                expected_length = expected.len(),
                actual_length = supplied.len(),
                "signature_mismatch"
            );
        }

        valid
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_request(hash: &str) -> PriceRequest {
        PriceRequest {
            ref_code: "R1".to_string(),
            hash: hash.to_string(),
            user_id: "U1".to_string(),
            order_id: "O1".to_string(),
        }
    }

    fn gate_request() -> GateOpenRequest {
        GateOpenRequest {
            price: "7.5".to_string(),
            point: "0".to_string(),
            ref_code: "R1".to_string(),
            user_id: "U1".to_string(),
            order_id: "O1".to_string(),
            callback_success_url: "https://superapp.test/ok".to_string(),
            callback_fail_url: "https://superapp.test/fail".to_string(),
            hash: String::new(),
        }
    }

    #[test]
    fn test_sign_known_digest() {
        // sha1("abc")
        assert_eq!(sign(&["a", "b", "c"]), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(sign(&["abc"]), sign(&["a", "bc"]));
    }

    #[test]
    fn test_sign_deterministic_lowercase_hex() {
        let first = sign(&["R1", "U1", "O1", "abc"]);
        let second = sign(&["R1", "U1", "O1", "abc"]);
        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_sensitive_to_every_field() {
        let base = sign(&["R1", "U1", "O1", "abc"]);
        assert_ne!(base, sign(&["R2", "U1", "O1", "abc"]));
        assert_ne!(base, sign(&["R1", "U2", "O1", "abc"]));
        assert_ne!(base, sign(&["R1", "U1", "O2", "abc"]));
        assert_ne!(base, sign(&["R1", "U1", "O1", "abd"]));
    }

    #[test]
    fn test_price_request_order() {
        let signer = HashSigner::new("abc");
        let expected = sign(&["R1", "U1", "O1", "abc"]);
        assert_eq!(
            signer.sign_message(&price_request(""), PRICE_REQUEST_ORDER),
            expected
        );
        assert!(signer.verify(&price_request(&expected)));
    }

    #[test]
    fn test_gate_orders_differ_by_direction() {
        let signer = HashSigner::new("abc");
        let req = gate_request();

        let inbound = signer.sign_message(&req, GATE_OPEN_REQUEST_ORDER);
        assert_eq!(
            inbound,
            sign(&[
                "abc",
                "https://superapp.test/fail",
                "https://superapp.test/ok",
                "7.5"
            ])
        );

        let outbound = signer.sign_message(&req, GATE_CALLBACK_ORDER);
        assert_eq!(
            outbound,
            sign(&[
                "7.5",
                "https://superapp.test/ok",
                "https://superapp.test/fail",
                "abc"
            ])
        );
        assert_ne!(inbound, outbound);
    }

    #[test]
    fn test_verify_gate_request() {
        let signer = HashSigner::new("abc");
        let mut req = gate_request();
        req.hash = signer.sign_message(&req, GATE_OPEN_REQUEST_ORDER);
        assert!(signer.verify(&req));

        // Point is not covered by the hash.
        req.point = "100".to_string();
        assert!(signer.verify(&req));

        req.price = "0.01".to_string();
        assert!(!signer.verify(&req));
    }

    #[test]
    fn test_verify_rejects_near_misses() {
        let signer = HashSigner::new("abc");
        let expected = sign(&["R1", "U1", "O1", "abc"]);

        assert!(!signer.verify(&price_request("")));
        assert!(!signer.verify(&price_request(&expected[..39])));
        assert!(!signer.verify(&price_request(&expected.to_uppercase())));
        assert!(!signer.verify(&price_request(&format!("{} ", expected))));
    }

    #[test]
    fn test_verify_rejects_last_byte_change() {
        let signer = HashSigner::new("abc");
        let expected = sign(&["R1", "U1", "O1", "abc"]);

        let last = expected.as_bytes()[39];
        let flipped = if last == b'0' { '1' } else { '0' };
        let tampered = format!("{}{}", &expected[..39], flipped);

        assert_eq!(tampered.len(), expected.len());
        assert!(!signer.verify(&price_request(&tampered)));
        assert!(signer.verify(&price_request(&expected)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "price request has no")]
    fn test_price_request_signed_with_gate_order_panics() {
        HashSigner::new("abc").sign_message(&price_request(""), GATE_CALLBACK_ORDER);
    }

    #[test]
    fn test_verify_uses_injected_secret() {
        let expected = sign(&["R1", "U1", "O1", "abc"]);
        assert!(!HashSigner::new("abd").verify(&price_request(&expected)));
    }
}
