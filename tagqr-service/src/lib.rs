//! Tag-QR service - SuperApp webhook receiver.
//!
//! Answers SuperApp price lookups and gate-open requests, authenticating both
//! with the shared-secret hash, and reports gate outcomes back through the
//! callback URLs supplied with each request.
//!
//! ## Architecture
//!
//! ```text
//! SuperApp → Web Server → HashSigner::verify → PriceQuoter | GateController
//!                                                   GateController → CallbackNotifier → SuperApp
//! ```

pub mod config;
pub mod gate;
pub mod pricing;
pub mod protocol;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use gate::{
    AlwaysOpen, CallbackNotifier, GateActuator, GateController, GateOutcome, NotifyError,
    NotifyReport,
};
pub use pricing::{PriceQuoter, RandomPriceQuoter};
pub use protocol::{GateOpenRequest, HashSigner, PriceRequest};
pub use web::{create_router, AppState};
