//! Physical gate actuation.

use async_trait::async_trait;
use tracing::info;

use crate::protocol::GateOpenRequest;

/// Result of trying to open the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Success,
    Failure,
}

impl GateOutcome {
    /// Callback URL SuperApp expects for this outcome.
    pub fn destination<'a>(&self, request: &'a GateOpenRequest) -> &'a str {
        match self {
            GateOutcome::Success => &request.callback_success_url,
            GateOutcome::Failure => &request.callback_fail_url,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateOutcome::Success => "success",
            GateOutcome::Failure => "failure",
        }
    }
}

/// Performs the action a verified gate-open request asks for.
///
/// Runs after the HTTP acknowledgment has been sent. The returned outcome
/// decides which callback URL is notified.
#[async_trait]
pub trait GateActuator: Send + Sync {
    async fn actuate(&self, request: &GateOpenRequest) -> GateOutcome;
}

/// Actuator that reports success for every request.
///
/// Stands in for real hardware until an integration provides its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOpen;

#[async_trait]
impl GateActuator for AlwaysOpen {
    async fn actuate(&self, request: &GateOpenRequest) -> GateOutcome {
        info!(
            ref_code = %request.ref_code,
            order_id = %request.order_id,
            "gate_opened"
        );
        GateOutcome::Success
    }
}
