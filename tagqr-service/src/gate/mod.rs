//! Gate-open handling.
//!
//! A verified request is acknowledged straight away. The gate action and the
//! outcome callback then run on a detached task that nobody joins:
//!
//! ```text
//! verify → 200 ack
//!            └─ spawn: actuate → Success → POST callback_success_url
//!                               → Failure → POST callback_fail_url
//! ```

pub mod actuator;
pub mod notifier;

use std::sync::Arc;

use tracing::info;

use crate::protocol::GateOpenRequest;

pub use actuator::{AlwaysOpen, GateActuator, GateOutcome};
pub use notifier::{CallbackNotifier, NotifyError, NotifyReport};

/// Drives accepted gate-open requests to their outcome callback.
#[derive(Clone)]
pub struct GateController {
    actuator: Arc<dyn GateActuator>,
    notifier: CallbackNotifier,
}

impl GateController {
    pub fn new(actuator: Arc<dyn GateActuator>, notifier: CallbackNotifier) -> Self {
        Self { actuator, notifier }
    }

    /// Schedule the gate action and its notification without waiting for either.
    ///
    /// `request` must already be verified.
    pub fn accept(&self, request: GateOpenRequest) {
        info!(
            ref_code = %request.ref_code,
            order_id = %request.order_id,
            "gate_request_accepted"
        );

        let controller = self.clone();
        tokio::spawn(async move {
            let outcome = controller.actuator.actuate(&request).await;
            controller.notifier.deliver(outcome, &request).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HashSigner;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Jammed;

    #[async_trait]
    impl GateActuator for Jammed {
        async fn actuate(&self, _request: &GateOpenRequest) -> GateOutcome {
            GateOutcome::Failure
        }
    }

    struct Slow;

    #[async_trait]
    impl GateActuator for Slow {
        async fn actuate(&self, _request: &GateOpenRequest) -> GateOutcome {
            tokio::time::sleep(Duration::from_millis(300)).await;
            GateOutcome::Success
        }
    }

    fn notifier_with_hook() -> (CallbackNotifier, mpsc::UnboundedReceiver<NotifyReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let notifier = CallbackNotifier::new(HashSigner::new("abc"), Duration::from_secs(1))
            .unwrap()
            .with_hook(tx);
        (notifier, rx)
    }

    #[tokio::test]
    async fn test_accept_returns_before_outcome() {
        let (notifier, mut rx) = notifier_with_hook();
        let controller = GateController::new(Arc::new(Slow), notifier);

        let started = tokio::time::Instant::now();
        controller.accept(GateOpenRequest {
            callback_success_url: "ok-not-a-url".to_string(),
            ..Default::default()
        });
        assert!(started.elapsed() < Duration::from_millis(100));
        assert!(rx.try_recv().is_err());

        let report = rx.recv().await.unwrap();
        assert_eq!(report.outcome, GateOutcome::Success);
        assert_eq!(report.destination, "ok-not-a-url");
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_failure_outcome_targets_fail_url() {
        let (notifier, mut rx) = notifier_with_hook();
        let controller = GateController::new(Arc::new(Jammed), notifier);

        controller.accept(GateOpenRequest {
            order_id: "O9".to_string(),
            callback_success_url: "ok-not-a-url".to_string(),
            callback_fail_url: "fail-not-a-url".to_string(),
            ..Default::default()
        });

        let report = rx.recv().await.unwrap();
        assert_eq!(report.order_id, "O9");
        assert_eq!(report.outcome, GateOutcome::Failure);
        assert_eq!(report.destination, "fail-not-a-url");
    }
}
