//! Outbound gate outcome callbacks.
//!
//! Each notification is a single best-effort POST. Nothing is retried and the
//! callback response is never interpreted; SuperApp reconciles missing
//! callbacks on its side.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};
use url::Url;

use super::actuator::GateOutcome;
use crate::protocol::{CallbackRequest, GateOpenRequest, HashSigner, GATE_CALLBACK_ORDER};

/// Why a callback did not reach the remote side.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid callback url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("callback request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Record of one notification attempt, emitted on the completion hook.
#[derive(Debug)]
pub struct NotifyReport {
    pub order_id: String,
    pub outcome: GateOutcome,
    pub destination: String,
    pub payload: CallbackRequest,
    /// HTTP status returned by the callback endpoint, if it answered.
    pub result: Result<u16, NotifyError>,
}

/// Posts signed outcome notifications to SuperApp callback URLs.
#[derive(Clone)]
pub struct CallbackNotifier {
    client: Client,
    signer: HashSigner,
    hook: Option<UnboundedSender<NotifyReport>>,
}

impl CallbackNotifier {
    /// Create a notifier whose requests are bounded by `timeout`.
    pub fn new(signer: HashSigner, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, signer))
    }

    /// Create a notifier around an existing HTTP client.
    pub fn with_client(client: Client, signer: HashSigner) -> Self {
        Self {
            client,
            signer,
            hook: None,
        }
    }

    /// Receive a [`NotifyReport`] after every attempt.
    pub fn with_hook(mut self, hook: UnboundedSender<NotifyReport>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Signed body for a callback about `request`.
    pub fn payload(&self, request: &GateOpenRequest) -> CallbackRequest {
        CallbackRequest {
            hash: self.signer.sign_message(request, GATE_CALLBACK_ORDER),
        }
    }

    /// Send the notification and wait for the single attempt to finish.
    ///
    /// Failures are logged and reported on the hook, never returned.
    pub async fn deliver(&self, outcome: GateOutcome, request: &GateOpenRequest) {
        let destination = outcome.destination(request).to_string();
        let payload = self.payload(request);

        let result = self.post(&destination, &payload).await;

        match &result {
            Ok(status) => info!(
                order_id = %request.order_id,
                outcome = outcome.as_str(),
                url = %destination,
                status_code = status,
                "callback_sent"
            ),
            Err(e) => warn!(
                order_id = %request.order_id,
                outcome = outcome.as_str(),
                url = %destination,
                error = %e,
                "callback_failed"
            ),
        }

        if let Some(hook) = &self.hook {
            // The hook receiver may already be gone.
            let _ = hook.send(NotifyReport {
                order_id: request.order_id.clone(),
                outcome,
                destination,
                payload,
                result,
            });
        }
    }

    async fn post(&self, destination: &str, payload: &CallbackRequest) -> Result<u16, NotifyError> {
        let url = Url::parse(destination).map_err(|source| NotifyError::InvalidUrl {
            url: destination.to_string(),
            source,
        })?;

        let response = self.client.post(url).json(payload).send().await?;
        Ok(response.status().as_u16())
    }
}
