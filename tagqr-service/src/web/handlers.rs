//! SuperApp endpoint handlers.
//!
//! Any status other than 200 is treated as a failed request by SuperApp.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::gate::{AlwaysOpen, CallbackNotifier, GateController};
use crate::pricing::{PriceQuoter, RandomPriceQuoter};
use crate::protocol::{
    GateOpenRequest, GateOpenResponse, HashSigner, PriceFailResponse, PriceRequest,
    PriceSuccessResponse, SignedMessage,
};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub signer: HashSigner,
    pub quoter: Arc<dyn PriceQuoter>,
    pub gate: GateController,
}

impl AppState {
    pub fn new(signer: HashSigner, quoter: Arc<dyn PriceQuoter>, gate: GateController) -> Self {
        Self {
            signer,
            quoter,
            gate,
        }
    }

    /// State with the placeholder quoter and actuator.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let signer = HashSigner::new(config.secret.as_str());
        let notifier = CallbackNotifier::new(signer.clone(), config.callback_timeout())?;
        let gate = GateController::new(Arc::new(AlwaysOpen), notifier);

        Ok(Self::new(signer, Arc::new(RandomPriceQuoter), gate))
    }
}

// =============================================================================
// Index / Fallback
// =============================================================================

/// Identification text.
pub async fn index() -> &'static str {
    "Example Tag QR Service"
}

#[derive(Serialize)]
pub struct NotFoundResponse {
    pub message: &'static str,
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            message: "Not found",
        }),
    )
}

// =============================================================================
// Price lookup
// =============================================================================

/// Price lookup endpoint.
pub async fn get_price(
    State(state): State<AppState>,
    Json(request): Json<PriceRequest>,
) -> Response {
    info!(
        ref_code = %request.ref_code,
        user_id = %request.user_id,
        order_id = %request.order_id,
        "price_request_received"
    );

    if !state.signer.verify(&request) {
        warn!(ref_code = %request.ref_code, kind = PriceRequest::kind(), "request_rejected");
        return (StatusCode::FORBIDDEN, Json(PriceFailResponse::hash_invalid())).into_response();
    }

    let price = state.quoter.quote(&request);

    info!(ref_code = %request.ref_code, price = price, "price_quoted");

    (StatusCode::OK, Json(PriceSuccessResponse { price })).into_response()
}

// =============================================================================
// Gate open
// =============================================================================

/// Gate-open endpoint.
///
/// A 200 means the request was received, not that the gate opened. The
/// outcome is reported later through the callback URLs.
pub async fn open_gate(
    State(state): State<AppState>,
    Json(request): Json<GateOpenRequest>,
) -> impl IntoResponse {
    info!(
        ref_code = %request.ref_code,
        order_id = %request.order_id,
        price = %request.price,
        point = %request.point,
        "gate_request_received"
    );

    if !state.signer.verify(&request) {
        warn!(ref_code = %request.ref_code, kind = GateOpenRequest::kind(), "request_rejected");
        return (StatusCode::FORBIDDEN, Json(GateOpenResponse::hash_invalid()));
    }

    state.gate.accept(request);

    (StatusCode::OK, Json(GateOpenResponse::success()))
}
