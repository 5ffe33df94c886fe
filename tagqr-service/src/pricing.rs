//! Price quoting for verified price lookups.

use rand::prelude::*;

use crate::protocol::PriceRequest;

/// Lowest price the placeholder quoter returns (inclusive).
pub const MIN_PRICE: f32 = 1.0;

/// Upper bound of the placeholder quoter (exclusive).
pub const MAX_PRICE: f32 = 10.0;

/// Produces the amount to deduct for a verified price lookup.
///
/// Deployments replace the placeholder with real pricing logic. Quotes must
/// stay positive and bounded.
pub trait PriceQuoter: Send + Sync {
    fn quote(&self, request: &PriceRequest) -> f32;
}

/// Placeholder quoter returning a uniform value in `[MIN_PRICE, MAX_PRICE)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPriceQuoter;

impl PriceQuoter for RandomPriceQuoter {
    fn quote(&self, _request: &PriceRequest) -> f32 {
        thread_rng().gen_range(MIN_PRICE..MAX_PRICE)
    }
}
