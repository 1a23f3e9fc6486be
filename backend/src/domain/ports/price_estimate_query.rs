//! Driving port for nightly price estimates.

use async_trait::async_trait;

use crate::domain::{Error, PredictedPrice, PriceQuery};

/// Domain use-case port for price estimates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceEstimateQuery: Send + Sync {
    /// Estimate a nightly price. An unreachable estimator is
    /// `service_unavailable`; a refusal is `invalid_request`.
    async fn predict_price(&self, query: &PriceQuery) -> Result<PredictedPrice, Error>;
}
