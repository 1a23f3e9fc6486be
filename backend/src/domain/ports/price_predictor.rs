//! Port for the external price-prediction service.
use async_trait::async_trait;

use crate::domain::{PredictedPrice, PriceQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by price prediction adapters.
    pub enum PricePredictionError {
        /// The service could not be reached or timed out.
        Transport { message: String } => "price service request failed: {message}",
        /// The service answered with a non-success status.
        Status { status: u16 } => "price service returned status {status}",
        /// The service answered but could not produce an estimate.
        Rejected { message: String } => "price service rejected the request: {message}",
        /// The response body was not understood.
        Decode { message: String } => "price service response was invalid: {message}",
    }
}

/// Driven port estimating nightly prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricePredictor: Send + Sync {
    /// Estimate a nightly price for `query`.
    async fn predict(&self, query: &PriceQuery) -> Result<PredictedPrice, PricePredictionError>;
}
