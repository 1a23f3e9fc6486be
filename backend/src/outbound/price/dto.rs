//! DTOs for the prediction service's JSON replies.
//!
//! The service answers `200` with either `{"predicted_price": n}` or
//! `{"error": "..."}`.

use serde::Deserialize;

use crate::domain::PredictedPrice;
use crate::domain::ports::PricePredictionError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum PredictionReplyDto {
    Estimate { predicted_price: f64 },
    Failure { error: String },
}

impl PredictionReplyDto {
    pub(super) fn into_domain(self) -> Result<PredictedPrice, PricePredictionError> {
        match self {
            Self::Estimate { predicted_price } if predicted_price.is_finite() => {
                Ok(PredictedPrice { predicted_price })
            }
            Self::Estimate { predicted_price } => Err(PricePredictionError::decode(format!(
                "non-finite estimate {predicted_price}"
            ))),
            Self::Failure { error } => Err(PricePredictionError::rejected(error)),
        }
    }
}
