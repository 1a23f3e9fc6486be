//! Price estimate service forwarding to the external predictor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{PriceEstimateQuery, PricePredictor};
use crate::domain::{Error, PredictedPrice, PriceQuery};

use super::service_errors::map_price_prediction_error;

/// Implements [`PriceEstimateQuery`] over a [`PricePredictor`].
pub struct PriceEstimateService<P> {
    predictor: Arc<P>,
}

impl<P> PriceEstimateService<P> {
    /// Create the service.
    #[must_use]
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }
}

#[async_trait]
impl<P> PriceEstimateQuery for PriceEstimateService<P>
where
    P: PricePredictor,
{
    async fn predict_price(&self, query: &PriceQuery) -> Result<PredictedPrice, Error> {
        self.predictor.predict(query).await.map_err(|error| {
            warn!(location = query.location(), %error, "price prediction failed");
            map_price_prediction_error(error)
        })
    }
}
