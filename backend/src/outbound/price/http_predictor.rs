//! Reqwest-backed price predictor.
//!
//! Owns transport details only: request serialisation, timeout, status
//! mapping, and JSON decoding into a [`PredictedPrice`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::PredictionReplyDto;
use crate::domain::ports::{PricePredictionError, PricePredictor};
use crate::domain::{PredictedPrice, PriceQuery};

const PREDICT_PATH: &str = "predict-price";

/// Calls `POST {base}/predict-price` on the prediction service.
pub struct HttpPricePredictor {
    client: Client,
    endpoint: Url,
}

impl HttpPricePredictor {
    /// Build a predictor for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: predict_endpoint(base_url),
        })
    }
}

/// `base_url` with the prediction path appended, whether or not it ends
/// in a slash.
fn predict_endpoint(base_url: &Url) -> Url {
    let mut endpoint = base_url.clone();
    if let Ok(mut segments) = endpoint.path_segments_mut() {
        segments.pop_if_empty().push(PREDICT_PATH);
    }
    endpoint
}

#[async_trait]
impl PricePredictor for HttpPricePredictor {
    async fn predict(&self, query: &PriceQuery) -> Result<PredictedPrice, PricePredictionError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PricePredictionError::status(status.as_u16()));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_reply(body.as_ref())
    }
}

fn parse_reply(body: &[u8]) -> Result<PredictedPrice, PricePredictionError> {
    let reply: PredictionReplyDto = serde_json::from_slice(body).map_err(|error| {
        PricePredictionError::decode(format!("invalid prediction payload: {error}"))
    })?;
    reply.into_domain()
}

fn map_transport_error(error: reqwest::Error) -> PricePredictionError {
    PricePredictionError::transport(error.to_string())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network prediction helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8001", "http://localhost:8001/predict-price")]
    #[case("http://localhost:8001/", "http://localhost:8001/predict-price")]
    #[case("http://ml.internal/v2/", "http://ml.internal/v2/predict-price")]
    fn endpoint_appends_path(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid url");
        assert_eq!(predict_endpoint(&base).as_str(), expected);
    }

    #[test]
    fn decodes_estimate() {
        let price = parse_reply(br#"{"predicted_price": 4250.5}"#).expect("decodes");
        assert_eq!(
            price,
            PredictedPrice {
                predicted_price: 4250.5
            }
        );
    }

    #[test]
    fn upstream_error_payload_is_rejection() {
        let err = parse_reply(br#"{"error": "Could not geocode the provided location."}"#)
            .expect_err("rejected");
        assert_eq!(
            err,
            PricePredictionError::rejected("Could not geocode the provided location.")
        );
    }

    #[rstest]
    #[case(b"not json".as_slice())]
    #[case(br#"{"price": 10}"#.as_slice())]
    fn malformed_payload_is_decode_error(#[case] body: &[u8]) {
        let err = parse_reply(body).expect_err("decode failure");
        assert!(matches!(err, PricePredictionError::Decode { .. }));
    }

    #[test]
    fn request_body_omits_missing_country() {
        let query = PriceQuery::new("Goa", None).expect("valid");
        let body = serde_json::to_value(&query).expect("serialises");
        assert_eq!(body, serde_json::json!({ "location": "Goa" }));
    }
}
