//! Price-prediction outbound adapter.
//!
//! A thin HTTP implementation of the `PricePredictor` port.

mod dto;
mod http_predictor;

pub use http_predictor::HttpPricePredictor;
