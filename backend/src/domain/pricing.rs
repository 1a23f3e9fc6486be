//! Nightly price estimates from the external prediction service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors for price estimate requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceQueryValidationError {
    /// Location was blank.
    #[error("location is required")]
    EmptyLocation,
}

/// Where the property is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuery {
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

impl PriceQuery {
    /// Validate a price query. A blank country is treated as absent.
    pub fn new(location: &str, country: Option<&str>) -> Result<Self, PriceQueryValidationError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(PriceQueryValidationError::EmptyLocation);
        }
        let country = country
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Ok(Self {
            location: location.to_owned(),
            country,
        })
    }

    /// Town or region.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Country, if supplied.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

/// Estimated nightly price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictedPrice {
    /// Estimate in whole currency units, possibly fractional.
    pub predicted_price: f64,
}
