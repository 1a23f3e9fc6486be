//! RentEase backend library: domain model, HTTP adapter, and outbound
//! adapters for the rental listing marketplace.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
