//! Landmark lookup providers.
//!
//! The landmark service owns the geodesy: given the device position it
//! returns nearby hills with distance and bearing already computed. This
//! module only transports and validates that list.
//!
//! # Example
//!
//! ```ignore
//! use hillcompass::provider::{HttpLandmarkProvider, LandmarkProvider, LookupConfig};
//! use hillcompass::refresh::GeoPoint;
//!
//! let provider = HttpLandmarkProvider::from_config(LookupConfig::default())?;
//! let hills = provider.lookup(GeoPoint::new(54.6, -3.1)?).await?;
//! ```

mod http;
mod lookup;
mod types;

pub use http::{AsyncHttpClient, ReqwestClient};
pub use lookup::{HttpLandmarkProvider, StaticLandmarkProvider};
pub use types::{
    LandmarkProvider, LookupConfig, LookupError, DEFAULT_BASE_URL, DEFAULT_SEARCH_RADIUS,
    DEFAULT_TIMEOUT_SECS,
};

#[cfg(test)]
pub use http::tests::MockHttpClient;
