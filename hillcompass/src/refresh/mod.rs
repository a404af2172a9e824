//! Movement-gated landmark refresh.
//!
//! A new landmark list is requested whenever the device has moved at least
//! a configured distance since the last request. There is no time-based
//! debounce: a stationary device never re-queries and a fast one may query
//! on every position sample.
//!
//! Lookups run asynchronously, so responses can arrive out of order. The
//! [`ResponseSequencer`] applies last-request-wins by issuance order: a
//! response to an older request is dropped once a newer one was applied.

mod geo;
mod sequencer;
mod trigger;

pub use geo::{GeoPoint, EARTH_RADIUS_METERS};
pub use sequencer::ResponseSequencer;
pub use trigger::{
    LandmarkQuery, RefreshConfig, RefreshTrigger, RequestId, DEFAULT_MIN_DISTANCE_METERS,
};
