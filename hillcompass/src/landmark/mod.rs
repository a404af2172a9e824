//! Landmarks and bearing bucketing.
//!
//! The lookup service returns every hill within range, often several along
//! nearly the same line of sight. Drawing all of them stacks markers on top
//! of each other, so the list is reduced to the nearest landmark per integer
//! bearing degree before projection.
//!
//! # Example
//!
//! ```
//! use hillcompass::landmark::{bucket, Landmark};
//!
//! let hills = vec![
//!     Landmark::new("Far Top", 500.0, 95.0),
//!     Landmark::new("Near Knott", 50.0, 95.4),
//! ];
//!
//! let set = bucket(&hills);
//! assert_eq!(set.len(), 1);
//! assert_eq!(set.get(95).unwrap().name, "Near Knott");
//! ```

mod bucket;
mod types;

pub use bucket::{bucket, BucketedLandmarkSet};
pub use types::{InvalidLandmark, Landmark};
