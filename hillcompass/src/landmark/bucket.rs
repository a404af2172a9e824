//! Nearest-per-degree bucketing.

use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;

use super::Landmark;
use crate::angle::bearing_key;

/// At most one landmark per integer bearing degree (keys 0..=359).
///
/// For every key present, no input landmark rounding to that key was
/// nearer than the retained one. The set is always rebuilt from a full
/// landmark list; it is never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BucketedLandmarkSet {
    buckets: BTreeMap<u16, Landmark>,
}

impl BucketedLandmarkSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Landmark retained for a bearing key.
    pub fn get(&self, key: u16) -> Option<&Landmark> {
        self.buckets.get(&key)
    }

    /// Number of occupied keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no landmark was retained.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate `(key, landmark)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, u16, Landmark> {
        self.buckets.iter()
    }

    /// Occupied keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u16> + '_ {
        self.buckets.keys().copied()
    }
}

impl<'a> IntoIterator for &'a BucketedLandmarkSet {
    type Item = (&'a u16, &'a Landmark);
    type IntoIter = btree_map::Iter<'a, u16, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Reduce landmarks to the nearest one per rounded bearing.
///
/// Single pass over the input. A later landmark replaces an earlier one in
/// the same bucket only when it is strictly nearer, so equal distances keep
/// the first encountered.
pub fn bucket(landmarks: &[Landmark]) -> BucketedLandmarkSet {
    let mut buckets: BTreeMap<u16, Landmark> = BTreeMap::new();

    for landmark in landmarks {
        match buckets.entry(bearing_key(landmark.bearing)) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(landmark.clone());
            }
            btree_map::Entry::Occupied(mut slot) => {
                if landmark.distance < slot.get().distance {
                    slot.insert(landmark.clone());
                }
            }
        }
    }

    BucketedLandmarkSet { buckets }
}
