//! Permission and device availability gate.
//!
//! The compass needs the camera, a physical device with real sensors,
//! location, and orientation sensors. Until every one of those is granted the
//! session does not run heading, bucketing or projection and instead shows a
//! single reason.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CompassError, CompassResult};

/// Availability of a single capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Granted,
    Denied,
    /// Not yet answered. Blocks like `Denied`.
    #[default]
    Undetermined,
}

impl Availability {
    pub fn is_granted(self) -> bool {
        self == Availability::Granted
    }
}

impl From<bool> for Availability {
    fn from(granted: bool) -> Self {
        if granted {
            Availability::Granted
        } else {
            Availability::Denied
        }
    }
}

/// Capability that can block the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    Camera,
    /// Running on an emulator without real sensors.
    Device,
    Location,
    Orientation,
}

impl PermissionKind {
    /// User-visible reason shown while this capability blocks.
    pub fn message(self) -> &'static str {
        match self {
            PermissionKind::Camera => "Permission to access camera was denied",
            PermissionKind::Device => "This won't work on an emulator. Try it on your device!",
            PermissionKind::Location => "Permission to access location was denied",
            PermissionKind::Orientation => "Permission to access orientation sensors was denied",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionKind::Camera => "camera",
            PermissionKind::Device => "device",
            PermissionKind::Location => "location",
            PermissionKind::Orientation => "orientation",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot of every availability signal the session depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionState {
    #[serde(default)]
    pub camera: Availability,
    #[serde(default)]
    pub location: Availability,
    #[serde(default)]
    pub orientation: Availability,
    /// True when running on an emulator.
    #[serde(default)]
    pub emulated_device: bool,
}

impl PermissionState {
    /// All capabilities granted on a physical device.
    pub fn granted() -> Self {
        Self {
            camera: Availability::Granted,
            location: Availability::Granted,
            orientation: Availability::Granted,
            emulated_device: false,
        }
    }

    pub fn with_camera(mut self, availability: Availability) -> Self {
        self.camera = availability;
        self
    }

    pub fn with_location(mut self, availability: Availability) -> Self {
        self.location = availability;
        self
    }

    pub fn with_orientation(mut self, availability: Availability) -> Self {
        self.orientation = availability;
        self
    }

    pub fn with_emulated_device(mut self, emulated: bool) -> Self {
        self.emulated_device = emulated;
        self
    }

    /// First blocking capability, checked camera, device, location, orientation.
    pub fn blocking(&self) -> Option<PermissionKind> {
        if !self.camera.is_granted() {
            Some(PermissionKind::Camera)
        } else if self.emulated_device {
            Some(PermissionKind::Device)
        } else if !self.location.is_granted() {
            Some(PermissionKind::Location)
        } else if !self.orientation.is_granted() {
            Some(PermissionKind::Orientation)
        } else {
            None
        }
    }

    /// Ok when the pipeline may run, otherwise the first blocking reason.
    pub fn check(&self) -> CompassResult<()> {
        match self.blocking() {
            Some(kind) => Err(CompassError::PermissionDenied(kind)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_granted_passes() {
        assert!(PermissionState::granted().check().is_ok());
    }

    #[test]
    fn test_default_is_undetermined_and_blocks() {
        let state = PermissionState::default();
        assert_eq!(state.camera, Availability::Undetermined);
        assert_eq!(state.blocking(), Some(PermissionKind::Camera));
    }

    #[test]
    fn test_camera_checked_first() {
        let state = PermissionState::default()
            .with_camera(Availability::Denied)
            .with_location(Availability::Denied);
        let err = state.check().unwrap_err();
        assert_eq!(err.to_string(), "Permission to access camera was denied");
    }

    #[test]
    fn test_emulator_blocks_before_location() {
        let state = PermissionState::granted()
            .with_emulated_device(true)
            .with_location(Availability::Denied);
        assert_eq!(state.blocking(), Some(PermissionKind::Device));
    }

    #[test]
    fn test_location_then_orientation() {
        let state = PermissionState::granted()
            .with_location(Availability::Undetermined)
            .with_orientation(Availability::Denied);
        assert_eq!(state.blocking(), Some(PermissionKind::Location));

        let state = state.with_location(Availability::Granted);
        assert_eq!(state.blocking(), Some(PermissionKind::Orientation));
        assert!(state.check().unwrap_err().halts_pipeline());
    }

    #[test]
    fn test_deserialize_partial_state() {
        let state: PermissionState =
            serde_json::from_str(r#"{"camera": "granted", "location": "denied"}"#).unwrap();
        assert_eq!(state.camera, Availability::Granted);
        assert_eq!(state.location, Availability::Denied);
        assert_eq!(state.orientation, Availability::Undetermined);
        assert!(!state.emulated_device);
    }

    #[test]
    fn test_availability_from_bool() {
        assert_eq!(Availability::from(true), Availability::Granted);
        assert_eq!(Availability::from(false), Availability::Denied);
    }
}
