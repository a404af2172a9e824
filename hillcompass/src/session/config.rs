//! Session configuration.

use crate::heading::HeadingConfig;
use crate::overlay::DialLayout;
use crate::permission::PermissionState;
use crate::refresh::RefreshConfig;

/// Default capacity of the sensor event channel.
pub const DEFAULT_EVENT_BUFFER: usize = 256;

/// Default capacity of the control channel.
pub const DEFAULT_CONTROL_BUFFER: usize = 16;

/// Everything a [`CompassSession`](super::CompassSession) needs besides its
/// collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Heading derivation settings.
    pub heading: HeadingConfig,

    /// Movement gate for landmark queries.
    pub refresh: RefreshConfig,

    /// Dial geometry for marker placement.
    pub layout: DialLayout,

    /// Permission state assumed at start.
    ///
    /// Defaults to everything undetermined, so the session stays blocked
    /// until the host reports real availability.
    pub initial_permissions: PermissionState,

    /// Sensor event channel capacity.
    pub event_buffer: usize,

    /// Control channel capacity.
    pub control_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heading: HeadingConfig::default(),
            refresh: RefreshConfig::default(),
            layout: DialLayout::default(),
            initial_permissions: PermissionState::default(),
            event_buffer: DEFAULT_EVENT_BUFFER,
            control_buffer: DEFAULT_CONTROL_BUFFER,
        }
    }
}

impl SessionConfig {
    pub fn with_heading(mut self, heading: HeadingConfig) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_refresh(mut self, refresh: RefreshConfig) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_layout(mut self, layout: DialLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionState) -> Self {
        self.initial_permissions = permissions;
        self
    }

    /// Set the sensor event channel capacity (minimum 1).
    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }
}
