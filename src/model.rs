//! Core data models for the slide-out panel.
//! Panel geometry, gesture tuning and the persisted demo settings live here.

use serde::{Deserialize, Serialize};

/// Default panel transition duration in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 0.3;

/// Distance a finger must travel before its drag intent is decided.
pub const INTENT_THRESHOLD_PX: f64 = 24.0;

/// Samples averaged for release velocity. Must be at least 2 to form a delta.
pub const SAMPLE_CAPACITY: usize = 4;

/// Opaque touch identifier, as reported by `Touch.identifier`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub i32);

/// Panel geometry and state as seen by one gesture. Read-only while tracking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Panel width in px.
    pub width: f64,
    /// Panel is anchored to the right edge.
    pub pull_right: bool,
    /// How far the panel must be dragged before a release may toggle it.
    pub drag_toggle_distance: f64,
    pub open: bool,
    /// Viewport width in px; only consulted when pulling from the right.
    pub viewport_width: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            pull_right: false,
            drag_toggle_distance: 30.0,
            open: false,
            viewport_width: 0.0,
        }
    }
}

impl PanelConfig {
    /// Usable geometry: finite positive width, plus a finite positive viewport
    /// when the panel pulls from the right.
    pub fn is_valid(&self) -> bool {
        let width_ok = self.width.is_finite() && self.width > 0.0;
        let viewport_ok =
            !self.pull_right || (self.viewport_width.is_finite() && self.viewport_width > 0.0);
        width_ok && viewport_ok
    }
}

/// Shape of the release-speed to duration curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumCurve {
    /// Duration used when the flick is just above `min_speed`.
    pub base_duration: f64,
    /// Floor for the shortened duration.
    pub min_duration: f64,
    /// Speeds at or below this (px/s) leave the default duration alone.
    pub min_speed: f64,
    /// Speeds above this (px/s) are treated as this.
    pub max_speed: f64,
}

impl Default for MomentumCurve {
    fn default() -> Self {
        Self {
            base_duration: DEFAULT_DURATION_SECS,
            min_duration: 0.1,
            min_speed: 500.0,
            max_speed: 2000.0,
        }
    }
}

/// Gesture tuning that is independent of panel geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureOptions {
    pub intent_threshold: f64,
    pub sample_capacity: usize,
    /// Release velocity picks the next state and may shorten the settle animation.
    /// When off, crossing the toggle distance simply flips the panel.
    pub enable_momentum: bool,
    /// Lock horizontal drags and cancel vertical ones.
    pub enable_axis_lock: bool,
    pub momentum: MomentumCurve,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            intent_threshold: INTENT_THRESHOLD_PX,
            sample_capacity: SAMPLE_CAPACITY,
            enable_momentum: true,
            enable_axis_lock: true,
            momentum: MomentumCurve::default(),
        }
    }
}

/// Demo settings persisted to localStorage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub pull_right: bool,
    pub docked: bool,
    pub transitions: bool,
    pub shadow: bool,
    pub enable_momentum: bool,
    pub enable_axis_lock: bool,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            pull_right: false,
            docked: false,
            transitions: true,
            shadow: true,
            enable_momentum: true,
            enable_axis_lock: true,
        }
    }
}

impl PanelSettings {
    pub fn gesture_options(&self) -> GestureOptions {
        GestureOptions {
            enable_momentum: self.enable_momentum,
            enable_axis_lock: self.enable_axis_lock,
            ..Default::default()
        }
    }
}
