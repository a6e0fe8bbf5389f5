//! Release decision: next open state and momentum duration on finger-up.

use super::duration::DurationOverride;
use crate::model::{GestureOptions, MomentumCurve, PanelConfig};

/// Result of one release. Both fields empty means "leave everything as is".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReleaseOutcome {
    /// Requested open state, only set when it differs from the current one.
    pub open_request: Option<bool>,
    pub duration_override: Option<DurationOverride>,
}

/// Whether the drag travelled far enough to allow a toggle.
pub fn passes_toggle_test(cfg: &PanelConfig, displacement_px: f64) -> bool {
    if cfg.open {
        displacement_px < cfg.width - cfg.drag_toggle_distance
    } else {
        displacement_px > cfg.drag_toggle_distance
    }
}

/// Settle duration for a release at `speed` px/s, or `None` when the flick is
/// too slow to shorten the default. Faster flicks settle faster, down to
/// `min_duration`.
pub fn momentum_duration(speed: f64, curve: &MomentumCurve) -> Option<f64> {
    if !speed.is_finite() || speed <= curve.min_speed {
        return None;
    }
    let range = curve.max_speed - curve.min_speed;
    if !(range > 0.0) {
        return Some(curve.min_duration);
    }
    let adjusted = speed.min(curve.max_speed) - curve.min_speed;
    let multiplier = 1.0 - adjusted / range;
    Some(curve.min_duration.max(curve.base_duration * multiplier))
}

/// Decides what a release does. A vertical cancel, or any non-finite input,
/// decides nothing.
pub fn decide(
    cfg: &PanelConfig,
    opts: &GestureOptions,
    displacement_px: f64,
    velocity: f64,
    was_vertical_cancel: bool,
    now_ms: f64,
) -> ReleaseOutcome {
    if was_vertical_cancel {
        return ReleaseOutcome::default();
    }
    if !cfg.is_valid() || !displacement_px.is_finite() || !velocity.is_finite() {
        log::debug!("release ignored: unusable input (cfg={cfg:?}, px={displacement_px}, v={velocity})");
        return ReleaseOutcome::default();
    }
    if !passes_toggle_test(cfg, displacement_px) {
        return ReleaseOutcome::default();
    }

    if !opts.enable_momentum {
        return ReleaseOutcome {
            open_request: Some(!cfg.open),
            duration_override: None,
        };
    }

    let desired = if cfg.pull_right {
        velocity < 0.0
    } else {
        velocity > 0.0
    };
    let open_request = (desired != cfg.open).then_some(desired);

    let duration_override =
        momentum_duration(velocity.abs(), &opts.momentum).map(|duration_secs| DurationOverride {
            duration_secs,
            expiry_ms: now_ms + duration_secs * 1000.0,
        });

    ReleaseOutcome {
        open_request,
        duration_override,
    }
}
