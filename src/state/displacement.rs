//! How far open the panel appears for the current touch.
//!
//! A drag that starts inside an already open panel only moves it by the
//! finger's relative travel, so the panel never jumps to the finger. A drag
//! from the edge of a closed panel tracks the finger position directly.

use crate::model::PanelConfig;

/// Visible panel width in px for a drag from `start_x` to `current_x`,
/// clamped to `[0, width]`. Returns 0.0 for unusable geometry.
pub fn displacement_px(cfg: &PanelConfig, start_x: f64, current_x: f64) -> f64 {
    if !cfg.is_valid() || !start_x.is_finite() || !current_x.is_finite() {
        return 0.0;
    }
    let width = cfg.width;

    let px = if cfg.pull_right {
        let viewport = cfg.viewport_width;
        if cfg.open && viewport - start_x < width {
            if current_x > start_x {
                width + start_x - current_x
            } else {
                width
            }
        } else {
            (viewport - current_x).min(width)
        }
    } else if cfg.open && start_x < width {
        if current_x > start_x {
            width
        } else {
            width - start_x + current_x
        }
    } else {
        current_x.min(width)
    };

    if px.is_finite() { px.clamp(0.0, width) } else { 0.0 }
}

/// Normalized open fraction: 0.0 closed, 1.0 fully open.
pub fn open_fraction(cfg: &PanelConfig, start_x: f64, current_x: f64) -> f64 {
    if !cfg.is_valid() {
        return 0.0;
    }
    (displacement_px(cfg, start_x, current_x) / cfg.width).clamp(0.0, 1.0)
}
