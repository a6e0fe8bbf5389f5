// Transient animation duration override set by a fast release
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationOverride {
    pub duration_secs: f64,
    /// Epoch ms at which the override stops applying.
    pub expiry_ms: f64,
}

impl DurationOverride {
    pub fn is_active(&self, now_ms: f64) -> bool {
        now_ms < self.expiry_ms
    }
}

/// Holds at most one override. A newer release replaces it outright.
#[derive(Default, Debug, Clone)]
pub struct AnimationDurationController {
    current: Option<DurationOverride>,
}

impl AnimationDurationController {
    pub fn set_override(&mut self, value: DurationOverride) {
        self.current = Some(value);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current_override(&self) -> Option<DurationOverride> {
        self.current
    }

    /// Duration the renderer should use right now.
    pub fn current_duration(&self, now_ms: f64, default_secs: f64) -> f64 {
        match self.current {
            Some(o) if o.is_active(now_ms) => o.duration_secs,
            _ => default_secs,
        }
    }
}
