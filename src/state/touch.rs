//! Single-finger drag tracking for the slide-out panel.
//!
//! `GestureState` is a plain value with a pure `transition`; `GestureTracker`
//! is the host-owned wrapper that stamps events with the clock and keeps the
//! animation duration override current.

use super::clock::{Clock, SystemClock};
use super::displacement::{displacement_px, open_fraction};
use super::duration::{AnimationDurationController, DurationOverride};
use super::release::decide;
use super::samples::SampleBuffer;
use super::velocity::velocity;
use crate::model::{ContactId, GestureOptions, PanelConfig};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactEvent {
    Start { id: ContactId, x: f64, y: f64 },
    Move { id: ContactId, x: f64, y: f64 },
    End { id: ContactId },
    Cancel { id: ContactId },
}

/// Observable results of handling one event, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEffect {
    /// Live open fraction after a processed move.
    DisplacementChanged(f64),
    /// The drag is locked; the host should prevent native scrolling.
    SuppressDefault,
    /// Tracking stopped. Emitted before any decision effects.
    Released { vertical_cancel: bool },
    OpenStateChangeRequested(bool),
    DurationOverride(DurationOverride),
}

/// Inputs shared by every transition.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub config: &'a PanelConfig,
    pub options: &'a GestureOptions,
    pub now_ms: f64,
}

/// The tracked finger.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub start_x: f64,
    pub start_y: f64,
    pub current_x: f64,
    pub current_y: f64,
    /// Horizontal drag intent has been confirmed.
    pub drag_locked: bool,
    samples: SampleBuffer,
}

impl Contact {
    fn begin(id: ContactId, x: f64, y: f64, ctx: &StepContext) -> Self {
        let mut samples = SampleBuffer::new(ctx.options.sample_capacity);
        samples.reset_with(x, ctx.now_ms);
        Self {
            id,
            start_x: x,
            start_y: y,
            current_x: x,
            current_y: y,
            drag_locked: false,
            samples,
        }
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn open_fraction(&self, cfg: &PanelConfig) -> f64 {
        open_fraction(cfg, self.start_x, self.current_x)
    }

    fn moved(mut self, x: f64, y: f64, ctx: &StepContext) -> (GestureState, Vec<GestureEffect>) {
        self.samples.push(x, ctx.now_ms);
        let delta_x = (x - self.start_x).abs();
        let delta_y = (y - self.start_y).abs();
        let threshold = ctx.options.intent_threshold;

        if ctx.options.enable_axis_lock && !self.drag_locked {
            if delta_x >= threshold && delta_x >= delta_y {
                log::debug!("contact {:?}: drag locked (dx={delta_x}, dy={delta_y})", self.id);
                self.drag_locked = true;
            } else if delta_y >= threshold {
                log::debug!("contact {:?}: vertical intent, cancelling drag", self.id);
                return (GestureState::Idle, self.release(true, ctx));
            }
        }

        let mut effects = Vec::with_capacity(2);
        if self.drag_locked {
            effects.push(GestureEffect::SuppressDefault);
        }
        self.current_x = x;
        self.current_y = y;
        effects.push(GestureEffect::DisplacementChanged(self.open_fraction(ctx.config)));
        (GestureState::Tracking(self), effects)
    }

    fn release(self, vertical_cancel: bool, ctx: &StepContext) -> Vec<GestureEffect> {
        let px = displacement_px(ctx.config, self.start_x, self.current_x);
        let v = velocity(&self.samples);
        let outcome = decide(ctx.config, ctx.options, px, v, vertical_cancel, ctx.now_ms);
        log::debug!(
            "contact {:?} released: px={px:.1} v={v:.1} vertical_cancel={vertical_cancel} -> {outcome:?}",
            self.id
        );

        let mut effects = vec![GestureEffect::Released { vertical_cancel }];
        if let Some(open) = outcome.open_request {
            effects.push(GestureEffect::OpenStateChangeRequested(open));
        }
        if let Some(o) = outcome.duration_override {
            effects.push(GestureEffect::DurationOverride(o));
        }
        effects
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Tracking(Contact),
}

impl GestureState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, GestureState::Tracking(_))
    }

    pub fn contact(&self) -> Option<&Contact> {
        match self {
            GestureState::Tracking(c) => Some(c),
            GestureState::Idle => None,
        }
    }

    pub fn transition(self, event: ContactEvent, ctx: &StepContext) -> (Self, Vec<GestureEffect>) {
        use ContactEvent::*;
        match (self, event) {
            (GestureState::Idle, Start { id, x, y }) if x.is_finite() && y.is_finite() => {
                log::trace!("contact {id:?}: tracking from ({x}, {y})");
                (GestureState::Tracking(Contact::begin(id, x, y, ctx)), Vec::new())
            }
            (GestureState::Tracking(c), Move { id, x, y })
                if c.id == id && x.is_finite() && y.is_finite() =>
            {
                c.moved(x, y, ctx)
            }
            (GestureState::Tracking(c), End { id } | Cancel { id }) if c.id == id => {
                (GestureState::Idle, c.release(false, ctx))
            }
            (state, event) => {
                log::trace!("ignored {event:?} (tracking={})", state.is_tracking());
                (state, Vec::new())
            }
        }
    }
}

/// Owns the gesture state for one panel.
pub struct GestureTracker<C: Clock = SystemClock> {
    state: GestureState,
    options: GestureOptions,
    clock: C,
    durations: AnimationDurationController,
}

impl Default for GestureTracker<SystemClock> {
    fn default() -> Self {
        Self::new(GestureOptions::default(), SystemClock)
    }
}

impl<C: Clock> GestureTracker<C> {
    pub fn new(options: GestureOptions, clock: C) -> Self {
        Self {
            state: GestureState::Idle,
            options,
            clock,
            durations: AnimationDurationController::default(),
        }
    }

    pub fn options(&self) -> &GestureOptions {
        &self.options
    }

    /// New options apply from the next contact on.
    pub fn set_options(&mut self, options: GestureOptions) {
        self.options = options;
    }

    pub fn on_contact_start(&mut self, cfg: &PanelConfig, id: ContactId, x: f64, y: f64) -> Vec<GestureEffect> {
        self.handle(cfg, ContactEvent::Start { id, x, y })
    }

    pub fn on_contact_move(&mut self, cfg: &PanelConfig, id: ContactId, x: f64, y: f64) -> Vec<GestureEffect> {
        self.handle(cfg, ContactEvent::Move { id, x, y })
    }

    pub fn on_contact_end(&mut self, cfg: &PanelConfig, id: ContactId) -> Vec<GestureEffect> {
        self.handle(cfg, ContactEvent::End { id })
    }

    pub fn on_contact_cancel(&mut self, cfg: &PanelConfig, id: ContactId) -> Vec<GestureEffect> {
        self.handle(cfg, ContactEvent::Cancel { id })
    }

    pub fn handle(&mut self, cfg: &PanelConfig, event: ContactEvent) -> Vec<GestureEffect> {
        let ctx = StepContext {
            config: cfg,
            options: &self.options,
            now_ms: self.clock.now_ms(),
        };
        let state = std::mem::take(&mut self.state);
        let (next, effects) = state.transition(event, &ctx);
        self.state = next;

        for effect in &effects {
            match *effect {
                // each release starts from the default duration
                GestureEffect::Released { .. } => self.durations.clear(),
                GestureEffect::DurationOverride(o) => self.durations.set_override(o),
                _ => {}
            }
        }
        effects
    }

    pub fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    pub fn contact(&self) -> Option<&Contact> {
        self.state.contact()
    }

    pub fn should_suppress_default(&self) -> bool {
        self.contact().is_some_and(|c| c.drag_locked)
    }

    /// Live open fraction, `None` when idle.
    pub fn open_fraction(&self, cfg: &PanelConfig) -> Option<f64> {
        self.contact().map(|c| c.open_fraction(cfg))
    }

    pub fn durations(&self) -> &AnimationDurationController {
        &self.durations
    }

    /// Transition duration for the renderer at the current time.
    pub fn current_duration(&self, default_secs: f64) -> f64 {
        self.durations.current_duration(self.clock.now_ms(), default_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::clock::ManualClock;

    const FINGER: ContactId = ContactId(7);
    const OTHER: ContactId = ContactId(8);

    fn panel(open: bool) -> PanelConfig {
        PanelConfig {
            width: 300.0,
            drag_toggle_distance: 30.0,
            open,
            ..Default::default()
        }
    }

    fn tracker(clock: &ManualClock) -> GestureTracker<&ManualClock> {
        GestureTracker::new(GestureOptions::default(), clock)
    }

    fn open_requests(effects: &[GestureEffect]) -> Vec<bool> {
        effects
            .iter()
            .filter_map(|e| match e {
                GestureEffect::OpenStateChangeRequested(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    fn overrides(effects: &[GestureEffect]) -> Vec<DurationOverride> {
        effects
            .iter()
            .filter_map(|e| match e {
                GestureEffect::DurationOverride(o) => Some(*o),
                _ => None,
            })
            .collect()
    }

    /// Feeds `(x, y, dt_ms)` moves for FINGER.
    fn drag(t: &mut GestureTracker<&ManualClock>, clock: &ManualClock, cfg: &PanelConfig, path: &[(f64, f64, f64)]) {
        for &(x, y, dt) in path {
            clock.advance(dt);
            t.on_contact_move(cfg, FINGER, x, y);
        }
    }

    #[test]
    fn scenario_a_stationary_release_does_not_toggle() {
        let clock = ManualClock::new(1000.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 0.0, 200.0);
        drag(
            &mut t,
            &clock,
            &cfg,
            &[(50.0, 200.0, 16.0), (100.0, 200.0, 16.0), (100.0, 200.0, 16.0), (100.0, 200.0, 16.0), (100.0, 200.0, 16.0)],
        );
        let effects = t.on_contact_end(&cfg, FINGER);
        assert!(open_requests(&effects).is_empty());
        assert!(overrides(&effects).is_empty());
        assert!(!t.is_tracking());
    }

    #[test]
    fn scenario_b_flick_opens_with_momentum() {
        let clock = ManualClock::new(1000.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 0.0, 200.0);
        drag(&mut t, &clock, &cfg, &[(40.0, 200.0, 50.0), (80.0, 200.0, 50.0), (100.0, 200.0, 25.0)]);
        let effects = t.on_contact_end(&cfg, FINGER);

        assert_eq!(open_requests(&effects), vec![true]);
        let o = overrides(&effects);
        assert_eq!(o.len(), 1);
        assert!((o[0].duration_secs - 0.24).abs() < 1e-9);
        assert!((o[0].expiry_ms - 1365.0).abs() < 1e-6);
        assert!((t.current_duration(0.3) - 0.24).abs() < 1e-9);
        clock.advance(241.0);
        assert_eq!(t.current_duration(0.3), 0.3);
    }

    #[test]
    fn scenario_c_drag_closed_from_inside_open_panel() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(true);
        t.on_contact_start(&cfg, FINGER, 250.0, 300.0);
        drag(&mut t, &clock, &cfg, &[(200.0, 300.0, 20.0), (120.0, 302.0, 20.0), (50.0, 305.0, 20.0)]);
        assert_eq!(t.open_fraction(&cfg), Some(100.0 / 300.0));
        let effects = t.on_contact_end(&cfg, FINGER);
        assert_eq!(open_requests(&effects), vec![false]);
    }

    #[test]
    fn scenario_d_vertical_intent_cancels_without_decision() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 10.0, 100.0);
        clock.advance(10.0);
        let effects = t.on_contact_move(&cfg, FINGER, 15.0, 130.0);
        assert_eq!(effects, vec![GestureEffect::Released { vertical_cancel: true }]);
        assert!(!t.is_tracking());
        assert_eq!(t.durations().current_override(), None);
    }

    #[test]
    fn vertical_cancel_ignores_fast_horizontal_samples() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 0.0, 100.0);
        // 20px in 5ms is fast, but not far enough to lock; then the finger heads down
        drag(&mut t, &clock, &cfg, &[(20.0, 100.0, 5.0), (23.0, 140.0, 5.0)]);
        assert!(!t.is_tracking());
        let effects = t.on_contact_end(&cfg, FINGER);
        assert!(effects.is_empty());
    }

    #[test]
    fn locked_drag_suppresses_default_and_reports_fraction() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 0.0, 100.0);
        clock.advance(16.0);
        let effects = t.on_contact_move(&cfg, FINGER, 10.0, 100.0);
        assert_eq!(effects, vec![GestureEffect::DisplacementChanged(10.0 / 300.0)]);
        assert!(!t.should_suppress_default());

        clock.advance(16.0);
        let effects = t.on_contact_move(&cfg, FINGER, 60.0, 110.0);
        assert_eq!(
            effects,
            vec![GestureEffect::SuppressDefault, GestureEffect::DisplacementChanged(0.2)]
        );
        assert!(t.should_suppress_default());

        // once locked, vertical travel no longer cancels
        clock.advance(16.0);
        t.on_contact_move(&cfg, FINGER, 70.0, 200.0);
        assert!(t.is_tracking());
    }

    #[test]
    fn second_finger_is_ignored() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 5.0, 5.0);
        assert!(t.on_contact_start(&cfg, OTHER, 200.0, 5.0).is_empty());
        assert!(t.on_contact_move(&cfg, OTHER, 250.0, 5.0).is_empty());
        assert!(t.on_contact_end(&cfg, OTHER).is_empty());
        let c = t.contact().unwrap();
        assert_eq!(c.id, FINGER);
        assert_eq!(c.current_x, 5.0);
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        assert!(t.on_contact_move(&cfg, FINGER, 40.0, 0.0).is_empty());
        assert!(t.on_contact_cancel(&cfg, FINGER).is_empty());
        assert!(!t.is_tracking());
    }

    #[test]
    fn second_end_is_a_no_op() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 0.0, 0.0);
        drag(&mut t, &clock, &cfg, &[(60.0, 0.0, 20.0), (120.0, 0.0, 20.0)]);
        let first = t.on_contact_end(&cfg, FINGER);
        assert_eq!(open_requests(&first), vec![true]);
        let second = t.on_contact_end(&cfg, FINGER);
        assert!(second.is_empty());
        // the first release's override survives the ignored second end
        assert!(t.durations().current_override().is_some());
    }

    #[test]
    fn cancel_clears_like_end() {
        let clock = ManualClock::new(0.0);
        let cfg = panel(false);
        let path = [(30.0, 0.0, 10.0), (90.0, 3.0, 10.0), (140.0, 6.0, 10.0)];

        let mut ended = tracker(&clock);
        ended.on_contact_start(&cfg, FINGER, 0.0, 0.0);
        drag(&mut ended, &clock, &cfg, &path);
        let end_effects = ended.on_contact_end(&cfg, FINGER);

        clock.set(0.0);
        let mut cancelled = tracker(&clock);
        cancelled.on_contact_start(&cfg, FINGER, 0.0, 0.0);
        drag(&mut cancelled, &clock, &cfg, &path);
        let cancel_effects = cancelled.on_contact_cancel(&cfg, FINGER);

        assert_eq!(end_effects, cancel_effects);
        assert!(!cancelled.is_tracking());
        assert_eq!(cancelled.contact(), None);
    }

    #[test]
    fn new_gesture_starts_with_fresh_samples() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 0.0, 0.0);
        drag(&mut t, &clock, &cfg, &[(30.0, 0.0, 10.0), (60.0, 0.0, 10.0)]);
        t.on_contact_end(&cfg, FINGER);

        clock.advance(500.0);
        t.on_contact_start(&cfg, OTHER, 40.0, 0.0);
        let c = t.contact().unwrap();
        assert_eq!(c.samples().len(), 1);
        assert!(!c.drag_locked);
    }

    #[test]
    fn release_without_override_clears_previous_one() {
        let clock = ManualClock::new(0.0);
        let mut t = tracker(&clock);
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 0.0, 0.0);
        drag(&mut t, &clock, &cfg, &[(60.0, 0.0, 20.0), (120.0, 0.0, 20.0)]);
        t.on_contact_end(&cfg, FINGER);
        assert!(t.durations().current_override().is_some());

        // a slow, short tap still resets the override
        t.on_contact_start(&cfg, FINGER, 5.0, 0.0);
        clock.advance(50.0);
        t.on_contact_end(&cfg, FINGER);
        assert_eq!(t.durations().current_override(), None);
    }

    #[test]
    fn axis_lock_disabled_never_locks_or_cancels() {
        let clock = ManualClock::new(0.0);
        let mut t = GestureTracker::new(
            GestureOptions {
                enable_axis_lock: false,
                ..Default::default()
            },
            &clock,
        );
        let cfg = panel(false);
        t.on_contact_start(&cfg, FINGER, 0.0, 0.0);
        drag(&mut t, &clock, &cfg, &[(10.0, 80.0, 10.0), (100.0, 90.0, 10.0)]);
        assert!(t.is_tracking());
        assert!(!t.should_suppress_default());
    }

    #[test]
    fn pure_transition_from_idle() {
        let cfg = panel(false);
        let opts = GestureOptions::default();
        let ctx = StepContext {
            config: &cfg,
            options: &opts,
            now_ms: 42.0,
        };
        let (state, effects) = GestureState::Idle.transition(
            ContactEvent::Start {
                id: FINGER,
                x: 3.0,
                y: 4.0,
            },
            &ctx,
        );
        assert!(effects.is_empty());
        let c = state.contact().unwrap();
        assert_eq!((c.start_x, c.start_y), (3.0, 4.0));
        assert_eq!(c.samples().iter().next().map(|s| s.time_ms), Some(42.0));

        let (state, _) = state.transition(
            ContactEvent::Start {
                id: FINGER,
                x: f64::NAN,
                y: 0.0,
            },
            &ctx,
        );
        assert!(state.is_tracking());
    }
}
