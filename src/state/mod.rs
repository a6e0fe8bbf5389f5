pub mod clock;
pub mod displacement;
pub mod duration;
pub mod release;
pub mod samples;
pub mod touch;
pub mod velocity;

pub use clock::{Clock, ManualClock, SystemClock};
pub use displacement::{displacement_px, open_fraction};
pub use duration::{AnimationDurationController, DurationOverride};
pub use release::{ReleaseOutcome, decide, momentum_duration};
pub use samples::SampleBuffer;
pub use touch::{Contact, ContactEvent, GestureEffect, GestureState, GestureTracker};
pub use velocity::velocity;
