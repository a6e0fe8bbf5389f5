//! Touch-driven slide-out panel for yew.
//!
//! `state` holds the gesture core: contact tracking, drag intent, open
//! fraction, release velocity and the momentum duration override. It has no
//! browser dependency beyond the default clock. `components` binds it to a
//! yew `SlidePanel` and a small demo app.

pub mod components;
pub mod model;
pub mod state;
pub mod util;
