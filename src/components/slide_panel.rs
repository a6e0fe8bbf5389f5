use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, TouchEvent};
use yew::prelude::*;

use crate::model::{ContactId, DEFAULT_DURATION_SECS, GestureOptions, PanelConfig};
use crate::state::{GestureEffect, GestureTracker};
use crate::util::{clog, viewport_width};

#[derive(Properties, PartialEq, Clone)]
pub struct SlidePanelProps {
    pub open: bool,
    #[prop_or_default]
    pub on_set_open: Callback<bool>,
    /// Panel content.
    pub sidebar: Html,
    /// Main content behind the panel.
    #[prop_or_default]
    pub children: Html,
    #[prop_or(300.0)]
    pub width: f64,
    /// Keep the panel permanently visible next to the content.
    #[prop_or_default]
    pub docked: bool,
    #[prop_or(true)]
    pub transitions: bool,
    /// Enable touch dragging (only takes effect on touch-capable browsers).
    #[prop_or(true)]
    pub touch: bool,
    /// Width of the edge strip that can start a drag while closed.
    #[prop_or(20.0)]
    pub touch_handle_width: f64,
    #[prop_or_default]
    pub pull_right: bool,
    #[prop_or(true)]
    pub shadow: bool,
    #[prop_or(30.0)]
    pub drag_toggle_distance: f64,
    #[prop_or_default]
    pub options: GestureOptions,
}

// Latest props as seen by the window listeners
#[derive(Clone, Default)]
struct HostInputs {
    width: f64,
    pull_right: bool,
    drag_toggle_distance: f64,
    open: bool,
    touch_enabled: bool,
    touch_handle_width: f64,
    on_set_open: Callback<bool>,
}

impl HostInputs {
    fn config(&self, viewport_width: f64) -> PanelConfig {
        PanelConfig {
            width: self.width,
            pull_right: self.pull_right,
            drag_toggle_distance: self.drag_toggle_distance,
            open: self.open,
            viewport_width,
        }
    }

    /// A closed panel can only be grabbed by its edge strip.
    fn accepts_start(&self, x: f64, viewport_width: f64) -> bool {
        if self.open {
            return true;
        }
        if self.pull_right {
            x >= viewport_width - self.touch_handle_width
        } else {
            x <= self.touch_handle_width
        }
    }
}

type Tracker = Rc<RefCell<GestureTracker>>;

// Forwards effects to the host; borrows must be released before calling.
fn dispatch(effects: &[GestureEffect], ev: &TouchEvent, on_set_open: &Callback<bool>, redraw: &UseForceUpdateHandle) {
    let mut dirty = false;
    for effect in effects {
        match *effect {
            GestureEffect::SuppressDefault => ev.prevent_default(),
            GestureEffect::DisplacementChanged(_) | GestureEffect::Released { .. } => dirty = true,
            GestureEffect::OpenStateChangeRequested(open) => {
                clog(&format!("panel: request open={open}"));
                on_set_open.emit(open);
            }
            GestureEffect::DurationOverride(o) => {
                clog(&format!("panel: settle in {:.3}s", o.duration_secs));
            }
        }
    }
    if dirty {
        redraw.force_update();
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Release {
    End,
    Cancel,
}

fn release_handler(
    kind: Release,
    tracker: Tracker,
    inputs: Rc<RefCell<HostInputs>>,
    redraw: UseForceUpdateHandle,
) -> Closure<dyn FnMut(TouchEvent)> {
    Closure::wrap(Box::new(move |e: TouchEvent| {
        let (effects, on_set_open) = {
            let host = inputs.borrow();
            let cfg = host.config(viewport_width());
            let mut t = tracker.borrow_mut();
            let changed = e.changed_touches();
            let mut effects = Vec::new();
            for i in 0..changed.length() {
                if let Some(touch) = changed.item(i) {
                    let id = ContactId(touch.identifier());
                    effects.extend(match kind {
                        Release::End => t.on_contact_end(&cfg, id),
                        Release::Cancel => t.on_contact_cancel(&cfg, id),
                    });
                }
            }
            (effects, host.on_set_open.clone())
        };
        dispatch(&effects, &e, &on_set_open, &redraw);
    }) as Box<dyn FnMut(_)>)
}

#[function_component(SlidePanel)]
pub fn slide_panel(props: &SlidePanelProps) -> Html {
    let tracker: Tracker = use_mut_ref(GestureTracker::default);
    let inputs = use_mut_ref(HostInputs::default);
    let drag_supported = use_state(|| false);
    let redraw = use_force_update();

    {
        let mut host = inputs.borrow_mut();
        *host = HostInputs {
            width: props.width,
            pull_right: props.pull_right,
            drag_toggle_distance: props.drag_toggle_distance,
            open: props.open,
            touch_enabled: props.touch && *drag_supported,
            touch_handle_width: props.touch_handle_width,
            on_set_open: props.on_set_open.clone(),
        };
    }
    {
        let mut t = tracker.borrow_mut();
        if *t.options() != props.options {
            t.set_options(props.options);
        }
    }

    // Touch support detection
    {
        let drag_supported = drag_supported.clone();
        use_effect_with((), move |_| {
            if let Some(win) = web_sys::window() {
                let has_touch = js_sys::Reflect::has(&win, &JsValue::from_str("ontouchstart")).unwrap_or(false);
                drag_supported.set(has_touch);
            }
            || ()
        });
    }

    // Touch listeners live on the window so a drag survives leaving the panel
    {
        let tracker = tracker.clone();
        let inputs = inputs.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();

            let touch_start_cb = {
                let tracker = tracker.clone();
                let inputs = inputs.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    {
                        let host = inputs.borrow();
                        if !host.touch_enabled {
                            return;
                        }
                        let Some(t0) = e.changed_touches().item(0) else {
                            return;
                        };
                        let vw = viewport_width();
                        let x = t0.client_x() as f64;
                        let y = t0.client_y() as f64;
                        if !host.accepts_start(x, vw) {
                            return;
                        }
                        // extra fingers are ignored by the tracker
                        tracker
                            .borrow_mut()
                            .on_contact_start(&host.config(vw), ContactId(t0.identifier()), x, y);
                    }
                    redraw.force_update();
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let tracker = tracker.clone();
                let inputs = inputs.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let (effects, on_set_open) = {
                        let host = inputs.borrow();
                        let mut t = tracker.borrow_mut();
                        let Some(tracked) = t.contact().map(|c| c.id) else {
                            return;
                        };
                        let touches = e.changed_touches();
                        let mut effects = Vec::new();
                        for i in 0..touches.length() {
                            if let Some(touch) = touches.item(i) {
                                if ContactId(touch.identifier()) != tracked {
                                    continue;
                                }
                                let cfg = host.config(viewport_width());
                                effects = t.on_contact_move(
                                    &cfg,
                                    tracked,
                                    touch.client_x() as f64,
                                    touch.client_y() as f64,
                                );
                                break;
                            }
                        }
                        (effects, host.on_set_open.clone())
                    };
                    dispatch(&effects, &e, &on_set_open, &redraw);
                }) as Box<dyn FnMut(_)>)
            };
            let touch_end_cb = release_handler(Release::End, tracker.clone(), inputs.clone(), redraw.clone());
            let touch_cancel_cb = release_handler(Release::Cancel, tracker.clone(), inputs.clone(), redraw.clone());

            // touchmove must be non-passive for preventDefault to stop scrolling
            if let Some(win) = &window {
                let non_passive = AddEventListenerOptions::new();
                non_passive.set_passive(false);
                win.add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                    .ok();
                if win
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        "touchmove",
                        touch_move_cb.as_ref().unchecked_ref(),
                        &non_passive,
                    )
                    .is_err()
                {
                    log::warn!("panel: could not register touchmove listener");
                }
                win.add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                    .ok();
                win.add_event_listener_with_callback("touchcancel", touch_cancel_cb.as_ref().unchecked_ref())
                    .ok();
            } else {
                log::warn!("panel: no window, touch dragging disabled");
            }

            // Cleanup
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "touchstart",
                        touch_start_cb.as_ref().unchecked_ref(),
                    );
                    let _ = win.remove_event_listener_with_callback(
                        "touchmove",
                        touch_move_cb.as_ref().unchecked_ref(),
                    );
                    let _ = win.remove_event_listener_with_callback(
                        "touchend",
                        touch_end_cb.as_ref().unchecked_ref(),
                    );
                    let _ = win.remove_event_listener_with_callback(
                        "touchcancel",
                        touch_cancel_cb.as_ref().unchecked_ref(),
                    );
                }
                let _keep_alive = (&touch_start_cb, &touch_move_cb, &touch_end_cb, &touch_cancel_cb);
            }
        });
    }

    let overlay_click = {
        let cb = props.on_set_open.clone();
        let open = props.open;
        Callback::from(move |_: MouseEvent| {
            if open {
                cb.emit(false);
            }
        })
    };

    let (fraction, locked, duration) = {
        let t = tracker.borrow();
        let cfg = inputs.borrow().config(viewport_width());
        (
            t.open_fraction(&cfg),
            t.should_suppress_default(),
            t.current_duration(DEFAULT_DURATION_SECS),
        )
    };

    let side = if props.pull_right { "right:0;" } else { "left:0;" };
    let hidden_transform = if props.pull_right {
        "translate3d(100%, 0, 0)"
    } else {
        "translate3d(-100%, 0, 0)"
    };
    let (transform, panel_visible, overlay_opacity, overlay_visible) = if let Some(f) = fraction {
        // slide to the dragged position and fade the overlay with it
        let pct = (1.0 - f) * 100.0;
        let t = if props.pull_right {
            format!("translate3d({pct}%, 0, 0)")
        } else {
            format!("translate3d(-{pct}%, 0, 0)")
        };
        (t, true, f, true)
    } else if props.docked && props.width != 0.0 {
        ("translate3d(0%, 0, 0)".to_string(), true, 0.0, false)
    } else if props.open {
        ("translate3d(0%, 0, 0)".to_string(), true, 1.0, true)
    } else {
        (hidden_transform.to_string(), false, 0.0, false)
    };

    let panel_transition = if fraction.is_some() || !props.transitions {
        "transition:none;".to_string()
    } else {
        format!("transition:transform {duration}s ease-out, visibility {duration}s ease-out;")
    };
    let overlay_transition = if fraction.is_some() || !props.transitions {
        "transition:none;".to_string()
    } else {
        format!("transition:opacity {duration}s ease-out, visibility {duration}s ease-out;")
    };
    let shadow = match (props.shadow, props.pull_right) {
        (false, _) => "",
        (true, true) => "box-shadow:-4px 0px 24px rgba(0,0,0,0.16);",
        (true, false) => "box-shadow:4px 0px 24px rgba(0,0,0,0.16);",
    };
    let visibility = |v: bool| if v { "visible" } else { "hidden" };
    let overlay_pointer = if !props.open && !locked { "pointer-events:none;" } else { "" };
    let content_inset = if props.docked {
        if props.pull_right {
            format!("left:0; right:{}px;", props.width)
        } else {
            format!("left:{}px; right:0;", props.width)
        }
    } else {
        "left:0; right:0;".to_string()
    };

    let panel_style = format!(
        "position:fixed; top:0; bottom:0; {side} z-index:2; width:{}px; max-width:100vw; overflow-y:auto; background:#161b22; border:1px solid #30363d; will-change:transform; transform:{transform}; visibility:{}; {panel_transition} {shadow}",
        props.width,
        visibility(panel_visible),
    );
    let overlay_style = format!(
        "position:fixed; inset:0; z-index:1; background-color:rgba(0,0,0,0.3); opacity:{overlay_opacity}; visibility:{}; {overlay_transition} {overlay_pointer}",
        visibility(overlay_visible),
    );

    html! {
        <div style="position:absolute; inset:0; overflow:hidden;">
            <div style={format!("position:absolute; top:0; bottom:0; {content_inset} overflow-y:auto;")}>
                { props.children.clone() }
            </div>
            <div style={overlay_style} role="presentation" tabindex="0" onclick={overlay_click} />
            <div style={panel_style}>
                { props.sidebar.clone() }
            </div>
        </div>
    }
}
