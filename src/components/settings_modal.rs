use yew::prelude::*;

use crate::model::PanelSettings;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: PanelSettings,
    pub on_change: Callback<PanelSettings>,
    pub on_close: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Restore the default panel settings?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };
    // One checkbox per flag; each flips a copy of the current settings
    let toggle = |label: &'static str, checked: bool, flip: fn(&mut PanelSettings)| {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        let onclick = Callback::from(move |_| {
            let mut next = current.clone();
            flip(&mut next);
            cb.emit(next);
        });
        html! {
            <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                <input type="checkbox" checked={checked} onclick={onclick} />
                <span>{label}</span>
            </label>
        }
    };
    let s = &props.settings;

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:2000;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Panel Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                { toggle("Pull from right", s.pull_right, |s: &mut PanelSettings| s.pull_right = !s.pull_right) }
                { toggle("Docked", s.docked, |s: &mut PanelSettings| s.docked = !s.docked) }
                { toggle("Transitions", s.transitions, |s: &mut PanelSettings| s.transitions = !s.transitions) }
                { toggle("Shadow", s.shadow, |s: &mut PanelSettings| s.shadow = !s.shadow) }
                { toggle("Momentum on release", s.enable_momentum, |s: &mut PanelSettings| s.enable_momentum = !s.enable_momentum) }
                { toggle("Lock horizontal drags", s.enable_axis_lock, |s: &mut PanelSettings| s.enable_axis_lock = !s.enable_axis_lock) }
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Reset to Defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Settings are saved in this browser."}</div>
        </div>
    </div>}
}
