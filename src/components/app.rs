use super::{settings_modal::SettingsModal, slide_panel::SlidePanel};
use crate::model::PanelSettings;
use crate::util::{load_json, remove_key, save_json};
use yew::prelude::*;

const SETTINGS_KEY: &str = "sp_panel_settings";

#[function_component(App)]
pub fn app() -> Html {
    let open = use_state(|| false);
    let show_settings = use_state(|| false);
    let settings = use_state(|| load_json::<PanelSettings>(SETTINGS_KEY).unwrap_or_default());

    // Persist settings changes
    use_effect_with((*settings).clone(), |s| {
        save_json(SETTINGS_KEY, s);
        || ()
    });

    let on_set_open = {
        let open = open.clone();
        Callback::from(move |v: bool| open.set(v))
    };
    let toggle_open = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };
    let open_settings = {
        let show = show_settings.clone();
        let open = open.clone();
        Callback::from(move |_| {
            open.set(false);
            show.set(true);
        })
    };
    let close_settings = {
        let show = show_settings.clone();
        Callback::from(move |_| show.set(false))
    };
    let on_change = {
        let settings = settings.clone();
        Callback::from(move |s: PanelSettings| settings.set(s))
    };
    let on_reset = {
        let settings = settings.clone();
        Callback::from(move |_| {
            remove_key(SETTINGS_KEY);
            settings.set(PanelSettings::default());
        })
    };

    let s = (*settings).clone();
    let sidebar = html! {
        <div style="padding:16px; display:flex; flex-direction:column; gap:10px;">
            <h2 style="margin:0 0 8px 0; font-size:20px; color:#58a6ff;">{"Menu"}</h2>
            <button onclick={toggle_open.clone()}>{"Close"}</button>
            <button onclick={open_settings.clone()}>{"Settings"}</button>
            <p style="font-size:12px; opacity:0.7;">{"Drag the panel back toward its edge, or tap outside it, to close."}</p>
        </div>
    };
    let edge = if s.pull_right { "right" } else { "left" };

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
            <SlidePanel
                open={*open}
                on_set_open={on_set_open}
                sidebar={sidebar}
                docked={s.docked}
                transitions={s.transitions}
                pull_right={s.pull_right}
                shadow={s.shadow}
                options={s.gesture_options()}
            >
                <div style="padding:12px;">
                    <div style="display:flex; gap:8px; align-items:center; margin-bottom:12px;">
                        <button onclick={toggle_open}>{"☰"}</button>
                        <button onclick={open_settings}>{"Settings"}</button>
                    </div>
                    <p style="opacity:0.85;">{ format!("Swipe in from the {edge} edge to open the panel. Scroll vertically to check that scrolling still works.") }</p>
                    { for (1..=60).map(|i| html! { <p style="margin:6px 0; padding:10px; background:#161b22; border:1px solid #30363d; border-radius:6px;">{ format!("Row {i}") }</p> }) }
                </div>
            </SlidePanel>
            <SettingsModal
                show={*show_settings}
                settings={s.clone()}
                on_change={on_change}
                on_close={close_settings}
                on_reset={on_reset}
            />
        </div>
    }
}
