// Browser helpers shared by the components
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn clog(msg: &str) {
    log::debug!("{msg}");
}

/// Routes `log` output to the browser console and panics to `console.error`.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

/// Current viewport width in px, 0.0 when it cannot be read.
pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|win| win.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let win = web_sys::window()?;
    let store = win.local_storage().ok()??;
    let raw = store.get_item(key).ok()??;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring unreadable {key}: {e}");
            None
        }
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            match serde_json::to_string(value) {
                Ok(s) => {
                    if store.set_item(key, &s).is_err() {
                        log::warn!("could not persist {key}");
                    }
                }
                Err(e) => log::warn!("could not serialize {key}: {e}"),
            }
        }
    }
}

pub fn remove_key(key: &str) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            let _ = store.remove_item(key);
        }
    }
}
