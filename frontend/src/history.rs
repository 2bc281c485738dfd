//! Browser-history trap for the guarded workflow views.
//!
//! Arming the guard pushes a sentinel history entry so one back-press lands
//! on `popstate` instead of leaving the page. With confirmation required
//! (processing view) the user is asked before leaving; declining re-pushes
//! the sentinel so the trap stays armed. Without confirmation (download
//! view) any history navigation bounces straight back to the tool home.
//! Dropping the guard removes the listener, so it cannot outlive the view
//! that owns it.

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{PopStateEvent, Window};
use yew::Callback;

const SENTINEL: &str = "workflow-guard";
const CONFIRM_MESSAGE: &str = "Are you sure you want to leave? Your progress will be lost.";

pub struct BackGuard {
    listener: Closure<dyn FnMut(PopStateEvent)>,
}

fn push_sentinel(window: &Window) {
    if let Ok(history) = window.history() {
        let _ = history.push_state(&JsValue::from_str(SENTINEL), "");
    }
}

impl BackGuard {
    /// Arms the trap. Returns `None` outside a browser context.
    pub fn arm(requires_confirmation: bool, on_leave: Callback<()>) -> Option<Self> {
        let window = web_sys::window()?;
        push_sentinel(&window);

        let trap_window = window.clone();
        let listener = Closure::<dyn FnMut(PopStateEvent)>::new(move |_event: PopStateEvent| {
            if requires_confirmation {
                let confirmed = trap_window
                    .confirm_with_message(CONFIRM_MESSAGE)
                    .unwrap_or(false);
                if confirmed {
                    on_leave.emit(());
                } else {
                    // The back-press consumed the sentinel; restore it.
                    push_sentinel(&trap_window);
                }
            } else {
                on_leave.emit(());
            }
        });
        window
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { listener })
    }
}

impl Drop for BackGuard {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "popstate",
                self.listener.as_ref().unchecked_ref(),
            );
        }
    }
}
