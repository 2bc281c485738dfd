//! Small DOM and formatting helpers for the workflow views.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// How long an upload-failure toast stays on screen. Long enough to read a
/// file name, short enough not to cover the telemetry for the next transfer.
const TOAST_DURATION_MS: u32 = 4000;

/// Shows a transient toast notification at the bottom of the screen, used
/// for per-file upload failures that do not stop the batch. The element is
/// injected directly into the body and removed after [`TOAST_DURATION_MS`].
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_class_name("upload-toast");
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("max-width", "80%").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Formats a byte count as megabytes with two decimals, for the upload
/// telemetry ("12.40 MB of 48.00 MB").
pub fn format_mb(bytes: f64) -> String {
    format!("{:.2} MB", bytes / (1024.0 * 1024.0))
}

/// One-line pitch shown on each tool card on the home screen.
pub fn tool_description(tool: common::jobs::JobType) -> &'static str {
    match tool {
        common::jobs::JobType::Merge => {
            "Combine PDFs in the order you want with the easiest PDF merger available."
        }
        common::jobs::JobType::Split => {
            "Separate one page or a whole set for easy conversion into independent PDF files."
        }
        common::jobs::JobType::Compress => {
            "Reduce file size while optimizing for maximal PDF quality."
        }
        common::jobs::JobType::Protect => {
            "Encrypt your PDF with a password to keep sensitive data confidential."
        }
        common::jobs::JobType::Unlock => {
            "Remove PDF password security, giving you the freedom to use your PDFs as you want."
        }
    }
}
