use crate::core::MessageBoard;
use web_sys as web;

// The overlay element is anchored above the subject by the page stylesheet;
// this module only owns its visibility and contents.
const OVERLAY_ID: &str = "message-overlay";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

/// Mirror the message board into the DOM: visible with the current message
/// and a countdown bar while open, hidden (and inert) while closed.
pub fn sync(document: &web::Document, board: &MessageBoard, now_sec: f64) {
    let Some(el) = document.get_element_by_id(OVERLAY_ID) else {
        return;
    };
    match board.current_message() {
        Some(msg) => {
            let remaining_pct = (board.countdown(now_sec) * 100.0).clamp(0.0, 100.0);
            let html = format!(
                "<div style='color: #dff4ff; font: 14px system-ui; background: rgba(5, 24, 41, 0.85); \
                 padding: 10px 14px; border-radius: 8px; border: 1px solid rgba(90, 160, 200, 0.35);'>\
                 {}<div style='margin-top: 8px; height: 3px; background: rgba(90, 160, 200, 0.25);'>\
                 <div style='height: 3px; width: {:.0}%; background: #00ffff;'></div></div></div>",
                msg, remaining_pct
            );
            el.set_inner_html(&html);
            show(document);
        }
        None => hide(document),
    }
}
