//! Transient notice rendering
//!
//! Spawns auto-dismissing notice elements on the host page. Both lifecycle
//! timers are scheduled up front and their handles kept, so a widget being
//! torn down can cancel pending callbacks instead of letting them fire
//! against a surface that no longer exists.

use docdrop_core::notice::{Notice, NoticeLevel, NoticeTiming};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

/// Id of the injected style element; present at most once per document.
pub const STYLE_ELEMENT_ID: &str = "docdrop-notice-styles";
/// Base class of every notice element.
pub const NOTICE_CLASS: &str = "docdrop-notice";
/// Modifier class added when the slide-out transition starts.
const DISMISSING_CLASS: &str = "docdrop-notice--dismissing";

/// Keyframes and notice styling injected once per document. The host page
/// styles everything else; notices carry their own styles so they work on
/// any page the widget is mounted into.
const NOTICE_CSS: &str = "\
@keyframes docdrop-slide-in {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes docdrop-slide-out {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}
.docdrop-notice {
    position: fixed;
    top: 20px;
    right: 20px;
    padding: 12px 16px;
    border-radius: 8px;
    border: 1px solid transparent;
    box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
    z-index: 1000;
    animation: docdrop-slide-in 0.3s ease-out;
}
.docdrop-notice--dismissing {
    animation: docdrop-slide-out 0.3s ease-in;
    animation-fill-mode: forwards;
}
.docdrop-notice--error { background: #fef2f2; color: #dc2626; border-color: #fecaca; }
.docdrop-notice--info { background: #eff6ff; color: #1d4ed8; border-color: #bfdbfe; }
.docdrop-notice--success { background: #f0fdf4; color: #16a34a; border-color: #bbf7d0; }
";

/// Handle to a live notice: the element plus its two pending timers.
pub struct ToastHandle {
    element: Element,
    dismiss_timer: i32,
    remove_timer: i32,
}

impl ToastHandle {
    /// True once the notice element has left the document.
    pub fn is_expired(&self) -> bool {
        self.element.parent_node().is_none()
    }

    /// Cancel pending timers and drop the element immediately.
    pub fn cancel(&self, window: &Window) {
        window.clear_timeout_with_handle(self.dismiss_timer);
        window.clear_timeout_with_handle(self.remove_timer);
        self.element.remove();
    }
}

/// setTimeout takes an i32 delay; anything past that would wrap negative
/// and fire immediately.
fn timeout_ms(ms: u32) -> i32 {
    ms.min(i32::MAX as u32) as i32
}

/// Modifier class for a notice level.
fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Error => "docdrop-notice--error",
        NoticeLevel::Info => "docdrop-notice--info",
        NoticeLevel::Success => "docdrop-notice--success",
    }
}

/// Ensure the notice styles exist on the page.
pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(NOTICE_CSS));

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("No document head available"))?;
    head.append_child(&style)?;
    Ok(())
}

/// Spawn a notice on the page and schedule its dismissal.
///
/// The element slides in immediately, starts its slide-out transition after
/// `timing.display_ms`, and is removed at `timing.total_ms()`. Notices
/// stack; nothing de-duplicates or queues them.
pub fn spawn(
    window: &Window,
    document: &Document,
    notice: &Notice,
    timing: NoticeTiming,
) -> Result<ToastHandle, JsValue> {
    ensure_styles(document)?;

    let element = document.create_element("div")?;
    element.set_class_name(&format!("{} {}", NOTICE_CLASS, level_class(notice.level)));
    // Messages may quote user file names; text content only, never markup.
    element.set_text_content(Some(&notice.message));

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("No document body available"))?;
    body.append_child(&element)?;

    let dismiss_target = element.clone();
    let on_dismiss = Closure::once(Box::new(move || {
        let _ = dismiss_target.class_list().add_1(DISMISSING_CLASS);
    }) as Box<dyn FnOnce()>);
    let dismiss_timer = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        on_dismiss.as_ref().unchecked_ref::<js_sys::Function>(),
        timeout_ms(timing.display_ms),
    )?;
    on_dismiss.forget();

    let remove_target = element.clone();
    let on_remove = Closure::once(Box::new(move || {
        if remove_target.parent_node().is_some() {
            remove_target.remove();
        }
    }) as Box<dyn FnOnce()>);
    let remove_timer = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        on_remove.as_ref().unchecked_ref::<js_sys::Function>(),
        timeout_ms(timing.total_ms()),
    )?;
    on_remove.forget();

    Ok(ToastHandle {
        element,
        dismiss_timer,
        remove_timer,
    })
}
