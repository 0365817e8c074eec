//! Intake widget wiring
//!
//! Owns the intake session and writes presentational state back to the
//! host page. JavaScript supplies four host elements by id; after
//! construction all event handling, validation, and rendering happen here.
//! Both the picker path and the drop path feed the same acceptance gate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use docdrop_core::intake::{FileCandidate, FinishReceipt, IntakeSession};
use docdrop_core::notice::{self, Notice, NoticeTiming, PRESS_FEEDBACK_MS};
use docdrop_core::{IntakeError, SelectedFile};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DragEvent, Element, Event, EventTarget, HtmlButtonElement, HtmlElement,
    HtmlInputElement, Window,
};

use crate::dom;
use crate::toast::{self, ToastHandle};

/// Class toggled on the intake region while a drag hovers over it.
const DRAGOVER_CLASS: &str = "dragover";
/// Class set on the intake region once a file is accepted.
const SUCCESS_CLASS: &str = "success";
/// Selector for the prompt text hidden after the first acceptance.
const PROMPT_SELECTOR: &str = ".upload-text";
/// Class of the metadata block rendered inside the region.
const FILE_INFO_CLASS: &str = "file-info";
/// Heading of the metadata block.
const FILE_INFO_HEADING: &str = "\u{2713} File selected";

/// DOM references for the four host elements plus window and document.
#[derive(Clone)]
struct Surface {
    window: Window,
    document: Document,
    region: Element,
    input: HtmlInputElement,
    back_button: HtmlElement,
    finish_button: HtmlButtonElement,
}

impl Surface {
    /// Apply the accepted-file presentation: prompt hidden, success state,
    /// metadata block rebuilt, finish actuator enabled.
    fn render_selected(&self, file: &SelectedFile) -> Result<(), JsValue> {
        self.hide_prompt()?;
        self.render_file_info(file)?;
        self.region.class_list().add_1(SUCCESS_CLASS)?;
        self.set_finish_enabled(true)?;
        Ok(())
    }

    fn hide_prompt(&self) -> Result<(), JsValue> {
        if let Some(prompt) = self.region.query_selector(PROMPT_SELECTOR)? {
            dom::set_style(&prompt, "display", "none")?;
        }
        Ok(())
    }

    /// Rebuild the metadata block; an existing one is replaced, never duplicated.
    fn render_file_info(&self, file: &SelectedFile) -> Result<(), JsValue> {
        if let Some(existing) = self
            .region
            .query_selector(&format!(".{}", FILE_INFO_CLASS))?
        {
            existing.remove();
        }

        let info = self.document.create_element("div")?;
        info.set_class_name(FILE_INFO_CLASS);

        let heading = self.document.create_element("strong")?;
        heading.set_text_content(Some(FILE_INFO_HEADING));
        info.append_child(&heading)?;

        // File names come from the user; text nodes only, never markup.
        for line in file_info_lines(file) {
            let row = self.document.create_element("div")?;
            row.set_text_content(Some(&line));
            info.append_child(&row)?;
        }

        self.region.append_child(&info)?;
        Ok(())
    }

    /// Open or close the finish gate, with the matching muted style.
    fn set_finish_enabled(&self, enabled: bool) -> Result<(), JsValue> {
        self.finish_button.set_disabled(!enabled);
        let style = self.finish_button.style();
        if enabled {
            style.set_property("opacity", "1")?;
            style.set_property("cursor", "pointer")?;
        } else {
            style.set_property("opacity", "0.6")?;
            style.set_property("cursor", "not-allowed")?;
        }
        Ok(())
    }

    fn set_dragover(&self, active: bool) {
        let class_list = self.region.class_list();
        let result = if active {
            class_list.add_1(DRAGOVER_CLASS)
        } else {
            class_list.remove_1(DRAGOVER_CLASS)
        };
        if let Err(e) = result {
            web_sys::console::error_1(&e);
        }
    }
}

/// Mutable state shared between the event handlers.
struct WidgetState {
    session: IntakeSession,
    timing: NoticeTiming,
    toasts: Vec<ToastHandle>,
    press_timers: Vec<i32>,
}

impl WidgetState {
    fn new() -> Self {
        Self {
            session: IntakeSession::new(),
            timing: NoticeTiming::default(),
            toasts: Vec::new(),
            press_timers: Vec::new(),
        }
    }
}

/// A listener registration that can be detached on dispose.
struct ListenerHandle {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Single-file intake widget bound to a host page.
#[wasm_bindgen]
pub struct IntakeWidget {
    surface: Surface,
    state: Rc<RefCell<WidgetState>>,
    listeners: Vec<ListenerHandle>,
}

#[wasm_bindgen]
impl IntakeWidget {
    /// Mount the widget onto four host elements:
    /// the intake region, a hidden file input, and the two actuators.
    ///
    /// The finish actuator starts disabled; it opens once a valid file
    /// is accepted.
    #[wasm_bindgen(constructor)]
    pub fn new(
        region_id: &str,
        input_id: &str,
        back_id: &str,
        finish_id: &str,
    ) -> Result<IntakeWidget, JsValue> {
        let document = dom::document()?;
        let surface = Surface {
            window: dom::window()?,
            region: dom::element_by_id(&document, region_id)?,
            input: dom::typed_element_by_id(&document, input_id)?,
            back_button: dom::typed_element_by_id(&document, back_id)?,
            finish_button: dom::typed_element_by_id(&document, finish_id)?,
            document,
        };

        surface.set_finish_enabled(false)?;
        toast::ensure_styles(&surface.document)?;

        let mut widget = IntakeWidget {
            surface,
            state: Rc::new(RefCell::new(WidgetState::new())),
            listeners: Vec::new(),
        };
        widget.attach_listeners()?;

        web_sys::console::log_1(&format!("docdrop widget mounted on #{}", region_id).into());
        Ok(widget)
    }

    /// Whether the finish action is currently available
    #[wasm_bindgen(js_name = canFinish)]
    pub fn can_finish(&self) -> bool {
        self.state.borrow().session.can_finish()
    }

    /// Info record for the currently selected file, or null
    #[wasm_bindgen(js_name = getSelectedFile)]
    pub fn selected_file(&self) -> Result<JsValue, JsValue> {
        let state = self.state.borrow();
        match state.session.selected() {
            Some(file) => serde_wasm_bindgen::to_value(&SelectedFileJs::from(file))
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e))),
            None => Ok(JsValue::NULL),
        }
    }

    /// Offer a single file through the gate, as if picked in the dialog.
    /// Returns whether it was accepted; a rejection raises the error notice.
    #[wasm_bindgen(js_name = offerFile)]
    pub fn offer_file(&self, name: &str, size_bytes: f64, mime_type: &str) -> bool {
        handle_offer(
            &self.surface,
            &self.state,
            FileCandidate::new(name, size_bytes as u64, mime_type),
        )
    }

    /// Offer a dropped file list; only the first file is considered.
    /// Returns whether a file was accepted.
    #[wasm_bindgen(js_name = offerDrop)]
    pub fn offer_drop(&self, files: web_sys::FileList) -> bool {
        handle_drop(&self.surface, &self.state, candidates_from_list(&files))
    }

    /// Run the finish action: raises the matching notice and returns the
    /// receipt record, or throws when no file is selected.
    pub fn finish(&self) -> Result<JsValue, JsValue> {
        let receipt = run_finish(&self.surface, &self.state)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&receipt)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Trigger the previous-step flow (placeholder notice only)
    #[wasm_bindgen(js_name = previousStep)]
    pub fn previous_step(&self) {
        handle_previous_step(&self.surface, &self.state);
    }

    /// Override how long notices stay on screen
    #[wasm_bindgen(js_name = setNoticeTiming)]
    pub fn set_notice_timing(&self, display_ms: u32, dismiss_ms: u32) {
        self.state.borrow_mut().timing = NoticeTiming::new(display_ms, dismiss_ms);
    }

    /// Number of notices still on the page
    #[wasm_bindgen(js_name = getNoticeCount)]
    pub fn notice_count(&self) -> usize {
        let mut state = self.state.borrow_mut();
        state.toasts.retain(|toast| !toast.is_expired());
        state.toasts.len()
    }

    /// Detach all listeners and cancel outstanding timers.
    ///
    /// After this the widget no longer reacts to the page; live notices
    /// are removed immediately so no callback fires against a torn-down
    /// surface.
    pub fn dispose(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }

        let mut state = self.state.borrow_mut();
        for toast in state.toasts.drain(..) {
            toast.cancel(&self.surface.window);
        }
        for timer in state.press_timers.drain(..) {
            self.surface.window.clear_timeout_with_handle(timer);
        }
    }
}

impl IntakeWidget {
    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        // Region click opens the hidden picker.
        let input = self.surface.input.clone();
        self.listen(
            self.surface.region.clone().into(),
            "click",
            Box::new(move |_event: Event| {
                input.click();
            }),
        )?;

        // Picker change feeds the gate.
        let surface = self.surface.clone();
        let state = Rc::clone(&self.state);
        self.listen(
            self.surface.input.clone().into(),
            "change",
            Box::new(move |_event: Event| {
                let picked = surface
                    .input
                    .files()
                    .and_then(|files| files.get(0))
                    .map(|file| candidate_from_file(&file));
                if let Some(candidate) = picked {
                    handle_offer(&surface, &state, candidate);
                }
            }),
        )?;

        // Drag feedback on the region.
        let surface = self.surface.clone();
        self.listen(
            self.surface.region.clone().into(),
            "dragover",
            Box::new(move |event: Event| {
                event.prevent_default();
                surface.set_dragover(true);
            }),
        )?;

        let surface = self.surface.clone();
        self.listen(
            self.surface.region.clone().into(),
            "dragleave",
            Box::new(move |event: Event| {
                event.prevent_default();
                surface.set_dragover(false);
            }),
        )?;

        // Drop feeds the gate under the first-file-only policy.
        let surface = self.surface.clone();
        let state = Rc::clone(&self.state);
        self.listen(
            self.surface.region.clone().into(),
            "drop",
            Box::new(move |event: Event| {
                event.prevent_default();
                surface.set_dragover(false);

                let candidates = event
                    .dyn_ref::<DragEvent>()
                    .and_then(|drag| drag.data_transfer())
                    .and_then(|transfer| transfer.files())
                    .map(|files| candidates_from_list(&files))
                    .unwrap_or_default();
                handle_drop(&surface, &state, candidates);
            }),
        )?;

        // Actuators.
        let surface = self.surface.clone();
        let state = Rc::clone(&self.state);
        self.listen(
            self.surface.back_button.clone().into(),
            "click",
            Box::new(move |_event: Event| {
                handle_previous_step(&surface, &state);
            }),
        )?;

        let surface = self.surface.clone();
        let state = Rc::clone(&self.state);
        self.listen(
            self.surface.finish_button.clone().into(),
            "click",
            Box::new(move |_event: Event| {
                let _ = run_finish(&surface, &state);
            }),
        )?;

        // Hover lift on both actuators.
        let buttons = [
            self.surface.back_button.clone(),
            HtmlElement::from(self.surface.finish_button.clone()),
        ];
        for button in buttons {
            let enter_target = button.clone();
            self.listen(
                button.clone().into(),
                "mouseenter",
                Box::new(move |_event: Event| {
                    let _ = enter_target.style().set_property("transform", "translateY(-2px)");
                }),
            )?;

            let leave_target = button.clone();
            self.listen(
                button.into(),
                "mouseleave",
                Box::new(move |_event: Event| {
                    let _ = leave_target.style().set_property("transform", "translateY(0)");
                }),
            )?;
        }

        Ok(())
    }

    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        handler: Box<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        let callback = Closure::wrap(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(ListenerHandle {
            target,
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for IntakeWidget {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Route one candidate through the gate; returns whether it was accepted.
fn handle_offer(
    surface: &Surface,
    state: &Rc<RefCell<WidgetState>>,
    candidate: FileCandidate,
) -> bool {
    let result = {
        let mut state = state.borrow_mut();
        state.session.offer(candidate).cloned()
    };

    match result {
        Ok(file) => {
            if let Err(e) = surface.render_selected(&file) {
                web_sys::console::error_1(&e);
            }
            true
        }
        Err(_) => {
            notify(surface, state, Notice::error(notice::MSG_UNSUPPORTED_TYPE));
            false
        }
    }
}

/// Apply a dropped file list; returns whether a file was accepted.
fn handle_drop(
    surface: &Surface,
    state: &Rc<RefCell<WidgetState>>,
    candidates: Vec<FileCandidate>,
) -> bool {
    let result = {
        let mut state = state.borrow_mut();
        state
            .session
            .offer_drop(candidates)
            .map(|outcome| (outcome, state.session.selected().cloned()))
    };

    match result {
        Ok((outcome, selected)) => {
            if outcome.accepted {
                if let Some(file) = selected {
                    if let Err(e) = surface.render_selected(&file) {
                        web_sys::console::error_1(&e);
                    }
                }
            }
            if outcome.discarded > 0 {
                notify(surface, state, Notice::discarded_files(outcome.discarded));
            }
            outcome.accepted
        }
        Err(_) => {
            notify(surface, state, Notice::error(notice::MSG_UNSUPPORTED_TYPE));
            false
        }
    }
}

/// Finish flow shared by the click handler and the JS-facing method.
fn run_finish(
    surface: &Surface,
    state: &Rc<RefCell<WidgetState>>,
) -> Result<FinishReceipt, IntakeError> {
    let result = state.borrow().session.finish();
    match &result {
        Ok(receipt) => {
            press_feedback(surface, state, &surface.finish_button);
            web_sys::console::log_1(&format!("finish: {}", receipt.summary()).into());
            notify(surface, state, Notice::success(receipt.summary()));
        }
        Err(_) => {
            notify(surface, state, Notice::error(notice::MSG_NO_FILE_SELECTED));
        }
    }
    result
}

/// Previous-step flow: press feedback plus a placeholder notice.
fn handle_previous_step(surface: &Surface, state: &Rc<RefCell<WidgetState>>) {
    press_feedback(surface, state, &surface.back_button);
    web_sys::console::log_1(&"previous step requested".into());
    notify(surface, state, Notice::info(notice::MSG_PREVIOUS_STEP));
}

/// Scale the actuator down briefly; the restore timer is tracked so
/// dispose can cancel it, and unregisters itself once it fires.
fn press_feedback(surface: &Surface, state: &Rc<RefCell<WidgetState>>, button: &HtmlElement) {
    let _ = button.style().set_property("transform", "scale(0.95)");

    // The callback needs its own timer id; the slot is filled once
    // scheduling returns, before the timer can fire.
    let timer_slot: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let restore_target = button.clone();
    let restore_state = Rc::clone(state);
    let restore_slot = Rc::clone(&timer_slot);
    let on_restore = Closure::once(Box::new(move || {
        let _ = restore_target.style().set_property("transform", "scale(1)");
        if let Some(timer) = restore_slot.get() {
            forget_press_timer(&restore_state, timer);
        }
    }) as Box<dyn FnOnce()>);

    let scheduled = surface.window.set_timeout_with_callback_and_timeout_and_arguments_0(
        on_restore.as_ref().unchecked_ref::<js_sys::Function>(),
        PRESS_FEEDBACK_MS as i32,
    );
    match scheduled {
        Ok(timer) => {
            timer_slot.set(Some(timer));
            state.borrow_mut().press_timers.push(timer);
        }
        Err(e) => web_sys::console::error_1(&e),
    }
    on_restore.forget();
}

/// Drop a fired restore timer from the teardown registry.
fn forget_press_timer(state: &Rc<RefCell<WidgetState>>, timer: i32) {
    state.borrow_mut().press_timers.retain(|t| *t != timer);
}

/// Spawn a transient notice and keep its handle for teardown.
fn notify(surface: &Surface, state: &Rc<RefCell<WidgetState>>, notice: Notice) {
    let timing = state.borrow().timing;
    match toast::spawn(&surface.window, &surface.document, &notice, timing) {
        Ok(handle) => {
            let mut state = state.borrow_mut();
            state.toasts.retain(|toast| !toast.is_expired());
            state.toasts.push(handle);
        }
        Err(e) => web_sys::console::error_1(&e),
    }
}

/// Convert a browser File into the core candidate shape.
fn candidate_from_file(file: &web_sys::File) -> FileCandidate {
    FileCandidate::new(file.name(), file.size() as u64, file.type_())
}

fn candidates_from_list(files: &web_sys::FileList) -> Vec<FileCandidate> {
    (0..files.length())
        .filter_map(|index| files.get(index))
        .map(|file| candidate_from_file(&file))
        .collect()
}

/// Lines rendered inside the metadata block.
fn file_info_lines(file: &SelectedFile) -> [String; 3] {
    [
        format!("Name: {}", file.name),
        format!("Size: {}", file.size_display()),
        format!("Type: {}", file.mime_display()),
    ]
}

/// Selected-file record for JS serialization
#[derive(serde::Serialize)]
struct SelectedFileJs {
    name: String,
    size_bytes: u64,
    size_display: String,
    mime_type: String,
    kind: &'static str,
}

impl From<&SelectedFile> for SelectedFileJs {
    fn from(file: &SelectedFile) -> Self {
        Self {
            name: file.name.clone(),
            size_bytes: file.size_bytes,
            size_display: file.size_display(),
            mime_type: file.mime_display().to_string(),
            kind: file.kind.label(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use docdrop_core::DocumentKind;
    use proptest::prelude::*;

    proptest! {
        /// Property: the metadata lines always carry the name, a size, and a type
        #[test]
        fn info_lines_cover_all_fields(
            name in "[a-zA-Z0-9 ._-]{1,30}",
            size in 0u64..u64::MAX
        ) {
            let file = SelectedFile {
                name: name.clone(),
                size_bytes: size,
                mime_type: String::new(),
                kind: DocumentKind::Pdf,
            };

            let lines = file_info_lines(&file);
            prop_assert!(lines[0].contains(&name));
            prop_assert!(lines[1].starts_with("Size: "));
            prop_assert_eq!(lines[2].as_str(), "Type: unknown");
        }
    }
}

// WASM-specific tests that run in a browser environment
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Build the four host elements with unique ids; returns their ids.
    fn build_surface(prefix: &str) -> (String, String, String, String) {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();

        let region = document.create_element("div").unwrap();
        region.set_id(&format!("{}-region", prefix));
        let prompt = document.create_element("p").unwrap();
        prompt.set_class_name("upload-text");
        prompt.set_text_content(Some("drop a file here"));
        region.append_child(&prompt).unwrap();
        body.append_child(&region).unwrap();

        let input = document.create_element("input").unwrap();
        input.set_id(&format!("{}-input", prefix));
        input.set_attribute("type", "file").unwrap();
        body.append_child(&input).unwrap();

        let back = document.create_element("button").unwrap();
        back.set_id(&format!("{}-back", prefix));
        body.append_child(&back).unwrap();

        let finish = document.create_element("button").unwrap();
        finish.set_id(&format!("{}-finish", prefix));
        body.append_child(&finish).unwrap();

        (
            format!("{}-region", prefix),
            format!("{}-input", prefix),
            format!("{}-back", prefix),
            format!("{}-finish", prefix),
        )
    }

    #[wasm_bindgen_test]
    fn test_mount_starts_gated() {
        let (region, input, back, finish) = build_surface("mount");
        let widget = IntakeWidget::new(&region, &input, &back, &finish).unwrap();
        assert!(!widget.can_finish());
        assert!(widget.selected_file().unwrap().is_null());

        let document = web_sys::window().unwrap().document().unwrap();
        let finish_button: HtmlButtonElement = document
            .get_element_by_id(&finish)
            .unwrap()
            .dyn_into()
            .unwrap();
        assert!(finish_button.disabled());
    }

    #[wasm_bindgen_test]
    fn test_mount_fails_on_missing_elements() {
        let result = IntakeWidget::new("nope-region", "nope-input", "nope-back", "nope-finish");
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_offer_file_renders_metadata_and_opens_gate() {
        let (region, input, back, finish) = build_surface("offer");
        let widget = IntakeWidget::new(&region, &input, &back, &finish).unwrap();

        assert!(widget.offer_file("report.pdf", 1536.0, "application/pdf"));
        assert!(widget.can_finish());

        let document = web_sys::window().unwrap().document().unwrap();
        let region_element = document.get_element_by_id(&region).unwrap();
        assert!(region_element.class_list().contains("success"));

        let info = region_element.query_selector(".file-info").unwrap().unwrap();
        let text = info.text_content().unwrap();
        assert!(text.contains("report.pdf"));
        assert!(text.contains("1.5 KB"));

        let finish_button: HtmlButtonElement = document
            .get_element_by_id(&finish)
            .unwrap()
            .dyn_into()
            .unwrap();
        assert!(!finish_button.disabled());
    }

    #[wasm_bindgen_test]
    fn test_second_offer_replaces_metadata_block() {
        let (region, input, back, finish) = build_surface("replace");
        let widget = IntakeWidget::new(&region, &input, &back, &finish).unwrap();

        widget.offer_file("first.pdf", 100.0, "application/pdf");
        widget.offer_file("second.docx", 200.0, "");

        let document = web_sys::window().unwrap().document().unwrap();
        let region_element = document.get_element_by_id(&region).unwrap();
        let blocks = region_element.query_selector_all(".file-info").unwrap();
        assert_eq!(blocks.length(), 1);

        let text = region_element.text_content().unwrap();
        assert!(text.contains("second.docx"));
        assert!(!text.contains("first.pdf"));
    }

    #[wasm_bindgen_test]
    fn test_rejected_file_raises_notice_and_keeps_gate_closed() {
        let (region, input, back, finish) = build_surface("reject");
        let widget = IntakeWidget::new(&region, &input, &back, &finish).unwrap();

        assert!(!widget.offer_file("notes.txt", 10.0, "text/plain"));
        assert!(!widget.can_finish());
        assert_eq!(widget.notice_count(), 1);
    }

    #[wasm_bindgen_test]
    fn test_finish_without_file_throws_and_raises_notice() {
        let (region, input, back, finish) = build_surface("nofinish");
        let widget = IntakeWidget::new(&region, &input, &back, &finish).unwrap();

        assert!(widget.finish().is_err());
        assert_eq!(widget.notice_count(), 1);
    }

    #[wasm_bindgen_test]
    fn test_finish_returns_receipt() {
        let (region, input, back, finish) = build_surface("finish");
        let widget = IntakeWidget::new(&region, &input, &back, &finish).unwrap();

        widget.offer_file("thesis.docx", 1048576.0, "");
        let receipt = widget.finish().unwrap();
        assert!(!receipt.is_null());
    }

    #[wasm_bindgen_test]
    fn test_dispose_clears_notices() {
        let (region, input, back, finish) = build_surface("dispose");
        let mut widget = IntakeWidget::new(&region, &input, &back, &finish).unwrap();

        widget.offer_file("notes.txt", 10.0, "text/plain");
        assert_eq!(widget.notice_count(), 1);

        widget.dispose();
        assert_eq!(widget.notice_count(), 0);
    }
}
