//! Small DOM access helpers shared by the widget and notices

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// Get the window object
///
/// # Errors
/// Returns JsValue error when not running in a browsing context
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))
}

/// Get the document object
pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}

/// Look up an element by id, naming the id in the error
pub fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))
}

/// Look up an element by id and cast it to a concrete DOM type
pub fn typed_element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    element_by_id(document, id)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

/// Set an inline style property when the element is an HtmlElement
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
        html_element.style().set_property(property, value)?;
    }
    Ok(())
}
