//! Browser implementation of the editable region.

use cellpad_core::{EditableRegion, RegionError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

/// An `HtmlElement` used as the editable region.
///
/// Cloning is cheap: it clones the JS reference, not the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserRegion {
    element: HtmlElement,
}

impl BrowserRegion {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    /// Wrap a generic element, if it is an `HtmlElement`.
    pub fn from_element(element: web_sys::Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self::new)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl EditableRegion for BrowserRegion {
    fn serialized_content(&self) -> String {
        self.element.inner_html()
    }

    fn replace_content(&self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn focus(&self) -> Result<(), RegionError> {
        self.element
            .focus()
            .map_err(|e| RegionError::Focus(js_error_text(&e)))
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), RegionError> {
        self.element
            .set_attribute(name, value)
            .map_err(|e| RegionError::Attribute {
                name: name.to_string(),
                message: js_error_text(&e),
            })
    }

    fn remove_attribute(&self, name: &str) -> Result<(), RegionError> {
        self.element
            .remove_attribute(name)
            .map_err(|e| RegionError::Attribute {
                name: name.to_string(),
                message: js_error_text(&e),
            })
    }

    fn is_connected(&self) -> bool {
        self.element.is_connected()
    }
}

/// Best-effort message for a thrown JS value.
pub(crate) fn js_error_text(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", value))
}
