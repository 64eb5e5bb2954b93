//! JsContentEditable - editable region wrapper for JavaScript.

use cellpad_browser::{
    BrowserHandlers, BrowserRegion, EditableError, EditableProps, Emission, MountedEditable,
    ThrownSlot,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::types::{JsEditableState, lifecycle_name};

/// An element turned into a synced editable region.
///
/// ```js
/// const editable = new JsContentEditable(el, { initialContent: "<b>hi</b>", class: "cell" },
///     (html) => save(html));
/// ```
#[wasm_bindgen]
pub struct JsContentEditable {
    inner: MountedEditable,
}

#[wasm_bindgen]
impl JsContentEditable {
    /// Mount onto `element`.
    ///
    /// `options` takes `initialContent`, `autoFocus`, `allowEdit`; any other
    /// key is forwarded as an attribute. Exceptions thrown by the callbacks
    /// propagate to whoever triggered them: the native event dispatch or the
    /// method call.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlElement,
        options: JsValue,
        on_change: Option<Function>,
        on_blur: Option<Function>,
        inner_ref: Option<Function>,
    ) -> Result<JsContentEditable, JsValue> {
        let props = parse_options(options)?;
        let thrown = ThrownSlot::new();
        let handlers = js_handlers(&thrown, on_change, on_blur, inner_ref);
        let editable = Self {
            inner: cellpad_browser::mount_with(element, props, handlers, thrown),
        };
        editable.settle(Ok(()))?;
        Ok(editable)
    }

    /// Hand over new options, as a re-render would.
    ///
    /// Returns true if the region was reseeded.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<bool, JsValue> {
        let props = parse_options(options)?;
        let outcome = self.inner.set_props(props);
        Ok(self.settle(outcome)?.seeded)
    }

    /// Move focus into the region.
    #[wasm_bindgen]
    pub fn focus(&self) -> Result<(), JsValue> {
        let focused = self.inner.focus();
        self.settle(focused)
    }

    /// Emit now if the content changed. Returns true if `onChange` fired.
    #[wasm_bindgen]
    pub fn flush(&self) -> Result<bool, JsValue> {
        let emission = self.inner.flush();
        Ok(self.settle(emission)? == Emission::Emitted)
    }

    /// The markup most recently passed to `onChange` ("" if none yet).
    #[wasm_bindgen(js_name = lastEmitted)]
    pub fn last_emitted(&self) -> Result<String, JsValue> {
        self.settle(self.inner.last_emitted())
    }

    #[wasm_bindgen(js_name = isEditable)]
    pub fn is_editable(&self) -> bool {
        self.inner.is_editable()
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> Result<bool, JsValue> {
        Ok(self.settle(self.inner.lifecycle())?.is_mounted())
    }

    /// `{ lifecycle, editable, lastEmitted }`.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        let state = JsEditableState {
            lifecycle: lifecycle_name(self.settle(self.inner.lifecycle())?),
            editable: self.inner.is_editable(),
            last_emitted: self.settle(self.inner.last_emitted())?,
        };
        serde_wasm_bindgen::to_value(&state)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)).into())
    }

    /// Remove listeners and detach. Safe to call twice.
    #[wasm_bindgen]
    pub fn unmount(&mut self) -> Result<(), JsValue> {
        let unmounted = self.inner.unmount();
        self.settle(unmounted)
    }
}

impl JsContentEditable {
    /// A callback exception parked during the call wins over the call's own
    /// result.
    fn settle<T>(&self, result: Result<T, EditableError>) -> Result<T, JsValue> {
        if let Some(thrown) = self.inner.thrown().take() {
            return Err(thrown);
        }
        result.map_err(|e| JsError::from(e).into())
    }
}

fn parse_options(options: JsValue) -> Result<EditableProps, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(EditableProps::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

/// Wrap JS callbacks. Anything they throw is parked in `thrown` until the
/// region state is released.
fn js_handlers(
    thrown: &ThrownSlot,
    on_change: Option<Function>,
    on_blur: Option<Function>,
    inner_ref: Option<Function>,
) -> BrowserHandlers {
    let mut handlers = BrowserHandlers::new();
    if let Some(f) = on_change {
        let thrown = thrown.clone();
        handlers = handlers
            .on_change(move |markup: &str| thrown.call1(&f, &JsValue::from_str(markup)));
    }
    if let Some(f) = on_blur {
        let thrown = thrown.clone();
        handlers = handlers.on_blur(move |event: &web_sys::Event| thrown.call1(&f, event.as_ref()));
    }
    if let Some(f) = inner_ref {
        let thrown = thrown.clone();
        handlers = handlers.inner_ref(move |region: Option<&BrowserRegion>| {
            let node = region
                .map(|r| JsValue::from(r.element().clone()))
                .unwrap_or(JsValue::NULL);
            thrown.call1(&f, &node)
        });
    }
    handlers
}
