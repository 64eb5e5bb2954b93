//! WASM browser tests for the JS bindings.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use std::cell::RefCell;
use std::rc::Rc;

use cellpad_js::JsContentEditable;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn div() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

fn options(entries: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value).unwrap();
    }
    object.into()
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

/// A JS function that records what it was called with.
fn recorder() -> (Function, Rc<RefCell<Vec<JsValue>>>) {
    let calls: Rc<RefCell<Vec<JsValue>>> = Rc::default();
    let sink = calls.clone();
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        sink.borrow_mut().push(value);
    });
    let function = closure.as_ref().unchecked_ref::<Function>().clone();
    closure.forget();
    (function, calls)
}

fn thrower(message: &str) -> Function {
    Function::new_with_args("x", &format!("throw new Error('{message}')"))
}

fn error_message(value: JsValue) -> String {
    value.dyn_into::<js_sys::Error>().unwrap().message().into()
}

// === Options ===

#[wasm_bindgen_test]
fn options_seed_and_forward_attributes() {
    let el = div();
    let editable = JsContentEditable::new(
        el.clone(),
        options(&[
            ("initialContent", "<b>hi</b>".into()),
            ("class", "cell".into()),
            ("data-row", 3.into()),
            ("hidden", true.into()),
        ]),
        None,
        None,
        None,
    )
    .unwrap();

    assert_eq!(el.inner_html(), "<b>hi</b>");
    assert_eq!(el.get_attribute("class").as_deref(), Some("cell"));
    assert_eq!(el.get_attribute("data-row").as_deref(), Some("3"));
    assert!(el.has_attribute("hidden"));

    let state = editable.get_state().unwrap();
    assert_eq!(get(&state, "lifecycle").as_string().as_deref(), Some("seedPending"));
    assert_eq!(get(&state, "editable").as_bool(), Some(true));
    assert_eq!(get(&state, "lastEmitted").as_string().as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn missing_options_use_defaults() {
    let el = div();
    let editable = JsContentEditable::new(el.clone(), JsValue::NULL, None, None, None).unwrap();
    assert!(editable.is_editable());
    assert_eq!(el.get_attribute("contenteditable").as_deref(), Some("true"));

    let editable = JsContentEditable::new(div(), JsValue::UNDEFINED, None, None, None).unwrap();
    assert!(editable.is_mounted().unwrap());
}

#[wasm_bindgen_test]
fn mistyped_option_is_rejected() {
    let result = JsContentEditable::new(
        div(),
        options(&[("autoFocus", "yes".into())]),
        None,
        None,
        None,
    );
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn set_options_reports_reseed() {
    let el = div();
    let mut editable = JsContentEditable::new(
        el.clone(),
        options(&[("initialContent", "A".into())]),
        None,
        None,
        None,
    )
    .unwrap();
    assert!(!editable.set_options(options(&[("initialContent", "A".into())])).unwrap());
    assert!(editable.set_options(options(&[("initialContent", "B".into())])).unwrap());
    assert_eq!(el.inner_html(), "B");

    let state = editable.get_state().unwrap();
    assert_eq!(get(&state, "lifecycle").as_string().as_deref(), Some("seeded"));
}

// === Callbacks ===

#[wasm_bindgen_test]
fn callbacks_receive_markup_and_element() {
    let el = div();
    let (on_change, changes) = recorder();
    let (inner_ref, refs) = recorder();
    let mut editable =
        JsContentEditable::new(el.clone(), JsValue::NULL, Some(on_change), None, Some(inner_ref))
            .unwrap();

    el.set_inner_html("typed");
    assert!(editable.flush().unwrap());
    assert!(!editable.flush().unwrap());
    assert_eq!(editable.last_emitted().unwrap(), "typed");

    editable.unmount().unwrap();
    assert!(!editable.is_mounted().unwrap());

    let changes: Vec<_> = changes.borrow().iter().map(|v| v.as_string()).collect();
    assert_eq!(changes, vec![Some("typed".to_string())]);

    let refs = refs.borrow();
    assert_eq!(refs.len(), 2);
    assert!(refs[0].is_instance_of::<HtmlElement>());
    assert!(refs[1].is_null());
}

#[wasm_bindgen_test]
fn on_change_exception_reaches_caller() {
    let el = div();
    let editable = JsContentEditable::new(
        el.clone(),
        JsValue::NULL,
        Some(thrower("save failed")),
        None,
        None,
    )
    .unwrap();

    el.set_inner_html("typed");
    let thrown = editable.flush().unwrap_err();
    assert_eq!(error_message(thrown), "save failed");

    // The region is free again and the value counts as delivered.
    assert_eq!(editable.last_emitted().unwrap(), "typed");
    assert!(!editable.flush().unwrap());
}

#[wasm_bindgen_test]
fn inner_ref_exception_fails_construction() {
    let result = JsContentEditable::new(div(), JsValue::NULL, None, None, Some(thrower("no ref")));
    let thrown = result.err().unwrap();
    assert_eq!(error_message(thrown), "no ref");
}
