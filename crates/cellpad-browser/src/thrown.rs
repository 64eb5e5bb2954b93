//! Holding exceptions thrown by JS owner callbacks.
//!
//! Owner callbacks run while the region state is mutably borrowed. A JS
//! exception can't unwind through that borrow, so the callback wrapper parks
//! the thrown value here and whoever holds the borrow rethrows it (or returns
//! it) once the borrow has been released.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::JsValue;

/// Shared slot for the first exception an owner callback threw.
#[derive(Clone, Default)]
pub struct ThrownSlot(Rc<RefCell<Option<JsValue>>>);

impl ThrownSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `f(arg)`, parking anything it throws.
    ///
    /// Later exceptions are dropped while an earlier one is still parked.
    pub fn call1(&self, f: &Function, arg: &JsValue) {
        if let Err(thrown) = f.call1(&JsValue::NULL, arg) {
            self.record(thrown);
        }
    }

    pub fn record(&self, thrown: JsValue) {
        let mut slot = self.0.borrow_mut();
        if slot.is_none() {
            *slot = Some(thrown);
        } else {
            tracing::debug!("owner callback threw again before rethrow, dropping");
        }
    }

    /// Take the parked exception, if any.
    pub fn take(&self) -> Option<JsValue> {
        self.0.borrow_mut().take()
    }

    /// Rethrow the parked exception into the calling JS frame.
    ///
    /// Call only with no borrows or guards alive on the Rust stack.
    pub fn rethrow(&self) {
        if let Some(thrown) = self.take() {
            wasm_bindgen::throw_val(thrown);
        }
    }
}

impl std::fmt::Debug for ThrownSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ThrownSlot")
            .field(&self.0.borrow().is_some())
            .finish()
    }
}
