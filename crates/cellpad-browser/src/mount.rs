//! Imperative mounting onto an existing DOM element.
//!
//! For hosts that aren't a component framework (plain JS, a canvas grid that
//! positions an overlay element by hand). The element gets the shell
//! attributes, the initial seed, and native listeners that feed
//! `ContentEditable`.

use std::cell::RefCell;
use std::rc::Rc;

use cellpad_core::{
    ContentEditable, EditableHandlers, EditableProps, Emission, Lifecycle, SeedOutcome,
    ShellAttributes,
};
use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::error::EditableError;
use crate::region::{BrowserRegion, js_error_text};
use crate::shell::suppress_propagation;
use crate::thrown::ThrownSlot;

/// Owner callbacks for a browser-mounted region. Blur handlers get the raw
/// DOM event.
pub type BrowserHandlers = EditableHandlers<BrowserRegion, web_sys::Event>;

type Shared = Rc<RefCell<ContentEditable<BrowserRegion, web_sys::Event>>>;

/// A region mounted with [`mount`] or [`mount_in`].
///
/// Dropping it removes the listeners and unmounts.
pub struct MountedEditable {
    element: HtmlElement,
    state: Shared,
    applied: ShellAttributes,
    listeners: Vec<EventListener>,
    thrown: ThrownSlot,
    /// Created by `mount_in`, so removed from the DOM on unmount.
    owns_element: bool,
}

/// Mount onto an existing element.
pub fn mount(
    element: HtmlElement,
    props: EditableProps,
    handlers: BrowserHandlers,
) -> MountedEditable {
    mount_with(element, props, handlers, ThrownSlot::new())
}

/// Mount onto an existing element, rethrowing whatever `handlers` park in
/// `thrown` from the native listeners once the region state is released.
pub fn mount_with(
    element: HtmlElement,
    props: EditableProps,
    handlers: BrowserHandlers,
    thrown: ThrownSlot,
) -> MountedEditable {
    let region = BrowserRegion::new(element.clone());
    let applied = ShellAttributes::resolve(&props);
    applied.apply(&region, None);

    let mut editable = ContentEditable::new(props, handlers);
    editable.attach(region);
    let outcome = editable.mount();
    tracing::debug!(
        seeded = outcome.seeded,
        focused = outcome.focused,
        "mounted editable region"
    );

    let state: Shared = Rc::new(RefCell::new(editable));
    let mut listeners = suppress_propagation(&element);

    listeners.push(EventListener::new(&element, "input", {
        let state = state.clone();
        let thrown = thrown.clone();
        move |_event| {
            if let Ok(mut editable) = state.try_borrow_mut() {
                editable.handle_input();
            } else {
                tracing::debug!("input: region busy, skipping flush");
            }
            thrown.rethrow();
        }
    }));

    listeners.push(EventListener::new(&element, "blur", {
        let state = state.clone();
        let thrown = thrown.clone();
        move |event| {
            if let Ok(mut editable) = state.try_borrow_mut() {
                editable.handle_blur(event);
            } else {
                tracing::debug!("blur: region busy, skipping flush");
            }
            thrown.rethrow();
        }
    }));

    MountedEditable {
        element,
        state,
        applied,
        listeners,
        thrown,
        owns_element: false,
    }
}

/// Create a `div` inside `container` and mount onto it.
pub fn mount_in(
    container: &web_sys::Element,
    props: EditableProps,
    handlers: BrowserHandlers,
) -> Result<MountedEditable, EditableError> {
    let window = web_sys::window().ok_or(EditableError::NoWindow)?;
    let document = window.document().ok_or(EditableError::NoDocument)?;

    let element = document
        .create_element("div")
        .map_err(|e| EditableError::Dom(js_error_text(&e)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| EditableError::Dom("created element is not an HtmlElement".into()))?;

    container
        .append_child(&element)
        .map_err(|e| EditableError::Dom(js_error_text(&e)))?;

    let mut mounted = mount(element, props, handlers);
    mounted.owns_element = true;
    Ok(mounted)
}

impl MountedEditable {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Hand over new props, as a re-render would.
    ///
    /// Applies the attribute diff, then runs the post-render seed check.
    pub fn set_props(&mut self, props: EditableProps) -> Result<SeedOutcome, EditableError> {
        let mut editable = self.state.try_borrow_mut().map_err(|_| EditableError::Busy)?;

        let next = ShellAttributes::resolve(&props);
        if let Some(region) = editable.region() {
            next.apply(region, Some(&self.applied));
        }
        self.applied = next;

        editable.set_props(props);
        Ok(editable.after_render())
    }

    /// Replace the owner callbacks.
    pub fn set_handlers(&self, handlers: BrowserHandlers) -> Result<(), EditableError> {
        let mut editable = self.state.try_borrow_mut().map_err(|_| EditableError::Busy)?;
        editable.set_handlers(handlers);
        Ok(())
    }

    /// Move focus into the region.
    pub fn focus(&self) -> Result<(), EditableError> {
        let editable = self.state.try_borrow().map_err(|_| EditableError::Busy)?;
        if let Some(region) = editable.region() {
            cellpad_core::EditableRegion::focus(region)?;
        }
        Ok(())
    }

    /// Emit now if the region changed since the last emission.
    pub fn flush(&self) -> Result<Emission, EditableError> {
        let mut editable = self.state.try_borrow_mut().map_err(|_| EditableError::Busy)?;
        Ok(editable.flush())
    }

    pub fn last_emitted(&self) -> Result<String, EditableError> {
        let editable = self.state.try_borrow().map_err(|_| EditableError::Busy)?;
        Ok(editable.last_emitted().to_string())
    }

    pub fn is_editable(&self) -> bool {
        self.applied.is_editable()
    }

    pub fn lifecycle(&self) -> Result<Lifecycle, EditableError> {
        let editable = self.state.try_borrow().map_err(|_| EditableError::Busy)?;
        Ok(editable.lifecycle())
    }

    /// Exceptions parked by owner callbacks during the last call.
    pub fn thrown(&self) -> &ThrownSlot {
        &self.thrown
    }

    /// Remove listeners and unmount. Safe to call more than once.
    ///
    /// An element created by `mount_in` is removed; a host element gets back
    /// without the attributes this mount wrote.
    pub fn unmount(&mut self) -> Result<(), EditableError> {
        let mut editable = self.state.try_borrow_mut().map_err(|_| EditableError::Busy)?;
        self.listeners.clear();
        if let Some(region) = editable.unmount() {
            if self.owns_element {
                self.element.remove();
            } else {
                self.applied.clear(&region);
            }
        }
        Ok(())
    }
}

impl Drop for MountedEditable {
    fn drop(&mut self) {
        if let Err(e) = self.unmount() {
            tracing::warn!(error = %e, "could not unmount editable region on drop");
        }
        if let Some(thrown) = self.thrown.take() {
            tracing::error!(?thrown, "owner callback threw while dropping editable region");
        }
    }
}

impl std::fmt::Debug for MountedEditable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedEditable")
            .field("element", &self.element)
            .field("listeners", &self.listeners.len())
            .field("owns_element", &self.owns_element)
            .finish_non_exhaustive()
    }
}
