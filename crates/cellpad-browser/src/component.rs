//! Dioxus component for an editable region.
//!
//! The region's children are never rendered from state: the component emits
//! an empty `div` and leaves its contents to the user and to seeding. Props
//! flow into `ContentEditable` on every render; the DOM is only touched from
//! the mount event, the post-render effect and native events.

use std::cell::RefCell;
use std::rc::Rc;

use cellpad_core::{
    ContentEditable, EditableHandlers, EditableProps, SeedOutcome, is_component_owned,
    resolve_allow_edit,
};
use dioxus::prelude::*;
use dioxus::web::WebEventExt;

use crate::region::BrowserRegion;

type Shared = Rc<RefCell<ContentEditable<BrowserRegion, FocusEvent>>>;

/// Props for the EditableDiv component.
#[derive(Props, Clone, PartialEq)]
pub struct EditableDivProps {
    /// Markup to seed on mount, on the first render after mount, and
    /// whenever the value changes.
    #[props(default)]
    pub initial_content: Option<String>,
    /// Called with the region's markup after an edit or on blur, only when
    /// it differs from the last value sent.
    #[props(default)]
    pub on_change: Option<EventHandler<String>>,
    /// Called after the blur flush.
    #[props(default)]
    pub onblur: Option<EventHandler<FocusEvent>>,
    #[props(default)]
    pub auto_focus: Option<bool>,
    /// Native editing; enabled when absent.
    #[props(default)]
    pub allow_edit: Option<bool>,
    /// The region element on attach, `None` on detach.
    #[props(default)]
    pub inner_ref: Option<EventHandler<Option<web_sys::HtmlElement>>>,
    #[props(default)]
    pub onmousedown: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    pub ondoubleclick: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes, extends = div)]
    pub attributes: Vec<Attribute>,
}

/// The props the core tracks. Pass-through attributes go through the `div`
/// spread instead.
fn core_props(props: &EditableDivProps) -> EditableProps {
    EditableProps {
        initial_content: props.initial_content.clone(),
        auto_focus: props.auto_focus,
        allow_edit: props.allow_edit,
        ..Default::default()
    }
}

/// Owner attributes minus the ones the component sets itself.
fn spread_attributes(attributes: &[Attribute]) -> Vec<Attribute> {
    attributes
        .iter()
        .filter(|attr| !is_component_owned(attr.name))
        .cloned()
        .collect()
}

/// Attach the mounted node and run the mount seed.
///
/// The post-render pass runs straight after, since the framework may have
/// run this render's effect before the mount event arrived.
fn mount_region(state: &Shared, region: BrowserRegion) -> SeedOutcome {
    let Ok(mut core) = state.try_borrow_mut() else {
        tracing::debug!("mounted: region busy, skipping mount");
        return SeedOutcome::default();
    };
    core.attach(region);
    let mounted = core.mount();
    let settled = core.after_render();
    SeedOutcome {
        seeded: mounted.seeded || settled.seeded,
        focused: mounted.focused || settled.focused,
    }
}

fn release(state: &Shared) {
    if let Ok(mut core) = state.try_borrow_mut() {
        core.unmount();
    }
}

fn handlers_for(props: &EditableDivProps) -> EditableHandlers<BrowserRegion, FocusEvent> {
    let mut handlers = EditableHandlers::new();
    if let Some(on_change) = props.on_change {
        handlers = handlers.on_change(move |markup: &str| on_change.call(markup.to_string()));
    }
    if let Some(onblur) = props.onblur {
        handlers = handlers.on_blur(move |evt: &FocusEvent| onblur.call(evt.clone()));
    }
    if let Some(inner_ref) = props.inner_ref {
        handlers = handlers.inner_ref(move |region: Option<&BrowserRegion>| {
            inner_ref.call(region.map(|r| r.element().clone()))
        });
    }
    handlers
}

/// A `div` with native in-place editing, synced with its owner.
///
/// Presses, double clicks and clicks stop at the region so a selectable
/// parent (a grid cell) does not also react; the owner's own handlers for
/// them still run.
#[component]
pub fn EditableDiv(props: EditableDivProps) -> Element {
    let state: Shared = use_hook(|| {
        Rc::new(RefCell::new(ContentEditable::new(
            EditableProps::default(),
            EditableHandlers::new(),
        )))
    });

    let editable = resolve_allow_edit(props.allow_edit);
    let initial_content = props.initial_content.clone();
    let auto_focus = props.auto_focus;

    match state.try_borrow_mut() {
        Ok(mut core) => {
            core.set_props(core_props(&props));
            core.set_handlers(handlers_for(&props));
        }
        Err(_) => tracing::warn!("render while region busy, keeping previous props"),
    }

    {
        let state = state.clone();
        use_effect(use_reactive!(|(initial_content, auto_focus)| {
            tracing::trace!(
                has_content = initial_content.is_some(),
                ?auto_focus,
                "post-render seed check"
            );
            if let Ok(mut core) = state.try_borrow_mut() {
                core.after_render();
            }
        }));
    }

    {
        let state = state.clone();
        use_drop(move || release(&state));
    }

    let attributes = spread_attributes(&props.attributes);

    let onmousedown = props.onmousedown;
    let ondoubleclick = props.ondoubleclick;
    let onclick = props.onclick;

    rsx! {
        div {
            tabindex: "0",
            contenteditable: if editable { "true" } else { "false" },

            onmounted: {
                let state = state.clone();
                move |evt: MountedEvent| {
                    let Some(region) = BrowserRegion::from_element(evt.as_web_event()) else {
                        tracing::warn!("mounted node is not an HtmlElement");
                        return;
                    };
                    let outcome = mount_region(&state, region);
                    tracing::debug!(
                        seeded = outcome.seeded,
                        focused = outcome.focused,
                        "editable region mounted"
                    );
                }
            },

            oninput: {
                let state = state.clone();
                move |_| {
                    if let Ok(mut core) = state.try_borrow_mut() {
                        core.handle_input();
                    }
                }
            },

            onblur: {
                let state = state.clone();
                move |evt: FocusEvent| {
                    if let Ok(mut core) = state.try_borrow_mut() {
                        core.handle_blur(&evt);
                    }
                }
            },

            onmousedown: move |evt: MouseEvent| {
                evt.stop_propagation();
                if let Some(handler) = onmousedown {
                    handler.call(evt);
                }
            },
            ondoubleclick: move |evt: MouseEvent| {
                evt.stop_propagation();
                if let Some(handler) = ondoubleclick {
                    handler.call(evt);
                }
            },
            onclick: move |evt: MouseEvent| {
                evt.stop_propagation();
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },

            ..attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellpad_core::Lifecycle;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn div() -> web_sys::HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let el = document
            .create_element("div")
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        document.body().unwrap().append_child(&el).unwrap();
        el
    }

    fn shared(props: EditableProps, handlers: EditableHandlers<BrowserRegion, FocusEvent>) -> Shared {
        Rc::new(RefCell::new(ContentEditable::new(props, handlers)))
    }

    fn div_props() -> EditableDivProps {
        EditableDivProps {
            initial_content: None,
            on_change: None,
            onblur: None,
            auto_focus: None,
            allow_edit: None,
            inner_ref: None,
            onmousedown: None,
            ondoubleclick: None,
            onclick: None,
            attributes: Vec::new(),
        }
    }

    #[wasm_bindgen_test]
    fn props_split_between_core_and_spread() {
        let props = EditableDivProps {
            initial_content: Some("<p>X</p>".into()),
            auto_focus: Some(true),
            allow_edit: Some(false),
            attributes: vec![
                Attribute::new("class", "cell", None, false),
                Attribute::new("tabindex", "-1", None, false),
                Attribute::new("contenteditable", "true", None, false),
            ],
            ..div_props()
        };

        assert_eq!(
            core_props(&props),
            EditableProps::new()
                .with_initial_content("<p>X</p>")
                .with_auto_focus(true)
                .with_allow_edit(false)
        );
        let names: Vec<_> = spread_attributes(&props.attributes)
            .iter()
            .map(|attr| attr.name)
            .collect();
        assert_eq!(names, vec!["class"]);
    }

    #[wasm_bindgen_test]
    fn effect_before_mount_event_still_settles() {
        let el = div();
        let state = shared(
            EditableProps::new().with_initial_content("<p>X</p>"),
            EditableHandlers::new(),
        );

        // This render's effect runs before the node is mounted.
        assert_eq!(state.borrow_mut().after_render(), SeedOutcome::default());
        assert_eq!(state.borrow().lifecycle(), Lifecycle::Unmounted);

        let outcome = mount_region(&state, BrowserRegion::new(el.clone()));
        assert!(outcome.seeded);
        assert_eq!(el.inner_html(), "<p>X</p>");
        assert_eq!(state.borrow().lifecycle(), Lifecycle::Seeded);

        // A later render with the same props leaves user text alone.
        el.set_inner_html("typed");
        state.borrow_mut().after_render();
        assert_eq!(el.inner_html(), "typed");
    }

    #[wasm_bindgen_test]
    fn release_reports_detach_once() {
        let seen: Rc<RefCell<Vec<bool>>> = Rc::default();
        let sink = seen.clone();
        let handlers = EditableHandlers::new()
            .inner_ref(move |region: Option<&BrowserRegion>| sink.borrow_mut().push(region.is_some()));
        let state = shared(EditableProps::new(), handlers);

        mount_region(&state, BrowserRegion::new(div()));
        release(&state);
        release(&state);

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert_eq!(state.borrow().lifecycle(), Lifecycle::Unmounted);
    }
}
