//! Propagation suppression for the direct manipulation events.

use cellpad_core::SUPPRESSED_EVENTS;
use gloo_events::EventListener;
use web_sys::EventTarget;

/// Stop `mousedown`, `dblclick` and `click` from bubbling past `target`.
///
/// Listeners on `target` itself still run. The returned listeners remove
/// themselves when dropped.
pub fn suppress_propagation(target: &EventTarget) -> Vec<EventListener> {
    SUPPRESSED_EVENTS
        .iter()
        .map(|&event_type| {
            EventListener::new(target, event_type, |event| event.stop_propagation())
        })
        .collect()
}
