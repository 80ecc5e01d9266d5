use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::BeforeUnloadEvent;
use yew::prelude::*;

/// Keeps a `beforeunload` confirmation attached to the window while the
/// settings form has unsaved changes.
///
/// The listener is dropped when the dirty flag clears or the component
/// unmounts, so toggling the flag repeatedly never stacks handlers and no
/// stale handler outlives the form.
#[hook]
pub fn use_unsaved_changes_guard(has_changes: bool) {
    use_effect_with(has_changes, |has_changes| {
        let listener = has_changes.then(|| {
            // beforeunload needs a non-passive listener for prevent_default
            EventListener::new_with_options(
                &gloo::utils::window(),
                "beforeunload",
                EventListenerOptions::enable_prevent_default(),
                |event| {
                    if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
                        event.prevent_default();
                        event.set_return_value("");
                    }
                },
            )
        });

        move || drop(listener)
    });
}
