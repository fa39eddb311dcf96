//! DOM Listener Utilities
//!
//! Owned event-listener handles for wasm front-ends.
//! A handle removes its listener when disposed or dropped, so a group of
//! handles doubles as the disposer for everything a component bound.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget};

/// A single bound listener. Dropping it unbinds the listener.
pub struct ListenerHandle {
    target: EventTarget,
    event: String,
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl ListenerHandle {
    /// Whether the listener is still attached
    pub fn is_bound(&self) -> bool {
        self.closure.is_some()
    }

    /// Unbind now instead of waiting for drop
    pub fn remove(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(&self.event, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("event", &self.event)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// Bind `handler` to `event` on `target`.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<ListenerHandle, JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(ListenerHandle {
        target: target.clone(),
        event: event.to_string(),
        closure: Some(closure),
    })
}

/// A set of listeners disposed together
#[derive(Debug, Default)]
pub struct ListenerGroup {
    handles: Vec<ListenerHandle>,
}

impl ListenerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind and keep the handle in this group
    pub fn listen<F>(&mut self, target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        self.handles.push(listen(target, event, handler)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Unbind every listener in the group. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        for handle in self.handles.drain(..) {
            handle.remove();
        }
    }
}

/// Run `f` once the document structure is ready.
///
/// Runs immediately if `DOMContentLoaded` already fired, otherwise
/// registers a one-shot listener for it.
pub fn on_dom_ready<F>(document: &Document, f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let callback = Closure::once_into_js(move |_ev: Event| f());
    document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
}

/// Whether the event originated on `target` itself rather than a descendant
pub fn is_event_origin(ev: &Event, target: &EventTarget) -> bool {
    match ev.target() {
        Some(origin) => JsValue::from(origin) == JsValue::from(target.clone()),
        None => false,
    }
}
