//! Cart Widget
//!
//! Binds the modal and the quantity steppers to page elements.
//! Everything bound is owned by the returned `CartWidget`; disposing it
//! (or dropping it) unbinds every listener and unmounts rendered lines.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dom_listeners::{is_event_origin, ListenerGroup};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node};

use crate::components::CartLineList;
use crate::config::CartConfig;
use crate::dom::{closest_from_target, element_by_id};
use crate::error::CartResult;
use crate::loader::{CartLoader, LineSource, PageCartLoader};
use crate::modal::{ModalController, ModalEvent, ModalState};
use crate::models::CartLine;
use crate::quantity::{click_stepper, StepOutcome};

/// Elements driving the modal
#[derive(Debug, Clone)]
pub struct CartHandles {
    pub trigger: Element,
    pub modal: Element,
    pub close: Option<Element>,
}

impl CartHandles {
    /// Look the handles up by id. None when the trigger or modal is missing.
    pub fn find(doc: &Document, config: &CartConfig) -> Option<Self> {
        let trigger = element_by_id(doc, &config.trigger_id);
        let modal = element_by_id(doc, &config.modal_id);
        let (Some(trigger), Some(modal)) = (trigger, modal) else {
            log::debug!(
                "cart modal not bound: #{} or #{} not on this page",
                config.trigger_id,
                config.modal_id
            );
            return None;
        };
        Some(Self {
            trigger,
            modal,
            close: element_by_id(doc, &config.close_id),
        })
    }
}

/// Numbers cart loads so only the newest one of a live widget lands
#[derive(Debug, Default)]
pub struct LoadGate {
    generation: Cell<u64>,
    closed: Cell<bool>,
}

impl LoadGate {
    /// Start a load; every earlier ticket goes stale
    pub fn begin(&self) -> u64 {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        !self.closed.get() && self.generation.get() == ticket
    }

    /// Make every ticket, past and future, stale
    pub fn close(&self) {
        self.closed.set(true);
    }
}

/// State shared between the modal listeners and in-flight loads
struct ModalShared {
    controller: RefCell<ModalController<Element>>,
    loader: Rc<dyn CartLoader>,
    items_container: Option<HtmlElement>,
    config: CartConfig,
    rendered: RefCell<Option<Box<dyn Any>>>,
    loads: LoadGate,
}

impl ModalShared {
    fn handle(&self, event: ModalEvent) -> ModalState {
        let state = self.controller.borrow_mut().handle(event);
        log::debug!("modal {:?} -> {:?}", event, state);
        state
    }

    fn open(self: &Rc<Self>) {
        self.handle(ModalEvent::Trigger);
        start_load(self.clone());
    }

    fn render(&self, lines: Vec<CartLine>) {
        let Some(container) = &self.items_container else {
            return;
        };
        self.rendered.borrow_mut().take();
        container.set_inner_html("");
        let classes = self.config.row_classes();
        let handle = leptos::mount::mount_to(container.clone(), move || {
            view! { <CartLineList lines=lines classes=classes /> }
        });
        *self.rendered.borrow_mut() = Some(Box::new(handle));
    }

    fn dispose(&self) {
        self.loads.close();
        self.rendered.borrow_mut().take();
    }
}

/// Run the loader; only the latest load of a live widget gets to render
fn start_load(shared: Rc<ModalShared>) {
    let ticket = shared.loads.begin();
    log::info!("Loading cart items...");

    spawn_local(async move {
        let result = shared.loader.load().await;
        if !shared.loads.is_current(ticket) {
            log::debug!("dropping stale cart load #{}", ticket);
            return;
        }
        match result {
            Ok(lines) => {
                log::info!("loaded {} cart lines", lines.len());
                if shared.loader.source() == LineSource::Remote {
                    shared.render(lines);
                }
            }
            Err(e) => log::error!("{}", e),
        }
    });
}

/// Delegated click on the rows root
fn on_stepper_click(ev: &Event, rows_root: &Element, config: &CartConfig) {
    let Some(button) = closest_from_target(ev.target(), &config.stepper_selector) else {
        return;
    };
    let node: &Node = &button;
    if !rows_root.contains(Some(node)) {
        return;
    }
    match click_stepper(&button, &config.quantity_selector) {
        StepOutcome::Stepped(quantity) => log::debug!("quantity -> {}", quantity),
        StepOutcome::NoIntent => log::debug!("stepper without a recognised intent ignored"),
        StepOutcome::NoDisplay => log::warn!(
            "stepper clicked but no {} next to it",
            config.quantity_selector
        ),
    }
}

/// A bound cart widget
pub struct CartWidget {
    listeners: ListenerGroup,
    modal: Option<Rc<ModalShared>>,
}

impl CartWidget {
    /// Find everything by id and bind with the given loader
    pub fn attach(doc: &Document, config: CartConfig, loader: Rc<dyn CartLoader>) -> CartResult<Self> {
        let handles = CartHandles::find(doc, &config);
        let rows_root = rows_root(doc, &config);
        let items_container = config
            .items_container_id
            .as_deref()
            .and_then(|id| element_by_id(doc, id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Self::bind(handles, rows_root, items_container, config, loader)
    }

    /// Find everything by id and read cart lines from the page
    pub fn attach_with_page_loader(doc: &Document, config: CartConfig) -> CartResult<Self> {
        let loader = page_loader(doc, &config);
        Self::attach(doc, config, loader)
    }

    /// Bind explicit handles
    pub fn bind(
        handles: Option<CartHandles>,
        rows_root: Option<Element>,
        items_container: Option<HtmlElement>,
        config: CartConfig,
        loader: Rc<dyn CartLoader>,
    ) -> CartResult<Self> {
        config.validate()?;
        let mut listeners = ListenerGroup::new();
        let mut modal = None;

        if let Some(handles) = handles {
            let shared = Rc::new(ModalShared {
                controller: RefCell::new(ModalController::new(
                    handles.modal.clone(),
                    config.active_class.clone(),
                )),
                loader,
                items_container,
                config: config.clone(),
                rendered: RefCell::new(None),
                loads: LoadGate::default(),
            });

            let on_trigger = shared.clone();
            listeners.listen(&handles.trigger, "click", move |_ev: Event| {
                on_trigger.open();
            })?;

            match &handles.close {
                Some(close) => {
                    let on_close = shared.clone();
                    listeners.listen(close, "click", move |_ev: Event| {
                        on_close.handle(ModalEvent::Close);
                    })?;
                }
                None => log::warn!(
                    "close control #{} missing; cart modal closes via backdrop only",
                    config.close_id
                ),
            }

            let on_backdrop = shared.clone();
            let modal_el = handles.modal.clone();
            listeners.listen(&handles.modal, "click", move |ev: Event| {
                let from_backdrop = is_event_origin(&ev, &modal_el);
                on_backdrop.handle(ModalEvent::Backdrop { from_backdrop });
            })?;

            modal = Some(shared);
        }

        match rows_root {
            Some(root) => {
                let step_config = config.clone();
                let scope = root.clone();
                listeners.listen(&root, "click", move |ev: Event| {
                    on_stepper_click(&ev, &scope, &step_config);
                })?;
            }
            None => log::warn!("no rows root; quantity steppers not bound"),
        }

        log::info!(
            "cart widget bound ({} listeners, modal {})",
            listeners.len(),
            if modal.is_some() { "on" } else { "off" }
        );

        Ok(Self { listeners, modal })
    }

    /// Whether the trigger and modal were found and bound
    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.modal
            .as_ref()
            .map(|m| m.controller.borrow().state().is_open())
            .unwrap_or(false)
    }

    /// Same as clicking the trigger
    pub fn open(&self) {
        if let Some(modal) = &self.modal {
            modal.open();
        }
    }

    /// Same as clicking the close control
    pub fn close(&self) {
        if let Some(modal) = &self.modal {
            modal.handle(ModalEvent::Close);
        }
    }

    /// Listeners still bound; 0 after `dispose`
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Unbind everything. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.listeners.dispose();
        if let Some(modal) = self.modal.take() {
            modal.dispose();
        }
    }
}

impl Drop for CartWidget {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Configured rows root, falling back to `<body>`
fn rows_root(doc: &Document, config: &CartConfig) -> Option<Element> {
    if let Some(id) = &config.rows_root_id {
        match element_by_id(doc, id) {
            Some(root) => return Some(root),
            None => log::warn!("rows root #{} missing; delegating from <body>", id),
        }
    }
    doc.body().map(Element::from)
}

/// Page loader scoped to the modal when there is one
pub fn page_loader(doc: &Document, config: &CartConfig) -> Rc<dyn CartLoader> {
    let scope = element_by_id(doc, &config.modal_id)
        .or_else(|| doc.body().map(Element::from))
        .or_else(|| doc.document_element());
    match scope {
        Some(scope) => Rc::new(PageCartLoader::new(scope, config.clone())),
        None => Rc::new(crate::loader::StaticCartLoader::default()),
    }
}
