//! Cart Modal State
//!
//! Two states, three click events. The controller keeps the marker class
//! on the modal element in step with the state after every event.

use crate::dom::MarkerTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Clicks that can change the modal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// Cart trigger clicked
    Trigger,
    /// Close control clicked
    Close,
    /// Click delivered to the modal container; `from_backdrop` is true only
    /// when the container itself is the event's origin
    Backdrop { from_backdrop: bool },
}

impl ModalState {
    pub fn next(self, event: ModalEvent) -> ModalState {
        match event {
            ModalEvent::Trigger => ModalState::Open,
            ModalEvent::Close => ModalState::Closed,
            ModalEvent::Backdrop { from_backdrop: true } => ModalState::Closed,
            ModalEvent::Backdrop { from_backdrop: false } => self,
        }
    }

    pub fn is_open(self) -> bool {
        self == ModalState::Open
    }
}

/// Applies modal events to an element's marker class
#[derive(Debug)]
pub struct ModalController<T: MarkerTarget> {
    modal: T,
    marker: String,
    state: ModalState,
}

impl<T: MarkerTarget> ModalController<T> {
    /// Start from whatever the markup currently shows
    pub fn new(modal: T, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        let state = if modal.has_marker(&marker) {
            ModalState::Open
        } else {
            ModalState::Closed
        };
        Self { modal, marker, state }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn element(&self) -> &T {
        &self.modal
    }

    /// Apply one event; returns the resulting state
    pub fn handle(&mut self, event: ModalEvent) -> ModalState {
        self.state = self.state.next(event);
        match self.state {
            ModalState::Open => self.modal.add_marker(&self.marker),
            ModalState::Closed => self.modal.remove_marker(&self.marker),
        }
        self.state
    }

    pub fn open(&mut self) -> ModalState {
        self.handle(ModalEvent::Trigger)
    }

    pub fn close(&mut self) -> ModalState {
        self.handle(ModalEvent::Close)
    }
}
