//! Per-view one-shot marker registrations
//!
//! Each target view has at most one pending marker. Starting a new pass on a
//! view cancels whatever is pending there and bumps the view's generation.
//! A view also has at most one slice load in flight: a newer pass that wants
//! the same slice hands its marker to that load instead of issuing another,
//! while a pass that wants a different slice supersedes it.

use std::collections::HashMap;

use crate::config::MarkerStyle;
use crate::domain::{ImageId, ImagePoint, ViewId};

/// Marker waiting for a view's next render completion
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerRegistration {
    /// Projected point on the target slice's pixel grid
    pub point: ImagePoint,
    /// Slice the point was projected onto
    pub image_id: ImageId,
    pub style: MarkerStyle,
}

/// Handle identifying one pass on one view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassTicket {
    view: ViewId,
    generation: u64,
}

impl PassTicket {
    pub fn view(&self) -> ViewId {
        self.view
    }
}

/// Slice load in flight on a view and the marker to show once it lands
#[derive(Debug)]
struct InFlightLoad {
    ticket: PassTicket,
    index: usize,
    registration: MarkerRegistration,
}

#[derive(Debug, Default)]
pub struct OverlaySlots {
    generations: HashMap<ViewId, u64>,
    pending: HashMap<ViewId, MarkerRegistration>,
    loads: HashMap<ViewId, InFlightLoad>,
}

impl OverlaySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pass on `view`, superseding any earlier one
    pub fn begin_pass(&mut self, view: ViewId) -> PassTicket {
        let generation = self.generations.entry(view).or_default();
        *generation += 1;
        if self.pending.remove(&view).is_some() {
            log::trace!("Dropped superseded marker on {view}");
        }
        PassTicket {
            view,
            generation: *generation,
        }
    }

    /// Whether `ticket` still belongs to the newest pass on its view
    pub fn is_current(&self, ticket: &PassTicket) -> bool {
        self.generations.get(&ticket.view) == Some(&ticket.generation)
    }

    /// Store the marker for `ticket`'s view, replacing any pending one
    ///
    /// The view stays on its current slice, so any load in flight there is
    /// superseded. Returns false and stores nothing if the ticket is stale.
    pub fn register(&mut self, ticket: &PassTicket, registration: MarkerRegistration) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if self.loads.remove(&ticket.view).is_some() {
            log::trace!("Dropped in-flight load on {}", ticket.view);
        }
        self.pending.insert(ticket.view, registration);
        true
    }

    /// Record that `ticket`'s pass waits for slice `index` to load
    ///
    /// Returns true when the caller must issue the load. Returns false when a
    /// load of the same slice is already in flight; it now carries
    /// `registration` instead of the older marker.
    pub fn await_load(
        &mut self,
        ticket: &PassTicket,
        index: usize,
        registration: MarkerRegistration,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if let Some(load) = self.loads.get_mut(&ticket.view) {
            if load.index == index && load.registration.image_id == registration.image_id {
                load.registration = registration;
                return false;
            }
        }
        self.loads.insert(
            ticket.view,
            InFlightLoad {
                ticket: *ticket,
                index,
                registration,
            },
        );
        true
    }

    /// Close the load issued for `ticket`
    ///
    /// Returns the slice index and the newest marker waiting on it, or `None`
    /// if a later pass superseded the load.
    pub fn finish_load(&mut self, ticket: &PassTicket) -> Option<(usize, MarkerRegistration)> {
        match self.loads.get(&ticket.view) {
            Some(load) if load.ticket == *ticket => {}
            _ => return None,
        }
        let load = self.loads.remove(&ticket.view)?;
        Some((load.index, load.registration))
    }

    /// Whether `view` has a slice load in flight
    pub fn is_loading(&self, view: ViewId) -> bool {
        self.loads.contains_key(&view)
    }

    /// Store the marker of a finished load for `view`
    pub fn place(&mut self, view: ViewId, registration: MarkerRegistration) {
        self.pending.insert(view, registration);
    }

    /// Remove and return the pending marker for `view`
    pub fn take(&mut self, view: ViewId) -> Option<MarkerRegistration> {
        self.pending.remove(&view)
    }

    pub fn pending(&self, view: ViewId) -> Option<&MarkerRegistration> {
        self.pending.get(&view)
    }

    /// Number of views with a pending marker
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
