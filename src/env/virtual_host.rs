use std::collections::{BTreeMap, BTreeSet};

use crate::env::host::{FrameHandle, Host, ListenerId, ListenerKind};
use crate::foundation::core::{PixelSize, Point};
use crate::raster::surface::PixmapSurface;

/// Deterministic in-process host.
///
/// Frame callbacks are queued until [`take_due_frames`](Self::take_due_frames) drains them, which
/// models one display refresh. Font readiness and context availability are toggles.
#[derive(Debug)]
pub struct VirtualHost {
    fonts_ready: bool,
    context_available: bool,
    origin: Point,
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    frames_requested: u64,
    frames_cancelled: u64,
}

impl Default for VirtualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualHost {
    /// Host with fonts ready, a working context, and the surface at the client origin.
    pub fn new() -> Self {
        Self {
            fonts_ready: true,
            context_available: true,
            origin: Point::ZERO,
            next_id: 1,
            pending: BTreeSet::new(),
            listeners: BTreeMap::new(),
            frames_requested: 0,
            frames_cancelled: 0,
        }
    }

    /// Place the surface element at `origin` in client coordinates.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Toggle font readiness.
    pub fn set_fonts_ready(&mut self, ready: bool) {
        self.fonts_ready = ready;
    }

    /// Toggle whether surfaces can obtain a 2D context.
    pub fn set_context_available(&mut self, available: bool) {
        self.context_available = available;
    }

    /// Drain every callback scheduled before this refresh, in request order.
    pub fn take_due_frames(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Callbacks currently scheduled.
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether at least one listener of `kind` is attached.
    pub fn has_listener(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    /// Total `request_frame` calls.
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    /// Total `cancel_frame` calls that hit a scheduled callback.
    pub fn frames_cancelled(&self) -> u64 {
        self.frames_cancelled
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Host for VirtualHost {
    fn fonts_ready(&self) -> bool {
        self.fonts_ready
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next());
        self.pending.insert(handle);
        self.frames_requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.remove(&handle) {
            self.frames_cancelled += 1;
        }
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn surface_origin(&self) -> Point {
        self.origin
    }

    fn allocate_surface(&mut self, size: PixelSize) -> Option<PixmapSurface> {
        if !self.context_available {
            return None;
        }
        PixmapSurface::allocate(size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/env/virtual_host.rs"]
mod tests;
